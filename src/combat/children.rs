//! Joint action enumeration and successor construction
//!
//! A unit next to an opponent must attack it; otherwise it may step in any
//! open cardinal direction. The side's joint actions are the Cartesian
//! product of its units' options. Joint actions that would leave two live
//! units in one cell are discarded. A unit with no option, or whose every
//! move would collide, sits the ply out instead of stalling its squad.

use crate::combat::action::{JointAction, UnitAction};
use crate::combat::snapshot::CombatSnapshot;
use crate::combat::unit::UnitStat;
use crate::core::types::Side;
use crate::grid::Direction;

/// A successor state paired with the joint action that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    pub action: JointAction,
    pub snapshot: CombatSnapshot,
}

impl SearchNode {
    /// Root node: no action led here
    pub fn root(snapshot: CombatSnapshot) -> Self {
        Self {
            action: JointAction::new(),
            snapshot,
        }
    }
}

/// Legal actions for one unit in the given snapshot
///
/// An attack-adjacent opponent forces `Attack` against the first one in list
/// order. Otherwise every cardinal step into an in-bounds, obstacle-free cell
/// not held by a live opponent. Structures never move.
pub fn legal_actions(snapshot: &CombatSnapshot, unit: &UnitStat) -> Vec<UnitAction> {
    let opponent = unit.side.opponent();

    if let Some(target) = snapshot
        .live_units(opponent)
        .find(|enemy| unit.position.is_attack_adjacent(&enemy.position))
    {
        return vec![UnitAction::Attack(target.id)];
    }

    if !unit.kind.can_move() {
        return Vec::new();
    }

    Direction::all()
        .into_iter()
        .filter(|&direction| {
            let cell = unit.position.step(direction);
            snapshot.map().is_passable(cell) && !snapshot.live_units(opponent).any(|e| e.position == cell)
        })
        .map(UnitAction::Move)
        .collect()
}

/// Units of the side to move that take part in the joint action
fn actors(snapshot: &CombatSnapshot) -> Vec<&UnitStat> {
    snapshot
        .live_units(snapshot.to_move())
        .filter(|u| u.kind.can_move())
        .collect()
}

/// Enumerate every successor for the side to move
///
/// Units without a legal action are left out of the joint action. When
/// every combination collides, units that could move may hold instead, so a
/// squad mate's forced attack still goes through. Empty only when no live
/// unit of that side can act at all; search treats that as terminal.
pub fn generate_children(snapshot: &CombatSnapshot) -> Vec<SearchNode> {
    let actors = actors(snapshot);
    if actors.is_empty() {
        return Vec::new();
    }

    let options: Vec<Vec<Option<UnitAction>>> = actors
        .iter()
        .map(|u| {
            let legal: Vec<Option<UnitAction>> = legal_actions(snapshot, u).into_iter().map(Some).collect();
            if legal.is_empty() {
                vec![None]
            } else {
                legal
            }
        })
        .collect();

    let children = enumerate(snapshot, &actors, &options);
    if !children.is_empty() {
        return children;
    }

    let relaxed: Vec<Vec<Option<UnitAction>>> = options
        .into_iter()
        .map(|mut opts| {
            if opts.iter().any(|a| matches!(a, Some(UnitAction::Move(_)))) {
                opts.push(None);
            }
            opts
        })
        .collect();
    tracing::trace!(side = ?snapshot.to_move(), "every joint action collides, letting movers hold");
    enumerate(snapshot, &actors, &relaxed)
}

/// Collision-free joint actions over the Cartesian product of `options`
///
/// `None` keeps that unit out of the joint action. The empty joint action
/// is never produced.
fn enumerate(snapshot: &CombatSnapshot, actors: &[&UnitStat], options: &[Vec<Option<UnitAction>>]) -> Vec<SearchNode> {
    let mut children = Vec::with_capacity(options.iter().map(|o| o.len()).product());
    let mut current = vec![0usize; actors.len()];

    loop {
        let joint: JointAction = actors
            .iter()
            .zip(&current)
            .zip(options)
            .filter_map(|((unit, &idx), opts)| opts[idx].map(|action| (unit.id, action)))
            .collect();

        if !joint.is_empty() {
            match apply_joint_action(snapshot, &joint) {
                Some(next) => children.push(SearchNode {
                    action: joint,
                    snapshot: next,
                }),
                None => tracing::trace!(action = %joint, "dropped joint action, units would share a cell"),
            }
        }

        if !advance_combo(&mut current, options) {
            break;
        }
    }

    children
}

/// Advance a combination index vector (odometer-style, last unit fastest)
///
/// Returns false when all combinations are exhausted.
fn advance_combo<T>(current: &mut [usize], options: &[Vec<T>]) -> bool {
    for i in (0..current.len()).rev() {
        current[i] += 1;
        if current[i] < options[i].len() {
            return true;
        }
        current[i] = 0;
    }
    false
}

/// Apply a joint action for the side to move and hand the turn over
///
/// All actions resolve against the parent state, so a unit wounded this ply
/// still strikes with its full damage. Returns `None` when the result would
/// put two live units on one cell.
pub fn apply_joint_action(snapshot: &CombatSnapshot, joint: &JointAction) -> Option<CombatSnapshot> {
    let side = snapshot.to_move();
    let mut child = snapshot.clone();

    for (&id, action) in joint.iter() {
        let Some(actor) = snapshot.live_units(side).find(|u| u.id == id) else {
            continue;
        };

        match *action {
            UnitAction::Move(direction) => {
                if let Some(unit) = child.units_mut(side).iter_mut().find(|u| u.id == id) {
                    unit.position = actor.position.step(direction);
                }
            }
            UnitAction::Attack(target) => {
                if let Some(defender) = child.units_mut(side.opponent()).iter_mut().find(|u| u.id == target) {
                    defender.take_damage(actor.attack_damage);
                }
            }
        }
    }

    if has_collision(&child) {
        return None;
    }

    child.set_to_move(side.opponent());
    Some(child)
}

fn has_collision(snapshot: &CombatSnapshot) -> bool {
    let mut seen = ahash::AHashSet::new();
    [Side::Friendly, Side::Enemy]
        .into_iter()
        .flat_map(|side| snapshot.live_units(side))
        .any(|u| !seen.insert(u.position))
}
