//! Host-side resolution of primitive commands
//!
//! The arena owns the world and is the only place units actually move or
//! take damage. Commands that break the rules are rejected individually;
//! the rest of the turn still resolves.

use serde::Serialize;

use crate::agent::command::{HostCommand, TurnCommands};
use crate::agent::world::WorldSnapshot;
use crate::combat::unit::UnitKind;
use crate::core::types::{Side, UnitId};
use crate::grid::{Direction, GridMap};
use crate::sim::scenario::Objective;

/// What happened when one side's commands were applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    pub moves: u32,
    pub attacks: u32,
    pub rejected: u32,
    /// Units removed from the world this turn
    pub killed: Vec<UnitId>,
}

pub struct Arena {
    world: WorldSnapshot,
    map: GridMap,
}

impl Arena {
    pub fn new(world: WorldSnapshot) -> Self {
        let map = world.map();
        Self { world, map }
    }

    pub fn world(&self) -> &WorldSnapshot {
        &self.world
    }

    pub fn advance_turn(&mut self) {
        self.world.turn += 1;
    }

    /// Resolve `side`'s commands
    ///
    /// Attacks resolve first against start-of-turn positions; destroyed units
    /// are removed before moves, which repeat until no further move succeeds
    /// so a unit may step into a cell a squad mate just left.
    pub fn apply(&mut self, side: Side, commands: &TurnCommands) -> TurnReport {
        let mut report = TurnReport::default();
        let mut strikes: Vec<(UnitId, i32)> = Vec::new();
        let mut pending: Vec<(UnitId, Direction)> = Vec::new();

        for (&key, command) in commands {
            if key != command.unit() || !self.owns(side, key) {
                tracing::warn!(?side, unit = %key, "rejected command for a unit not under control");
                report.rejected += 1;
                continue;
            }
            match *command {
                HostCommand::Attack { unit, target } => match self.strike(unit, target) {
                    Some(damage) => strikes.push((target, damage)),
                    None => {
                        tracing::debug!(%unit, %target, "attack out of range");
                        report.rejected += 1;
                    }
                },
                HostCommand::Move { unit, direction } => pending.push((unit, direction)),
            }
        }

        for (target, damage) in strikes {
            if let Some(defender) = self.world.unit_mut(target) {
                defender.hp -= damage;
                report.attacks += 1;
            }
        }
        report.killed = self.remove_dead();

        loop {
            let before = pending.len();
            pending.retain(|&(unit, direction)| !self.try_move(unit, direction));
            report.moves += (before - pending.len()) as u32;
            if pending.len() == before {
                break;
            }
        }
        for (unit, direction) in &pending {
            tracing::debug!(%unit, ?direction, "move blocked");
        }
        report.rejected += pending.len() as u32;

        report
    }

    fn owns(&self, side: Side, unit: UnitId) -> bool {
        self.world.unit(unit).map_or(false, |u| u.owner == side && u.is_alive())
    }

    /// Damage dealt if `unit` can hit `target` right now
    fn strike(&self, unit: UnitId, target: UnitId) -> Option<i32> {
        let attacker = self.world.unit(unit)?;
        let defender = self.world.unit(target)?;
        let in_range = attacker.position.chebyshev(&defender.position) <= attacker.range.max(1);
        (defender.owner != attacker.owner && defender.is_alive() && in_range).then_some(attacker.basic_attack)
    }

    fn try_move(&mut self, unit: UnitId, direction: Direction) -> bool {
        let Some(mover) = self.world.unit(unit) else {
            return false;
        };
        if mover.kind().map_or(true, |k| k == UnitKind::Structure) {
            return false;
        }
        let destination = mover.position.step(direction);
        if !self.map.is_passable(destination) || self.world.is_occupied(destination) {
            return false;
        }
        if let Some(mover) = self.world.unit_mut(unit) {
            mover.position = destination;
        }
        true
    }

    fn remove_dead(&mut self) -> Vec<UnitId> {
        let killed: Vec<UnitId> = self.world.units.iter().filter(|u| !u.is_alive()).map(|u| u.id).collect();
        for id in &killed {
            tracing::info!(unit = %id, turn = self.world.turn, "unit destroyed");
        }
        self.world.units.retain(|u| u.is_alive());
        killed
    }

    /// The side that has won under `objective`, if any
    pub fn winner(&self, objective: Objective) -> Option<Side> {
        let friendly_alive = self.world.units_of(Side::Friendly).count() > 0;
        let enemy_defeated = match objective {
            Objective::Eliminate => self.world.units_of(Side::Enemy).count() == 0,
            Objective::DestroyStructures => !self
                .world
                .units_of(Side::Enemy)
                .any(|u| u.kind().map_or(false, |k| k == UnitKind::Structure)),
        };

        match (friendly_alive, enemy_defeated) {
            (_, true) => Some(Side::Friendly),
            (false, false) => Some(Side::Enemy),
            (true, false) => None,
        }
    }
}
