//! Position evaluation for search leaves
//!
//! Weighted linear combination of three features, from Friendly's point of view:
//! - hit point differential between the live squads
//! - summed hop distance from each live friendly unit to its nearest live enemy
//! - casualty balance (units killed minus units lost)
//!
//! The casualty term is worth exactly one unreachable unit's worth of
//! proximity, so losing a unit never looks better than keeping it alive
//! far from the fight.

use serde::{Deserialize, Serialize};

use crate::combat::snapshot::CombatSnapshot;
use crate::core::types::Side;
use crate::grid::hop_distance;

/// Weights for the evaluation features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationWeights {
    /// Points per hit point of (friendly - enemy) health
    pub hp_weight: f64,
    /// Points deducted per step between a friendly unit and its nearest enemy
    pub proximity_weight: f64,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            hp_weight: 1.0,
            proximity_weight: 2.0,
        }
    }
}

/// Feature values behind one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationBreakdown {
    pub hp_differential: i32,
    pub summed_distance: u32,
    /// Dead enemies minus dead friendlies
    pub casualty_balance: i32,
    /// Distance charged for a unit with no path to any enemy
    pub unreachable_distance: u32,
    pub value: f64,
}

/// Stateless evaluator parameterized by its weights
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    weights: EvaluationWeights,
}

impl Evaluator {
    pub fn new(weights: EvaluationWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EvaluationWeights {
        &self.weights
    }

    /// Utility of a snapshot; higher is better for Friendly
    pub fn evaluate(&self, snapshot: &CombatSnapshot) -> f64 {
        self.breakdown(snapshot).value
    }

    /// Evaluate and report the individual features
    pub fn breakdown(&self, snapshot: &CombatSnapshot) -> EvaluationBreakdown {
        let hp_differential = hp_differential(snapshot);
        let unreachable_distance = unreachable_distance(snapshot);
        let summed_distance = summed_hop_distance(snapshot);
        let casualty_balance = casualties(snapshot, Side::Enemy) - casualties(snapshot, Side::Friendly);

        let value = self.weights.hp_weight * hp_differential as f64
            - self.weights.proximity_weight * summed_distance as f64
            + self.weights.proximity_weight * unreachable_distance as f64 * casualty_balance as f64;

        EvaluationBreakdown {
            hp_differential,
            summed_distance,
            casualty_balance,
            unreachable_distance,
            value,
        }
    }
}

/// Live friendly hit points minus live enemy hit points
pub fn hp_differential(snapshot: &CombatSnapshot) -> i32 {
    snapshot.total_hp(Side::Friendly) - snapshot.total_hp(Side::Enemy)
}

/// Distance charged when no enemy can be reached; longer than any real path
pub fn unreachable_distance(snapshot: &CombatSnapshot) -> u32 {
    snapshot.map().area().max(1)
}

/// Sum over live friendly units of the hop distance to the nearest live enemy
///
/// The first other live friendly unit is treated as a moving obstacle, since
/// squad mates get in each other's way. Zero when no enemies remain.
pub fn summed_hop_distance(snapshot: &CombatSnapshot) -> u32 {
    if snapshot.live_count(Side::Enemy) == 0 {
        return 0;
    }

    let cap = unreachable_distance(snapshot);
    let friendlies: Vec<_> = snapshot.live_units(Side::Friendly).collect();

    friendlies
        .iter()
        .map(|unit| {
            let blocker = friendlies
                .iter()
                .find(|other| other.id != unit.id)
                .map(|other| other.position);

            snapshot
                .live_units(Side::Enemy)
                .filter_map(|enemy| hop_distance(snapshot.map(), unit.position, enemy.position, blocker))
                .min()
                .unwrap_or(cap)
        })
        .sum()
}

fn casualties(snapshot: &CombatSnapshot, side: Side) -> i32 {
    snapshot.units(side).iter().filter(|u| !u.is_alive()).count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::unit::UnitStat;
    use crate::core::types::UnitId;
    use crate::grid::{Cell, GridMap};
    use std::sync::Arc;

    fn unit(id: u32, side: Side, x: i32, y: i32, hp: i32) -> UnitStat {
        UnitStat::new(UnitId(id), side, Cell::new(x, y), hp, 10)
    }

    fn snapshot(map: GridMap, friendly: Vec<UnitStat>, enemy: Vec<UnitStat>) -> CombatSnapshot {
        CombatSnapshot::new(Arc::new(map), friendly, enemy, Side::Friendly).unwrap()
    }

    #[test]
    fn test_default_weights() {
        let weights = EvaluationWeights::default();
        assert_eq!(weights.hp_weight, 1.0);
        assert_eq!(weights.proximity_weight, 2.0);
    }

    #[test]
    fn test_breakdown_features() {
        let s = snapshot(
            GridMap::new(10, 10),
            vec![unit(1, Side::Friendly, 0, 0, 100), unit(2, Side::Friendly, 0, 9, 50)],
            vec![unit(3, Side::Enemy, 3, 0, 80)],
        );
        let b = Evaluator::default().breakdown(&s);
        assert_eq!(b.hp_differential, 70);
        // (0,0) -> (3,0) is 3; (0,9) -> (3,0) is 12
        assert_eq!(b.summed_distance, 15);
        assert_eq!(b.casualty_balance, 0);
        assert_eq!(b.value, 70.0 - 2.0 * 15.0);
    }

    #[test]
    fn test_nearest_enemy_is_used() {
        let s = snapshot(
            GridMap::new(10, 10),
            vec![unit(1, Side::Friendly, 5, 5, 100)],
            vec![unit(2, Side::Enemy, 9, 9, 100), unit(3, Side::Enemy, 5, 7, 100)],
        );
        assert_eq!(summed_hop_distance(&s), 2);
    }

    #[test]
    fn test_squad_mate_is_a_blocker() {
        // Corridor: friendly 2 stands between friendly 1 and the enemy
        let s = snapshot(
            GridMap::new(5, 1),
            vec![unit(1, Side::Friendly, 0, 0, 100), unit(2, Side::Friendly, 2, 0, 100)],
            vec![unit(3, Side::Enemy, 4, 0, 100)],
        );
        let cap = unreachable_distance(&s);
        // Unit 1 is walled in by unit 2; unit 2 reaches the enemy in 2
        assert_eq!(summed_hop_distance(&s), cap + 2);
    }

    #[test]
    fn test_no_enemies_means_no_proximity_penalty() {
        let mut dead = unit(2, Side::Enemy, 3, 3, 0);
        dead.hp = 0;
        let s = snapshot(GridMap::new(5, 5), vec![unit(1, Side::Friendly, 0, 0, 100)], vec![dead]);
        assert_eq!(summed_hop_distance(&s), 0);
        let b = Evaluator::default().breakdown(&s);
        assert_eq!(b.casualty_balance, 1);
    }

    #[test]
    fn test_dead_units_excluded_from_hp_and_distance() {
        let alive = snapshot(
            GridMap::new(6, 6),
            vec![unit(1, Side::Friendly, 0, 0, 100)],
            vec![unit(2, Side::Enemy, 5, 5, 40), unit(3, Side::Enemy, 1, 0, 0)],
        );
        assert_eq!(hp_differential(&alive), 60);
        // Corpse next door is ignored; the live enemy is 10 away
        assert_eq!(summed_hop_distance(&alive), 10);
    }

    #[test]
    fn test_more_friendly_hp_is_never_worse() {
        let evaluator = Evaluator::default();
        let map = GridMap::new(6, 6);
        let enemy = vec![unit(3, Side::Enemy, 5, 5, 100)];
        let mut previous = f64::NEG_INFINITY;
        for hp in [0, 1, 10, 100] {
            let s = snapshot(
                map.clone(),
                vec![unit(1, Side::Friendly, 0, 0, 100), unit(2, Side::Friendly, 0, 5, hp)],
                enemy.clone(),
            );
            let value = evaluator.evaluate(&s);
            assert!(value >= previous, "hp {} gave {} < {}", hp, value, previous);
            previous = value;
        }
    }

    #[test]
    fn test_closer_is_better() {
        let evaluator = Evaluator::default();
        let far = snapshot(
            GridMap::new(8, 8),
            vec![unit(1, Side::Friendly, 0, 0, 100)],
            vec![unit(2, Side::Enemy, 7, 7, 100)],
        );
        let near = snapshot(
            GridMap::new(8, 8),
            vec![unit(1, Side::Friendly, 6, 7, 100)],
            vec![unit(2, Side::Enemy, 7, 7, 100)],
        );
        assert!(evaluator.evaluate(&near) > evaluator.evaluate(&far));
    }

    #[test]
    fn test_killing_an_enemy_is_rewarded() {
        let evaluator = Evaluator::default();
        let map = GridMap::new(6, 6);
        let before = snapshot(
            map.clone(),
            vec![unit(1, Side::Friendly, 0, 0, 100)],
            vec![unit(2, Side::Enemy, 1, 0, 5), unit(3, Side::Enemy, 5, 5, 100)],
        );
        let after = snapshot(
            map,
            vec![unit(1, Side::Friendly, 0, 0, 100)],
            vec![unit(2, Side::Enemy, 1, 0, 0), unit(3, Side::Enemy, 5, 5, 100)],
        );
        assert!(evaluator.evaluate(&after) > evaluator.evaluate(&before));
    }
}
