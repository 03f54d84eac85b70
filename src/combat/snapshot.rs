//! Immutable combat state for one search node
//!
//! Children clone the unit lists and share the terrain through an `Arc`, so
//! branching never aliases mutable unit state between nodes.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};

use crate::combat::unit::UnitStat;
use crate::core::error::{Result, SkirmishError};
use crate::core::types::{Side, UnitId};
use crate::grid::{Cell, GridMap};

/// Snapshot of both squads, the terrain, and whose turn it is
#[derive(Debug, Clone, PartialEq)]
pub struct CombatSnapshot {
    friendly: Vec<UnitStat>,
    enemy: Vec<UnitStat>,
    map: Arc<GridMap>,
    to_move: Side,
}

impl CombatSnapshot {
    /// Build a snapshot, checking the placement invariants
    ///
    /// Every unit must be on its own side's list, inside the map and off
    /// obstacles; ids must be unique and no two live units may share a cell.
    pub fn new(
        map: Arc<GridMap>,
        friendly: Vec<UnitStat>,
        enemy: Vec<UnitStat>,
        to_move: Side,
    ) -> Result<Self> {
        let mut ids: AHashSet<UnitId> = AHashSet::new();
        let mut occupied: AHashMap<Cell, UnitId> = AHashMap::new();

        for (expected, units) in [(Side::Friendly, &friendly), (Side::Enemy, &enemy)] {
            for unit in units.iter() {
                if unit.side != expected {
                    return Err(SkirmishError::InvalidSnapshot(format!(
                        "unit {} is {:?} but listed as {:?}",
                        unit.id, unit.side, expected
                    )));
                }
                if !ids.insert(unit.id) {
                    return Err(SkirmishError::InvalidSnapshot(format!("duplicate unit id {}", unit.id)));
                }
                if !unit.is_alive() {
                    continue;
                }
                if !map.is_passable(unit.position) {
                    return Err(SkirmishError::InvalidSnapshot(format!(
                        "unit {} at {} is out of bounds or on an obstacle",
                        unit.id, unit.position
                    )));
                }
                if let Some(other) = occupied.insert(unit.position, unit.id) {
                    return Err(SkirmishError::InvalidSnapshot(format!(
                        "units {} and {} both occupy {}",
                        other, unit.id, unit.position
                    )));
                }
            }
        }

        Ok(Self {
            friendly,
            enemy,
            map,
            to_move,
        })
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Same positions with a different side to move
    pub fn with_to_move(mut self, side: Side) -> Self {
        self.to_move = side;
        self
    }

    /// All units of one side, dead ones included, in stable order
    pub fn units(&self, side: Side) -> &[UnitStat] {
        match side {
            Side::Friendly => &self.friendly,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn live_units(&self, side: Side) -> impl Iterator<Item = &UnitStat> {
        self.units(side).iter().filter(|u| u.is_alive())
    }

    pub fn live_count(&self, side: Side) -> usize {
        self.live_units(side).count()
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitStat> {
        self.friendly.iter().chain(self.enemy.iter()).find(|u| u.id == id)
    }

    /// True when a live unit of either side stands on `cell`
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.friendly
            .iter()
            .chain(self.enemy.iter())
            .any(|u| u.is_alive() && u.position == cell)
    }

    /// Sum of hit points over a side's living units
    pub fn total_hp(&self, side: Side) -> i32 {
        self.live_units(side).map(|u| u.effective_hp()).sum()
    }

    pub(crate) fn units_mut(&mut self, side: Side) -> &mut Vec<UnitStat> {
        match side {
            Side::Friendly => &mut self.friendly,
            Side::Enemy => &mut self.enemy,
        }
    }

    pub(crate) fn set_to_move(&mut self, side: Side) {
        self.to_move = side;
    }
}
