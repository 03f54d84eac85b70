//! Units as seen by the search: position, health, and basic attack

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SkirmishError};
use crate::core::types::{Side, UnitId};
use crate::grid::Cell;

/// Broad class of a unit, parsed from the host's template label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Melee,     // Footmen and other close-combat troops
    Ranged,    // Archers
    Structure, // Townhalls; never moves
}

impl UnitKind {
    /// Map a host template name onto a kind (case-insensitive)
    pub fn from_label(label: &str) -> Result<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "footman" | "melee" => Ok(UnitKind::Melee),
            "archer" | "ranged" => Ok(UnitKind::Ranged),
            "townhall" | "structure" => Ok(UnitKind::Structure),
            other => Err(SkirmishError::Scenario(format!("unknown unit type: {}", other))),
        }
    }

    pub fn can_move(&self) -> bool {
        !matches!(self, UnitKind::Structure)
    }
}

/// Per-unit state carried in a combat snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStat {
    pub id: UnitId,
    pub side: Side,
    pub position: Cell,
    /// Remaining hit points; the unit is dead at 0 or below
    pub hp: i32,
    pub attack_damage: i32,
    /// Chebyshev radius reported by the host
    pub attack_range: u32,
    pub kind: UnitKind,
}

impl UnitStat {
    pub fn new(id: UnitId, side: Side, position: Cell, hp: i32, attack_damage: i32) -> Self {
        Self {
            id,
            side,
            position,
            hp,
            attack_damage,
            attack_range: 1,
            kind: UnitKind::Melee,
        }
    }

    pub fn with_kind(mut self, kind: UnitKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_range(mut self, range: u32) -> Self {
        self.attack_range = range;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Hit points counted toward evaluation (dead units count as 0)
    pub fn effective_hp(&self) -> i32 {
        self.hp.max(0)
    }

    /// Apply incoming damage, clamping at 0
    pub fn take_damage(&mut self, damage: i32) {
        self.hp = (self.hp - damage).max(0);
    }
}
