//! Host world snapshot as agents receive it each turn

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::combat::snapshot::CombatSnapshot;
use crate::combat::unit::{UnitKind, UnitStat};
use crate::core::error::{Result, SkirmishError};
use crate::core::types::{Side, Turn, UnitId};
use crate::grid::{Cell, GridMap};

fn default_range() -> u32 {
    1
}

/// One unit as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldUnit {
    pub id: UnitId,
    pub owner: Side,
    pub position: Cell,
    pub hp: i32,
    pub basic_attack: i32,
    #[serde(default = "default_range")]
    pub range: u32,
    /// Host template name ("Footman", "Archer", "TownHall", ...)
    pub label: String,
}

impl WorldUnit {
    pub fn new(id: UnitId, owner: Side, position: Cell, hp: i32, basic_attack: i32, label: impl Into<String>) -> Self {
        Self {
            id,
            owner,
            position,
            hp,
            basic_attack,
            range: 1,
            label: label.into(),
        }
    }

    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    pub fn kind(&self) -> Result<UnitKind> {
        UnitKind::from_label(&self.label)
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Search-side view of this unit, seen from `perspective`
    ///
    /// Units owned by `perspective` become Friendly, everyone else Enemy.
    pub fn to_stat(&self, perspective: Side) -> Result<UnitStat> {
        let side = if self.owner == perspective { Side::Friendly } else { Side::Enemy };
        Ok(UnitStat::new(self.id, side, self.position, self.hp, self.basic_attack)
            .with_kind(self.kind()?)
            .with_range(self.range))
    }
}

/// Everything the host tells an agent at the start of its turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub turn: Turn,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub obstacles: Vec<Cell>,
    pub units: Vec<WorldUnit>,
}

impl WorldSnapshot {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            turn: 0,
            width,
            height,
            obstacles: Vec::new(),
            units: Vec::new(),
        }
    }

    /// Static terrain of this world
    pub fn map(&self) -> GridMap {
        GridMap::with_obstacles(self.width, self.height, self.obstacles.iter().copied())
    }

    pub fn unit(&self, id: UnitId) -> Option<&WorldUnit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut WorldUnit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    /// Look up a unit that must exist
    pub fn require_unit(&self, id: UnitId) -> Result<&WorldUnit> {
        self.unit(id).ok_or(SkirmishError::UnitNotFound(id))
    }

    /// Live units owned by `side`, in host order
    pub fn units_of(&self, side: Side) -> impl Iterator<Item = &WorldUnit> {
        self.units.iter().filter(move |u| u.owner == side && u.is_alive())
    }

    /// First live unit of `side` whose label parses to `kind`
    pub fn find_kind(&self, side: Side, kind: UnitKind) -> Result<&WorldUnit> {
        self.units_of(side)
            .find(|u| u.kind().map(|k| k == kind).unwrap_or(false))
            .ok_or_else(|| SkirmishError::MissingUnit(format!("{:?} {:?} unit", side, kind)))
    }

    /// True when a live unit stands on `cell`
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.units.iter().any(|u| u.is_alive() && u.position == cell)
    }

    /// Build the search state from `perspective`'s point of view
    ///
    /// The agent's own units become the Friendly (maximizing) squad and the
    /// resulting snapshot has Friendly to move. `map` is passed in so a whole
    /// episode can share one terrain allocation.
    pub fn combat_snapshot(&self, perspective: Side, map: Arc<GridMap>) -> Result<CombatSnapshot> {
        let mut friendly = Vec::new();
        let mut enemy = Vec::new();
        for unit in &self.units {
            let stat = unit.to_stat(perspective)?;
            match stat.side {
                Side::Friendly => friendly.push(stat),
                Side::Enemy => enemy.push(stat),
            }
        }
        CombatSnapshot::new(map, friendly, enemy, Side::Friendly)
    }

    /// Live hit points summed over one side
    pub fn total_hp(&self, side: Side) -> i32 {
        self.units_of(side).map(|u| u.hp).sum()
    }
}
