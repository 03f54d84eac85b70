//! Scenario files: map, obstacles, units and win condition
//!
//! ```toml
//! name = "brief"
//! width = 5
//! height = 3
//! obstacles = [[0, 1], [1, 1]]
//! objective = "destroy_structures"
//!
//! [[units]]
//! id = 1
//! side = "friendly"
//! label = "Footman"
//! x = 0
//! y = 0
//! hp = 160
//! attack = 10
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::agent::world::{WorldSnapshot, WorldUnit};
use crate::combat::unit::UnitKind;
use crate::core::error::{Result, SkirmishError};
use crate::core::types::{Side, UnitId};
use crate::grid::Cell;

/// Directory holding the bundled scenarios
pub const SCENARIO_DIR: &str = "data/scenarios";

/// Turn limit when a scenario does not set one
pub const DEFAULT_MAX_TURNS: u32 = 200;

/// What ends the episode in Friendly's favor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Kill every enemy unit
    #[default]
    Eliminate,
    /// Destroy every enemy structure; mobile enemies may survive
    DestroyStructures,
}

fn default_range() -> u32 {
    1
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioUnit {
    pub id: u32,
    pub side: Side,
    pub label: String,
    pub x: i32,
    pub y: i32,
    pub hp: i32,
    #[serde(default)]
    pub attack: i32,
    #[serde(default = "default_range")]
    pub range: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub obstacles: Vec<[i32; 2]>,
    #[serde(default)]
    pub objective: Objective,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    pub units: Vec<ScenarioUnit>,
}

impl Scenario {
    /// Parse and validate scenario TOML
    pub fn from_toml(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a bundled scenario by file stem from `data/scenarios/`
    pub fn load_named(name: &str) -> Result<Self> {
        Self::load(&scenario_path(name))
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SkirmishError::Scenario(format!(
                "{}: map must be at least 1x1 (got {}x{})",
                self.name, self.width, self.height
            )));
        }
        for unit in &self.units {
            UnitKind::from_label(&unit.label)?;
        }
        if self.objective == Objective::DestroyStructures
            && !self
                .units
                .iter()
                .any(|u| u.side == Side::Enemy && UnitKind::from_label(&u.label).map_or(false, |k| !k.can_move()))
        {
            return Err(SkirmishError::Scenario(format!(
                "{}: destroy_structures needs an enemy structure",
                self.name
            )));
        }

        // Placement rules are the ones search relies on
        let world = self.world();
        world.combat_snapshot(Side::Friendly, std::sync::Arc::new(world.map()))?;
        Ok(())
    }

    /// Initial host world for this scenario
    pub fn world(&self) -> WorldSnapshot {
        let mut world = WorldSnapshot::new(self.width, self.height);
        world.obstacles = self.obstacles.iter().map(|&[x, y]| Cell::new(x, y)).collect();
        world.units = self
            .units
            .iter()
            .map(|u| {
                WorldUnit::new(UnitId(u.id), u.side, Cell::new(u.x, u.y), u.hp, u.attack, u.label.clone())
                    .with_range(u.range)
            })
            .collect();
        world
    }
}

/// Path of a bundled scenario file
pub fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(SCENARIO_DIR).join(format!("{}.toml", name))
}
