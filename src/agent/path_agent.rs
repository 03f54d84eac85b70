//! Single-unit navigation toward an enemy structure
//!
//! The agent plans an A* path once at episode start and then walks it one
//! cell per turn. The path is recomputed only when the opposing mobile unit
//! steps onto the remaining path close to us, or when we have no path at all.
//! Once the path is exhausted the unit attacks the structure.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::agent::command::{HostCommand, TurnCommands};
use crate::agent::world::WorldSnapshot;
use crate::agent::TurnAgent;
use crate::combat::unit::UnitKind;
use crate::core::config::{SearchConfig, DEFAULT_REPLAN_RADIUS};
use crate::core::error::{Result, SkirmishError};
use crate::core::types::{Side, UnitId};
use crate::grid::{approach_path, find_path, should_replan, Cell, GridMap};

/// Time spent planning versus acting over an episode
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlanTiming {
    pub plan: Duration,
    /// Turn handling excluding planning
    pub execution: Duration,
    /// Number of A* plans computed, including the initial one
    pub plans: u32,
}

impl PlanTiming {
    pub fn total(&self) -> Duration {
        self.plan + self.execution
    }
}

/// Walks one unit to the enemy structure along a held A* path
pub struct PathAgent {
    side: Side,
    replan_radius: u32,
    follower: Option<UnitId>,
    target: Option<UnitId>,
    blocker: Option<UnitId>,
    map: Option<Arc<GridMap>>,
    path: VecDeque<Cell>,
    next_step: Option<Cell>,
    timing: PlanTiming,
}

impl PathAgent {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            replan_radius: DEFAULT_REPLAN_RADIUS,
            follower: None,
            target: None,
            blocker: None,
            map: None,
            path: VecDeque::new(),
            next_step: None,
            timing: PlanTiming::default(),
        }
    }

    pub fn from_config(side: Side, config: &SearchConfig) -> Self {
        Self::new(side).with_replan_radius(config.replan_radius)
    }

    pub fn with_replan_radius(mut self, radius: u32) -> Self {
        self.replan_radius = radius;
        self
    }

    /// Cells still to walk, the pending step first
    pub fn held_path(&self) -> Vec<Cell> {
        self.next_step.into_iter().chain(self.path.iter().copied()).collect()
    }

    pub fn timing(&self) -> PlanTiming {
        self.timing
    }

    /// Pick the follower, the target structure and the optional blocker
    fn locate_units(&mut self, world: &WorldSnapshot) -> Result<()> {
        let follower = world
            .units_of(self.side)
            .find(|u| u.kind().map(|k| k.can_move()).unwrap_or(false))
            .ok_or_else(|| SkirmishError::MissingUnit(format!("mobile {:?} unit", self.side)))?;
        let target = world.find_kind(self.side.opponent(), UnitKind::Structure)?;
        let blocker = world
            .units_of(self.side.opponent())
            .find(|u| u.kind().map(|k| k.can_move()).unwrap_or(false));

        self.follower = Some(follower.id);
        self.target = Some(target.id);
        self.blocker = blocker.map(|u| u.id);

        tracing::info!(
            follower = %follower.id,
            target = %target.id,
            blocker = ?self.blocker,
            "path agent located units"
        );
        Ok(())
    }

    fn blocker_position(&self, world: &WorldSnapshot) -> Option<Cell> {
        self.blocker
            .and_then(|id| world.unit(id))
            .filter(|u| u.is_alive())
            .map(|u| u.position)
    }

    /// Compute a fresh path from the follower to next to the target
    fn plan(&mut self, world: &WorldSnapshot, from: Cell, target: Cell) {
        let started = Instant::now();
        let map = self.map.get_or_insert_with(|| Arc::new(world.map())).clone();
        let blocker = self.blocker_position(world);

        let path = approach_path(find_path(&map, from, target, blocker), target);
        if path.is_empty() && from.chebyshev(&target) > 1 {
            tracing::info!(%from, %target, "no path to target");
        } else {
            tracing::debug!(%from, %target, steps = path.len(), "planned path");
        }

        self.path = path.into();
        self.next_step = None;
        self.timing.plan += started.elapsed();
        self.timing.plans += 1;
    }

    fn step(&mut self, world: &WorldSnapshot) -> Result<TurnCommands> {
        let follower_id = self
            .follower
            .ok_or_else(|| SkirmishError::MissingUnit("path follower".into()))?;
        let position = world.require_unit(follower_id)?.position;

        let Some(target) = self.target.and_then(|id| world.unit(id)).filter(|u| u.is_alive()) else {
            tracing::info!("target destroyed");
            return Ok(TurnCommands::new());
        };
        let (target_id, target_cell) = (target.id, target.position);

        let held: Vec<Cell> = self
            .next_step
            .filter(|&cell| cell != position)
            .into_iter()
            .chain(self.path.iter().copied())
            .collect();
        let stranded = held.is_empty() && position.chebyshev(&target_cell) > 1;

        if stranded || should_replan(&held, position, self.blocker_position(world), self.replan_radius) {
            tracing::debug!(turn = world.turn, stranded, "replanning");
            self.plan(world, position, target_cell);
        }

        if self.next_step.map_or(true, |cell| cell == position) {
            self.next_step = self.path.pop_front();
            if let Some(cell) = self.next_step {
                tracing::debug!(%cell, "moving to");
            }
        }

        let mut commands = TurnCommands::new();
        match self.next_step {
            Some(next) if next != position => match HostCommand::step_toward(follower_id, position, next) {
                Ok(command) => {
                    commands.insert(follower_id, command);
                }
                Err(e) => {
                    tracing::warn!(unit = %follower_id, error = %e, "cannot step to next cell");
                }
            },
            _ if position.chebyshev(&target_cell) <= 1 => {
                tracing::info!(unit = %follower_id, target = %target_id, "attacking target");
                commands.insert(follower_id, HostCommand::attack(follower_id, target_id));
            }
            _ => {
                tracing::debug!(unit = %follower_id, "no path, holding position");
            }
        }
        Ok(commands)
    }
}

impl TurnAgent for PathAgent {
    fn name(&self) -> &str {
        "astar"
    }

    fn side(&self) -> Side {
        self.side
    }

    fn on_episode_start(&mut self, world: &WorldSnapshot) -> TurnCommands {
        self.map = Some(Arc::new(world.map()));
        self.timing = PlanTiming::default();

        let located = self.locate_units(world).and_then(|()| {
            let follower = self
                .follower
                .ok_or_else(|| SkirmishError::MissingUnit("path follower".into()))?;
            let target = self
                .target
                .ok_or_else(|| SkirmishError::MissingUnit("target structure".into()))?;
            Ok((world.require_unit(follower)?.position, world.require_unit(target)?.position))
        });

        match located {
            Ok((from, target)) => {
                self.plan(world, from, target);
                self.on_turn(world)
            }
            Err(e) => {
                tracing::error!(error = %e, "path agent cannot start");
                TurnCommands::new()
            }
        }
    }

    fn on_turn(&mut self, world: &WorldSnapshot) -> TurnCommands {
        let started = Instant::now();
        let plan_before = self.timing.plan;

        let commands = self.step(world).unwrap_or_else(|e| {
            tracing::error!(turn = world.turn, error = %e, "path agent turn skipped");
            TurnCommands::new()
        });

        let planning = self.timing.plan.saturating_sub(plan_before);
        self.timing.execution += started.elapsed().saturating_sub(planning);
        commands
    }

    fn on_episode_end(&mut self, world: &WorldSnapshot) {
        tracing::info!(
            turns = world.turn,
            plans = self.timing.plans,
            plan_secs = self.timing.plan.as_secs_f64(),
            execution_secs = self.timing.execution.as_secs_f64(),
            total_secs = self.timing.total().as_secs_f64(),
            "path agent finished"
        );
    }
}
