//! Squad agent driven by alpha-beta search

use std::sync::Arc;

use crate::agent::command::{translate_joint_action, TurnCommands};
use crate::agent::world::WorldSnapshot;
use crate::agent::TurnAgent;
use crate::combat::evaluation::Evaluator;
use crate::core::config::SearchConfig;
use crate::core::error::Result;
use crate::core::types::Side;
use crate::grid::GridMap;
use crate::search::{AlphaBeta, SearchStats};

/// Searches `plies` deep every turn and plays the best joint action found
pub struct MinimaxAgent {
    side: Side,
    config: SearchConfig,
    engine: AlphaBeta,
    /// Terrain cached for the episode; obstacles never change mid-episode
    map: Option<Arc<GridMap>>,
    last_stats: SearchStats,
}

impl MinimaxAgent {
    pub fn new(side: Side, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            side,
            engine: AlphaBeta::new(Evaluator::new(config.weights)),
            config,
            map: None,
            last_stats: SearchStats::default(),
        })
    }

    /// Construct from raw agent arguments, the first of which is the ply count
    ///
    /// A missing or non-numeric ply count is a configuration error; the
    /// caller must not start the episode.
    pub fn from_args<S: AsRef<str>>(side: Side, args: &[S]) -> Result<Self> {
        Self::new(side, SearchConfig::from_args(args)?)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Counters from the most recent search
    pub fn last_stats(&self) -> SearchStats {
        self.last_stats
    }

    fn terrain(&mut self, world: &WorldSnapshot) -> Arc<GridMap> {
        self.map.get_or_insert_with(|| Arc::new(world.map())).clone()
    }

    fn decide(&mut self, world: &WorldSnapshot) -> Result<TurnCommands> {
        let map = self.terrain(world);
        let snapshot = world.combat_snapshot(self.side, map)?;

        let action = self.engine.best_action(&snapshot, self.config.plies);
        self.last_stats = self.engine.stats();

        match action {
            Some(joint) => {
                tracing::info!(side = ?self.side, turn = world.turn, action = %joint, "minimax decision");
                Ok(translate_joint_action(&joint))
            }
            None => {
                tracing::info!(side = ?self.side, turn = world.turn, "no legal joint action");
                Ok(TurnCommands::new())
            }
        }
    }
}

impl TurnAgent for MinimaxAgent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn side(&self) -> Side {
        self.side
    }

    fn on_episode_start(&mut self, world: &WorldSnapshot) -> TurnCommands {
        self.map = Some(Arc::new(world.map()));
        self.on_turn(world)
    }

    fn on_turn(&mut self, world: &WorldSnapshot) -> TurnCommands {
        self.decide(world).unwrap_or_else(|e| {
            tracing::error!(side = ?self.side, turn = world.turn, error = %e, "minimax turn skipped");
            TurnCommands::new()
        })
    }
}
