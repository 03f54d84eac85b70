//! Wandering opponent used as a moving obstacle
//!
//! Each mobile unit takes one random open step per turn. Seeded, so an
//! episode replays identically for the same seed.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::agent::command::{HostCommand, TurnCommands};
use crate::agent::world::WorldSnapshot;
use crate::agent::TurnAgent;
use crate::core::types::Side;
use crate::grid::{Direction, GridMap};

pub struct PatrolAgent {
    side: Side,
    rng: ChaCha8Rng,
    map: Option<GridMap>,
}

impl PatrolAgent {
    pub fn new(side: Side, seed: u64) -> Self {
        Self {
            side,
            rng: ChaCha8Rng::seed_from_u64(seed),
            map: None,
        }
    }
}

impl TurnAgent for PatrolAgent {
    fn name(&self) -> &str {
        "patrol"
    }

    fn side(&self) -> Side {
        self.side
    }

    fn on_episode_start(&mut self, world: &WorldSnapshot) -> TurnCommands {
        self.map = Some(world.map());
        self.on_turn(world)
    }

    fn on_turn(&mut self, world: &WorldSnapshot) -> TurnCommands {
        let map = self.map.get_or_insert_with(|| world.map());
        let mut commands = TurnCommands::new();

        for unit in world.units_of(self.side) {
            if !unit.kind().map(|k| k.can_move()).unwrap_or(false) {
                continue;
            }
            let open: Vec<Direction> = Direction::all()
                .into_iter()
                .filter(|&d| {
                    let cell = unit.position.step(d);
                    map.is_passable(cell) && !world.is_occupied(cell)
                })
                .collect();
            if let Some(&direction) = open.choose(&mut self.rng) {
                commands.insert(unit.id, HostCommand::move_unit(unit.id, direction));
            }
        }
        commands
    }
}
