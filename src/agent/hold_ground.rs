//! Opponent that never moves and strikes anything that comes adjacent

use crate::agent::command::{HostCommand, TurnCommands};
use crate::agent::world::WorldSnapshot;
use crate::agent::TurnAgent;
use crate::core::types::Side;

pub struct HoldGroundAgent {
    side: Side,
}

impl HoldGroundAgent {
    pub fn new(side: Side) -> Self {
        Self { side }
    }
}

impl TurnAgent for HoldGroundAgent {
    fn name(&self) -> &str {
        "hold"
    }

    fn side(&self) -> Side {
        self.side
    }

    fn on_turn(&mut self, world: &WorldSnapshot) -> TurnCommands {
        let mut commands = TurnCommands::new();
        for unit in world.units_of(self.side) {
            // First opponent in range, in host order
            let target = world
                .units_of(self.side.opponent())
                .find(|enemy| unit.position.chebyshev(&enemy.position) <= unit.range.max(1));
            if let Some(target) = target {
                commands.insert(unit.id, HostCommand::attack(unit.id, target.id));
            }
        }
        commands
    }
}
