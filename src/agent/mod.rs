//! Turn-driven agents
//!
//! Architecture: trait + concrete agents
//! - `TurnAgent` is the interface the host loop drives once per turn
//! - `MinimaxAgent` searches joint squad actions with alpha-beta
//! - `PathAgent` walks a single unit to a target structure with A*
//! - `HoldGroundAgent` and `PatrolAgent` are simple opponents

pub mod command;
pub mod hold_ground;
pub mod minimax_agent;
pub mod path_agent;
pub mod patrol;
pub mod world;

pub use command::{translate_joint_action, HostCommand, TurnCommands};
pub use hold_ground::HoldGroundAgent;
pub use minimax_agent::MinimaxAgent;
pub use path_agent::{PathAgent, PlanTiming};
pub use patrol::PatrolAgent;
pub use world::{WorldSnapshot, WorldUnit};

use crate::core::types::Side;

/// An agent controlling one side of the skirmish
///
/// Lookup failures inside an agent never escape: the agent logs them and
/// returns an empty command map so the host can carry on with the next turn.
pub trait TurnAgent {
    /// Short name for logs and reports
    fn name(&self) -> &str;

    /// The side whose units this agent commands
    fn side(&self) -> Side;

    /// First turn of an episode; agents that plan ahead do it here
    fn on_episode_start(&mut self, world: &WorldSnapshot) -> TurnCommands {
        self.on_turn(world)
    }

    /// Every later turn
    fn on_turn(&mut self, world: &WorldSnapshot) -> TurnCommands;

    /// Called once after the final turn
    fn on_episode_end(&mut self, _world: &WorldSnapshot) {}
}
