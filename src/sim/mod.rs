//! Host simulation
//!
//! A small deterministic arena standing in for the game engine: it loads a
//! scenario, applies the primitive commands agents return, alternates turns
//! and reports who won.

pub mod arena;
pub mod episode;
pub mod scenario;

pub use arena::{Arena, TurnReport};
pub use episode::{run_episode, EpisodeOutcome};
pub use scenario::{scenario_path, Objective, Scenario, ScenarioUnit};
