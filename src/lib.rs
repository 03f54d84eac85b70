//! Skirmish AI - squad search and grid navigation for turn-based skirmishes
//!
//! - `grid`: cells, terrain and A* pathfinding with a single dynamic blocker
//! - `combat`: search state, joint action generation and evaluation
//! - `search`: minimax with alpha-beta pruning over joint actions
//! - `agent`: turn-driven agents translating decisions into host commands
//! - `sim`: a small host arena for running whole episodes

pub mod agent;
pub mod combat;
pub mod core;
pub mod grid;
pub mod search;
pub mod sim;
