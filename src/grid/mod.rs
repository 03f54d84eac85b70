//! Grid navigation - cells, static terrain, and A* pathfinding
//!
//! Movement is 4-connected with unit step cost. The pathfinder doubles as a
//! distance oracle for position evaluation.

pub mod cell;
pub mod map;
pub mod pathfinding;
pub mod replan;

pub use cell::{Cell, Direction};
pub use map::GridMap;
pub use pathfinding::{approach_path, find_path, hop_distance, is_contiguous};
pub use replan::should_replan;
