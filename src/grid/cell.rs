//! Square grid coordinates (x to the right, y downward)
//!
//! Movement is 4-connected: only the axis-aligned neighbours are reachable
//! in one step.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SkirmishError};

/// A single grid cell
///
/// Plain value type: two cells are equal exactly when their coordinates are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance, max(|dx|, |dy|)
    pub fn chebyshev(&self, other: &Self) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// Manhattan distance, the true step count on an empty 4-connected grid
    pub fn manhattan(&self, other: &Self) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    /// The cell one step away in `direction`
    pub fn step(&self, direction: Direction) -> Cell {
        let (dx, dy) = direction.offset();
        Cell::new(self.x + dx, self.y + dy)
    }

    /// All 4 axis-aligned neighbours, in `Direction::all()` order
    pub fn neighbors(&self) -> [Cell; 4] {
        Direction::all().map(|d| self.step(d))
    }

    /// True when `other` shares a row or column with us and is exactly one step away
    ///
    /// This is the reach of a basic attack; diagonal cells do not qualify.
    pub fn is_attack_adjacent(&self, other: &Self) -> bool {
        (self.x == other.x || self.y == other.y) && self.chebyshev(other) == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction of a single move
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Grid offset for this direction (north is toward row 0)
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Get opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// All directions, in the fixed order used for move enumeration
    pub fn all() -> [Direction; 4] {
        [Direction::North, Direction::East, Direction::South, Direction::West]
    }

    /// Direction of a unit displacement
    ///
    /// Diagonal, zero and multi-cell displacements are rejected.
    pub fn from_delta(dx: i32, dy: i32) -> Result<Self> {
        match (dx, dy) {
            (0, -1) => Ok(Direction::North),
            (1, 0) => Ok(Direction::East),
            (0, 1) => Ok(Direction::South),
            (-1, 0) => Ok(Direction::West),
            _ => Err(SkirmishError::InvalidDirection { dx, dy }),
        }
    }

    /// Direction of the step from `from` to the adjacent cell `to`
    pub fn between(from: Cell, to: Cell) -> Result<Self> {
        Self::from_delta(to.x - from.x, to.y - from.y)
    }
}
