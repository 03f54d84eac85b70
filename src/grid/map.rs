//! Static terrain for one episode: bounds plus blocked cells
//!
//! Uses a HashSet-based approach for O(1) lookup of obstacle cells.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::grid::cell::Cell;

/// Map extents and obstacle set
///
/// Valid cells are `[0, width) x [0, height)`. Obstacles never change while
/// a search is running, so snapshots share one `GridMap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridMap {
    width: i32,
    height: i32,
    obstacles: AHashSet<Cell>,
}

impl GridMap {
    /// Create an empty map of the given size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
            obstacles: AHashSet::new(),
        }
    }

    /// Create a map with the given obstacle cells
    pub fn with_obstacles(width: i32, height: i32, obstacles: impl IntoIterator<Item = Cell>) -> Self {
        let mut map = Self::new(width, height);
        for cell in obstacles {
            map.block(cell);
        }
        map
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells on the map; no simple path is this long
    pub fn area(&self) -> u32 {
        (self.width as u32) * (self.height as u32)
    }

    /// Mark a cell as an obstacle
    pub fn block(&mut self, cell: Cell) {
        self.obstacles.insert(cell);
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    /// In bounds and not an obstacle
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.is_obstacle(cell)
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Cell> {
        self.obstacles.iter()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }
}
