//! A* pathfinding on the 4-connected skirmish grid
//!
//! Every step costs 1. The heuristic is Chebyshev distance, which never
//! exceeds the Manhattan distance and is therefore admissible (and
//! consistent) for axis-aligned moves, so returned paths are shortest.
//!
//! Entries in the open set are never edited in place. When a cell's `g`
//! improves, a fresh node record is pushed and the superseded entry is
//! dropped when it surfaces, because its cell is already closed by then.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};

use crate::grid::cell::Cell;
use crate::grid::map::GridMap;

/// Search bookkeeping for one visited cell
#[derive(Debug, Clone, Copy)]
struct PathNode {
    cell: Cell,
    g: u32,
    /// Index of the predecessor in the node arena
    came_from: Option<usize>,
}

/// Entry in the A* open set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    f_cost: u32, // g_cost + heuristic
    /// Insertion counter, makes equal-f ties pop in FIFO order
    seq: u64,
    node: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn heuristic(from: Cell, goal: Cell) -> u32 {
    from.chebyshev(&goal)
}

/// Find a shortest path from `start` to `goal` using A*
///
/// The result excludes `start` and ends on `goal`, ready to be consumed
/// front to back. It is empty when the goal is unreachable or equals the start.
/// `blocker` is a single dynamic obstacle (typically another unit) that is
/// treated as impassable for this call only.
pub fn find_path(map: &GridMap, start: Cell, goal: Cell, blocker: Option<Cell>) -> Vec<Cell> {
    if start == goal {
        return Vec::new();
    }

    let mut nodes: Vec<PathNode> = Vec::new();
    let mut best_g: AHashMap<Cell, u32> = AHashMap::new();
    let mut closed: AHashSet<Cell> = AHashSet::new();
    let mut open_set = BinaryHeap::new();
    let mut seq = 0u64;

    nodes.push(PathNode {
        cell: start,
        g: 0,
        came_from: None,
    });
    best_g.insert(start, 0);
    open_set.push(OpenEntry {
        f_cost: heuristic(start, goal),
        seq,
        node: 0,
    });

    while let Some(entry) = open_set.pop() {
        let current = nodes[entry.node];

        // Superseded entry for a cell we already expanded
        if !closed.insert(current.cell) {
            continue;
        }

        if current.cell == goal {
            return reconstruct_path(&nodes, entry.node);
        }

        for neighbor in current.cell.neighbors() {
            if !map.is_passable(neighbor) || blocker == Some(neighbor) || closed.contains(&neighbor) {
                continue;
            }

            let tentative_g = current.g + 1;
            let improves = best_g.get(&neighbor).map_or(true, |&g| tentative_g < g);

            if improves {
                best_g.insert(neighbor, tentative_g);
                nodes.push(PathNode {
                    cell: neighbor,
                    g: tentative_g,
                    came_from: Some(entry.node),
                });
                seq += 1;
                open_set.push(OpenEntry {
                    f_cost: tentative_g + heuristic(neighbor, goal),
                    seq,
                    node: nodes.len() - 1,
                });
            }
        }
    }

    tracing::trace!(%start, %goal, "no path");
    Vec::new()
}

/// Walk back-pointers from the goal node, dropping the start node
fn reconstruct_path(nodes: &[PathNode], goal_index: usize) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut index = goal_index;
    while let Some(prev) = nodes[index].came_from {
        path.push(nodes[index].cell);
        index = prev;
    }
    path.reverse();
    path
}

/// Number of steps between two cells, or `None` when no path exists
///
/// `Some(0)` only when `a == b`; an empty path between distinct cells means
/// unreachable rather than adjacent.
pub fn hop_distance(map: &GridMap, a: Cell, b: Cell, blocker: Option<Cell>) -> Option<u32> {
    if a == b {
        return Some(0);
    }
    let path = find_path(map, a, b, blocker);
    if path.is_empty() {
        None
    } else {
        Some(path.len() as u32)
    }
}

/// Trim a path so it stops next to `target` instead of on it
///
/// Units cannot enter an occupied cell, so a path found toward a unit is
/// followed up to the attack-adjacent cell.
pub fn approach_path(mut path: Vec<Cell>, target: Cell) -> Vec<Cell> {
    if path.last() == Some(&target) {
        path.pop();
    }
    path
}

/// True when consecutive cells are single axis-aligned steps starting next to `start`
pub fn is_contiguous(start: Cell, path: &[Cell]) -> bool {
    let mut previous = start;
    for &cell in path {
        if previous.manhattan(&cell) != 1 {
            return false;
        }
        previous = cell;
    }
    true
}
