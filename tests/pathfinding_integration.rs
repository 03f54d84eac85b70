//! Pathfinding integration tests
//!
//! A* is checked against a plain breadth-first search on random grids.

use std::collections::{HashMap, VecDeque};

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skirmish_ai::grid::*;

/// Shortest step count by BFS, honoring the same passability rules as A*
fn bfs_distance(map: &GridMap, start: Cell, goal: Cell, blocker: Option<Cell>) -> Option<u32> {
    let mut dist: HashMap<Cell, u32> = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(start, 0);
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        let d = dist[&cell];
        if cell == goal {
            return Some(d);
        }
        for next in cell.neighbors() {
            if !map.is_passable(next) || blocker == Some(next) || dist.contains_key(&next) {
                continue;
            }
            dist.insert(next, d + 1);
            queue.push_back(next);
        }
    }
    None
}

fn random_cell(rng: &mut ChaCha8Rng, width: i32, height: i32) -> Cell {
    Cell::new(rng.gen_range(0..width), rng.gen_range(0..height))
}

/// Random map with start and goal kept clear, plus an optional blocker
fn arb_problem() -> impl Strategy<Value = (GridMap, Cell, Cell, Option<Cell>)> {
    (2i32..12, 2i32..12, any::<u64>(), 0u32..40, any::<bool>()).prop_map(
        |(width, height, seed, density, with_blocker)| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let start = random_cell(&mut rng, width, height);
            let goal = random_cell(&mut rng, width, height);

            let mut map = GridMap::new(width, height);
            for y in 0..height {
                for x in 0..width {
                    let cell = Cell::new(x, y);
                    if cell != start && cell != goal && rng.gen_range(0..100) < density {
                        map.block(cell);
                    }
                }
            }

            let blocker = with_blocker
                .then(|| random_cell(&mut rng, width, height))
                .filter(|&b| b != start);
            (map, start, goal, blocker)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A* returns a shortest path whenever BFS finds one, and nothing otherwise
    #[test]
    fn prop_astar_matches_bfs((map, start, goal, blocker) in arb_problem()) {
        let path = find_path(&map, start, goal, blocker);
        let expected = bfs_distance(&map, start, goal, blocker);

        prop_assert_eq!(hop_distance(&map, start, goal, blocker), expected);

        match expected {
            Some(0) | None => prop_assert!(path.is_empty()),
            Some(d) => {
                prop_assert_eq!(path.len() as u32, d);
                prop_assert_eq!(path.last(), Some(&goal));
                prop_assert!(!path.contains(&start));
                prop_assert!(is_contiguous(start, &path));
                prop_assert!(path.iter().all(|&c| map.is_passable(c) && Some(c) != blocker));
            }
        }
    }

    /// On an open grid the path length is the Manhattan distance
    #[test]
    fn prop_open_grid_is_manhattan(
        width in 1i32..30,
        height in 1i32..30,
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let start = random_cell(&mut rng, width, height);
        let goal = random_cell(&mut rng, width, height);
        let map = GridMap::new(width, height);

        let path = find_path(&map, start, goal, None);
        prop_assert_eq!(path.len() as u32, start.manhattan(&goal));
    }

    /// Same inputs, same path
    #[test]
    fn prop_astar_is_deterministic((map, start, goal, blocker) in arb_problem()) {
        prop_assert_eq!(find_path(&map, start, goal, blocker), find_path(&map, start, goal, blocker));
    }
}

#[test]
fn test_wall_map_from_the_brief() {
    // F . . . .
    // x x x . x
    // H . . . .
    let map = GridMap::with_obstacles(
        5,
        3,
        [Cell::new(0, 1), Cell::new(1, 1), Cell::new(2, 1), Cell::new(4, 1)],
    );
    let footman = Cell::new(0, 0);
    let townhall = Cell::new(0, 2);

    let path = find_path(&map, footman, townhall, None);
    assert_eq!(path.len(), 8);
    assert!(path.contains(&Cell::new(3, 1)));

    let approach = approach_path(path, townhall);
    assert_eq!(approach.len(), 7);
    assert!(approach.last().unwrap().is_attack_adjacent(&townhall));
}

#[test]
fn test_enclosed_goal_has_no_path() {
    let goal = Cell::new(5, 5);
    let map = GridMap::with_obstacles(10, 10, goal.neighbors());
    assert!(find_path(&map, Cell::new(0, 0), goal, None).is_empty());
    assert_eq!(hop_distance(&map, Cell::new(0, 0), goal, None), None);
}

#[test]
fn test_blocker_in_corridor_cuts_the_path() {
    let map = GridMap::new(8, 1);
    let start = Cell::new(0, 0);
    let goal = Cell::new(7, 0);
    assert_eq!(hop_distance(&map, start, goal, None), Some(7));
    assert_eq!(hop_distance(&map, start, goal, Some(Cell::new(4, 0))), None);
}

#[test]
fn test_replan_only_for_close_blocker_on_path() {
    let map = GridMap::new(10, 3);
    let follower = Cell::new(0, 1);
    let path = find_path(&map, follower, Cell::new(9, 1), None);

    let on_path_near = path[1];
    let on_path_far = path[7];
    assert!(should_replan(&path, follower, Some(on_path_near), 3));
    assert!(!should_replan(&path, follower, Some(on_path_far), 3));
    assert!(!should_replan(&path, follower, Some(Cell::new(1, 0)), 3));
    assert!(!should_replan(&path, follower, None, 3));
}
