//! Depth-limited minimax with alpha-beta pruning
//!
//! Friendly maximizes, Enemy minimizes; the side to move is read from each
//! node's snapshot. Children are sorted by static evaluation before
//! recursion (best-first for the side to move), which tightens the window
//! early without changing the result.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::combat::action::JointAction;
use crate::combat::children::{generate_children, SearchNode};
use crate::combat::evaluation::Evaluator;
use crate::combat::snapshot::CombatSnapshot;
use crate::core::types::Side;

/// Counters for one root search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Interior nodes whose children were generated
    pub nodes_expanded: u64,
    /// Nodes scored by the evaluator (depth limit or no legal moves)
    pub leaves_evaluated: u64,
    /// Times the remaining siblings were skipped
    pub cutoffs: u64,
}

/// Alpha-beta search engine
#[derive(Debug, Clone, Default)]
pub struct AlphaBeta {
    evaluator: Evaluator,
    stats: SearchStats,
}

impl AlphaBeta {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            evaluator,
            stats: SearchStats::default(),
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Statistics of the most recent `best_action`/`best_child` call
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Choose Friendly's joint action, looking `depth` plies ahead
    ///
    /// Returns `None` when Friendly has no legal joint action.
    pub fn best_action(&mut self, root: &CombatSnapshot, depth: u32) -> Option<JointAction> {
        self.best_child(root, depth).map(|(node, _)| node.action)
    }

    /// Like `best_action`, also returning the chosen child and its backed-up value
    pub fn best_child(&mut self, root: &CombatSnapshot, depth: u32) -> Option<(SearchNode, f64)> {
        self.stats = SearchStats::default();
        let depth = depth.max(1);

        let root = root.clone().with_to_move(Side::Friendly);
        let children = generate_children(&root);
        if children.is_empty() {
            tracing::debug!("no legal joint action at root");
            return None;
        }
        self.stats.nodes_expanded += 1;

        let mut best: Option<(SearchNode, f64)> = None;
        for (_, child) in self.order_children(children, true) {
            let value = self.search(&child, depth - 1, f64::NEG_INFINITY, f64::INFINITY);
            // Strict comparison: the earliest child keeps ties
            if best.as_ref().map_or(true, |(_, best_value)| value > *best_value) {
                best = Some((child, value));
            }
        }

        if let Some((node, value)) = &best {
            tracing::debug!(
                action = %node.action,
                value,
                expanded = self.stats.nodes_expanded,
                leaves = self.stats.leaves_evaluated,
                cutoffs = self.stats.cutoffs,
                "search finished"
            );
        }
        best
    }

    /// Backed-up value of `node` searched `depth` plies deep within `(alpha, beta)`
    ///
    /// At depth 0, or when the side to move has no legal action, this is
    /// the static evaluation and no children are generated.
    pub fn search(&mut self, node: &SearchNode, depth: u32, mut alpha: f64, mut beta: f64) -> f64 {
        if depth == 0 {
            self.stats.leaves_evaluated += 1;
            return self.evaluator.evaluate(&node.snapshot);
        }

        let children = generate_children(&node.snapshot);
        if children.is_empty() {
            self.stats.leaves_evaluated += 1;
            return self.evaluator.evaluate(&node.snapshot);
        }
        self.stats.nodes_expanded += 1;

        let maximizing = node.snapshot.to_move().is_maximizing();
        let ordered = self.order_children(children, maximizing);

        if maximizing {
            let mut value = f64::NEG_INFINITY;
            for (score, child) in &ordered {
                value = value.max(self.child_value(*score, child, depth - 1, alpha, beta));
                alpha = alpha.max(value);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            value
        } else {
            let mut value = f64::INFINITY;
            for (score, child) in &ordered {
                value = value.min(self.child_value(*score, child, depth - 1, alpha, beta));
                beta = beta.min(value);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            value
        }
    }

    /// Recurse into a child, reusing its ordering score when it is a leaf
    fn child_value(&mut self, score: f64, child: &SearchNode, depth: u32, alpha: f64, beta: f64) -> f64 {
        if depth == 0 {
            self.stats.leaves_evaluated += 1;
            score
        } else {
            self.search(child, depth, alpha, beta)
        }
    }

    /// Sort children by static evaluation, best first for the side to move
    ///
    /// The sort is stable, so equal scores keep generation order.
    pub fn order_children(&self, children: Vec<SearchNode>, maximizing: bool) -> Vec<(f64, SearchNode)> {
        let mut scored: Vec<(f64, SearchNode)> = children
            .into_iter()
            .map(|child| (self.evaluator.evaluate(&child.snapshot), child))
            .collect();

        if maximizing {
            scored.sort_by_key(|(score, _)| Reverse(OrderedFloat(*score)));
        } else {
            scored.sort_by_key(|(score, _)| OrderedFloat(*score));
        }
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::action::UnitAction;
    use crate::combat::unit::UnitStat;
    use crate::core::types::UnitId;
    use crate::grid::{Cell, Direction, GridMap};
    use std::sync::Arc;

    fn unit(id: u32, side: Side, x: i32, y: i32, hp: i32) -> UnitStat {
        UnitStat::new(UnitId(id), side, Cell::new(x, y), hp, 10)
    }

    fn snapshot(map: GridMap, friendly: Vec<UnitStat>, enemy: Vec<UnitStat>) -> CombatSnapshot {
        CombatSnapshot::new(Arc::new(map), friendly, enemy, Side::Friendly).unwrap()
    }

    #[test]
    fn test_depth_zero_is_static_evaluation() {
        let s = snapshot(
            GridMap::new(6, 6),
            vec![unit(1, Side::Friendly, 0, 0, 100)],
            vec![unit(2, Side::Enemy, 5, 5, 100)],
        );
        let mut engine = AlphaBeta::default();
        let expected = engine.evaluator().evaluate(&s);
        let value = engine.search(&SearchNode::root(s), 0, f64::NEG_INFINITY, f64::INFINITY);
        assert_eq!(value, expected);
        assert_eq!(engine.stats().nodes_expanded, 0);
        assert_eq!(engine.stats().leaves_evaluated, 1);
    }

    #[test]
    fn test_no_children_is_terminal() {
        let s = snapshot(GridMap::new(4, 4), vec![], vec![unit(2, Side::Enemy, 3, 3, 50)]);
        let mut engine = AlphaBeta::default();
        let expected = engine.evaluator().evaluate(&s);
        let value = engine.search(&SearchNode::root(s.clone()), 4, f64::NEG_INFINITY, f64::INFINITY);
        assert_eq!(value, expected);
        assert!(engine.best_action(&s, 3).is_none());
    }

    #[test]
    fn test_steps_toward_enemy() {
        let s = snapshot(
            GridMap::new(7, 1),
            vec![unit(1, Side::Friendly, 0, 0, 100)],
            vec![unit(2, Side::Enemy, 6, 0, 100)],
        );
        let mut engine = AlphaBeta::default();
        let action = engine.best_action(&s, 1).unwrap();
        assert_eq!(action.get(UnitId(1)), Some(&UnitAction::Move(Direction::East)));
    }

    #[test]
    fn test_adjacent_unit_attacks() {
        let s = snapshot(
            GridMap::new(5, 5),
            vec![unit(1, Side::Friendly, 2, 2, 100)],
            vec![unit(2, Side::Enemy, 2, 3, 100)],
        );
        let mut engine = AlphaBeta::default();
        let action = engine.best_action(&s, 2).unwrap();
        assert_eq!(action.get(UnitId(1)), Some(&UnitAction::Attack(UnitId(2))));
    }

    #[test]
    fn test_root_is_searched_as_friendly() {
        let s = snapshot(
            GridMap::new(5, 5),
            vec![unit(1, Side::Friendly, 0, 0, 100)],
            vec![unit(2, Side::Enemy, 4, 4, 100)],
        )
        .with_to_move(Side::Enemy);
        let mut engine = AlphaBeta::default();
        let action = engine.best_action(&s, 1).unwrap();
        assert!(action.get(UnitId(1)).is_some());
        assert!(action.get(UnitId(2)).is_none());
    }

    #[test]
    fn test_order_children_directions() {
        let s = snapshot(
            GridMap::new(7, 7),
            vec![unit(1, Side::Friendly, 3, 3, 100)],
            vec![unit(2, Side::Enemy, 6, 3, 100)],
        );
        let engine = AlphaBeta::default();

        let desc = engine.order_children(generate_children(&s), true);
        assert!(desc.windows(2).all(|w| w[0].0 >= w[1].0));
        assert_eq!(desc[0].1.action.get(UnitId(1)), Some(&UnitAction::Move(Direction::East)));

        let asc = engine.order_children(generate_children(&s), false);
        assert!(asc.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn test_order_is_stable_for_ties() {
        // Enemy straight south: East and West are equally good
        let s = snapshot(
            GridMap::new(7, 7),
            vec![unit(1, Side::Friendly, 3, 0, 100)],
            vec![unit(2, Side::Enemy, 3, 6, 100)],
        );
        let engine = AlphaBeta::default();
        let ordered = engine.order_children(generate_children(&s), true);
        let moves: Vec<UnitAction> = ordered.iter().map(|(_, c)| *c.action.get(UnitId(1)).unwrap()).collect();
        assert_eq!(
            moves,
            vec![
                UnitAction::Move(Direction::South),
                UnitAction::Move(Direction::East),
                UnitAction::Move(Direction::West),
            ]
        );
    }

    #[test]
    fn test_depth_zero_root_is_treated_as_one() {
        let s = snapshot(
            GridMap::new(7, 1),
            vec![unit(1, Side::Friendly, 0, 0, 100)],
            vec![unit(2, Side::Enemy, 6, 0, 100)],
        );
        let mut engine = AlphaBeta::default();
        assert_eq!(engine.best_action(&s, 0), engine.best_action(&s, 1));
    }

    #[test]
    fn test_stats_reset_between_searches() {
        let s = snapshot(
            GridMap::new(6, 6),
            vec![unit(1, Side::Friendly, 0, 0, 100), unit(3, Side::Friendly, 0, 5, 100)],
            vec![unit(2, Side::Enemy, 5, 5, 100)],
        );
        let mut engine = AlphaBeta::default();
        engine.best_action(&s, 3);
        let first = engine.stats();
        engine.best_action(&s, 3);
        assert_eq!(engine.stats(), first);
        assert!(first.leaves_evaluated > 0);
    }
}
