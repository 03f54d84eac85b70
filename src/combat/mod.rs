//! Combat state model for adversarial search
//!
//! Snapshots of both squads, legal joint action generation, successor
//! construction and leaf evaluation. Snapshots are value-like; children own
//! their unit lists and share the terrain.

pub mod action;
pub mod children;
pub mod evaluation;
pub mod snapshot;
pub mod unit;

pub use action::{JointAction, UnitAction};
pub use children::{apply_joint_action, generate_children, legal_actions, SearchNode};
pub use evaluation::{EvaluationBreakdown, EvaluationWeights, Evaluator};
pub use snapshot::CombatSnapshot;
pub use unit::{UnitKind, UnitStat};
