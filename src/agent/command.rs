//! Primitive commands sent back to the host

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::combat::action::{JointAction, UnitAction};
use crate::core::error::Result;
use crate::core::types::UnitId;
use crate::grid::{Cell, Direction};

/// A single host primitive for one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HostCommand {
    Move { unit: UnitId, direction: Direction },
    Attack { unit: UnitId, target: UnitId },
}

impl HostCommand {
    pub fn move_unit(unit: UnitId, direction: Direction) -> Self {
        HostCommand::Move { unit, direction }
    }

    pub fn attack(unit: UnitId, target: UnitId) -> Self {
        HostCommand::Attack { unit, target }
    }

    /// Step `unit` from `from` onto the adjacent cell `to`
    ///
    /// Fails with `InvalidDirection` unless `to` is exactly one cardinal step away.
    pub fn step_toward(unit: UnitId, from: Cell, to: Cell) -> Result<Self> {
        Ok(Self::move_unit(unit, Direction::between(from, to)?))
    }

    /// The unit this command is addressed to
    pub fn unit(&self) -> UnitId {
        match self {
            HostCommand::Move { unit, .. } | HostCommand::Attack { unit, .. } => *unit,
        }
    }
}

impl From<(UnitId, UnitAction)> for HostCommand {
    fn from((unit, action): (UnitId, UnitAction)) -> Self {
        match action {
            UnitAction::Move(direction) => HostCommand::move_unit(unit, direction),
            UnitAction::Attack(target) => HostCommand::attack(unit, target),
        }
    }
}

/// Commands for one turn, at most one per unit
pub type TurnCommands = BTreeMap<UnitId, HostCommand>;

/// Translate a searched joint action into host commands
pub fn translate_joint_action(joint: &JointAction) -> TurnCommands {
    joint
        .iter()
        .map(|(&unit, &action)| (unit, HostCommand::from((unit, action))))
        .collect()
}
