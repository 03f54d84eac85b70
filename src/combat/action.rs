//! Abstract unit actions produced by search

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::UnitId;
use crate::grid::Direction;

/// One unit's action for a single ply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitAction {
    Move(Direction),
    Attack(UnitId),
}

/// Actions for every live unit of the side to move
///
/// Ordered by unit id so iteration and serialization are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointAction {
    actions: BTreeMap<UnitId, UnitAction>,
}

impl JointAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, unit: UnitId, action: UnitAction) {
        self.actions.insert(unit, action);
    }

    pub fn get(&self, unit: UnitId) -> Option<&UnitAction> {
        self.actions.get(&unit)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UnitId, &UnitAction)> {
        self.actions.iter()
    }
}

impl FromIterator<(UnitId, UnitAction)> for JointAction {
    fn from_iter<I: IntoIterator<Item = (UnitId, UnitAction)>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for JointAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.actions.is_empty() {
            return write!(f, "(none)");
        }
        let parts: Vec<String> = self
            .actions
            .iter()
            .map(|(id, action)| match action {
                UnitAction::Move(d) => format!("{} move {:?}", id, d),
                UnitAction::Attack(t) => format!("{} attack {}", id, t),
            })
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
