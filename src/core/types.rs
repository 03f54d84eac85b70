//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for units, as assigned by the host simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub u32);

impl UnitId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the skirmish a unit fights for
///
/// Friendly is always the maximizing side in search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Friendly,
    Enemy,
}

impl Side {
    /// The side that moves after this one
    pub fn opponent(&self) -> Side {
        match self {
            Side::Friendly => Side::Enemy,
            Side::Enemy => Side::Friendly,
        }
    }

    /// True for the side search tries to maximize
    pub fn is_maximizing(&self) -> bool {
        matches!(self, Side::Friendly)
    }
}

/// Turn counter reported by the host
pub type Turn = u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_id_equality() {
        assert_eq!(UnitId(1), UnitId::new(1));
        assert_ne!(UnitId(1), UnitId(2));
    }

    #[test]
    fn test_unit_id_ordering() {
        let mut ids = vec![UnitId(3), UnitId(1), UnitId(2)];
        ids.sort();
        assert_eq!(ids, vec![UnitId(1), UnitId(2), UnitId(3)]);
    }

    #[test]
    fn test_side_opponent_alternates() {
        assert_eq!(Side::Friendly.opponent(), Side::Enemy);
        assert_eq!(Side::Enemy.opponent(), Side::Friendly);
        assert_eq!(Side::Friendly.opponent().opponent(), Side::Friendly);
    }

    #[test]
    fn test_only_friendly_maximizes() {
        assert!(Side::Friendly.is_maximizing());
        assert!(!Side::Enemy.is_maximizing());
    }

    #[test]
    fn test_side_serializes_lowercase() {
        let json = serde_json::to_string(&Side::Enemy).unwrap();
        assert_eq!(json, "\"enemy\"");
    }
}
