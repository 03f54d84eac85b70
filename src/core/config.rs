//! Search configuration with documented constants
//!
//! The ply count is the only value the operator must supply. Everything else
//! has a tuned default and can be overridden from a TOML tuning file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::combat::evaluation::EvaluationWeights;
use crate::core::error::{Result, SkirmishError};

/// Default Chebyshev radius inside which a blocker on the held path forces a replan
pub const DEFAULT_REPLAN_RADIUS: u32 = 3;

/// Deepest search accepted from the command line
///
/// The joint action space grows as 4^units per ply, so anything past this
/// would not finish within a turn for a two-unit squad.
pub const MAX_PLIES: u32 = 12;

/// Configuration for one agent's decision making
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search depth in plies (one side's move per ply)
    ///
    /// A depth of 2 looks at our move and the enemy's reply.
    pub plies: u32,

    /// How close (Chebyshev) a blocker must be before it invalidates the held path
    ///
    /// Blockers further away are expected to have moved by the time we get there.
    #[serde(default = "default_replan_radius")]
    pub replan_radius: u32,

    /// Evaluation weights used at the search leaves
    #[serde(default)]
    pub weights: EvaluationWeights,
}

fn default_replan_radius() -> u32 {
    DEFAULT_REPLAN_RADIUS
}

/// Optional overrides read from a tuning file
///
/// The ply count is deliberately absent: it comes from the agent arguments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TuningFile {
    pub replan_radius: Option<u32>,
    pub weights: Option<EvaluationWeights>,
}

impl SearchConfig {
    /// Create a config searching `plies` deep with default tuning
    pub fn with_plies(plies: u32) -> Self {
        Self {
            plies,
            replan_radius: DEFAULT_REPLAN_RADIUS,
            weights: EvaluationWeights::default(),
        }
    }

    /// Build a config from raw agent arguments; the first argument is the ply count
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let plies = parse_plies(args.first().map(|s| s.as_ref()))?;
        Ok(Self::with_plies(plies))
    }

    /// Apply the overrides from a tuning file on disk
    pub fn with_tuning_file(self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        self.with_tuning_toml(&content)
    }

    /// Apply the overrides from TOML text
    pub fn with_tuning_toml(mut self, content: &str) -> Result<Self> {
        let tuning: TuningFile = toml::from_str(content)?;
        if let Some(radius) = tuning.replan_radius {
            self.replan_radius = radius;
        }
        if let Some(weights) = tuning.weights {
            self.weights = weights;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.plies == 0 || self.plies > MAX_PLIES {
            return Err(SkirmishError::Config(format!(
                "plies must be between 1 and {} (got {})",
                MAX_PLIES, self.plies
            )));
        }

        if !self.weights.hp_weight.is_finite() || self.weights.hp_weight < 0.0 {
            return Err(SkirmishError::Config(format!(
                "hp_weight must be finite and non-negative (got {})",
                self.weights.hp_weight
            )));
        }

        if !self.weights.proximity_weight.is_finite() || self.weights.proximity_weight < 0.0 {
            return Err(SkirmishError::Config(format!(
                "proximity_weight must be finite and non-negative (got {})",
                self.weights.proximity_weight
            )));
        }

        Ok(())
    }
}

/// Parse the ply count supplied to an agent
///
/// Missing, non-numeric and zero values are all configuration errors; callers
/// must not start an episode after one.
pub fn parse_plies(arg: Option<&str>) -> Result<u32> {
    let raw = arg.ok_or_else(|| SkirmishError::Config("you must specify the number of plies".into()))?;

    let plies: u32 = raw
        .trim()
        .parse()
        .map_err(|_| SkirmishError::Config(format!("number of plies must be numeric (got {:?})", raw)))?;

    if plies == 0 || plies > MAX_PLIES {
        return Err(SkirmishError::Config(format!(
            "plies must be between 1 and {} (got {})",
            MAX_PLIES, plies
        )));
    }

    Ok(plies)
}
