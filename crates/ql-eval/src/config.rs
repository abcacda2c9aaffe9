//! Fixpoint engine configuration.

use crate::error::{EvalError, EvalResult};
use serde::{Deserialize, Serialize};

/// Default cap on update rule applications per fixpoint round.
pub const DEFAULT_MAX_ITERATIONS: usize = 1024;

/// Engine configuration (JSON).
///
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum update rule applications before a round fails with
    /// `NonConvergence`. `None` lets a cyclic rule loop forever.
    pub max_iterations: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
        }
    }
}

impl EngineConfig {
    /// A configuration without an iteration cap.
    pub fn unbounded() -> Self {
        Self {
            max_iterations: None,
        }
    }

    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self {
            max_iterations: Some(max_iterations),
        }
    }

    pub fn validate(&self) -> EvalResult<()> {
        if self.max_iterations == Some(0) {
            return Err(EvalError::InvalidConfig(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> EvalResult<Self> {
        let cfg: EngineConfig =
            serde_json::from_str(json).map_err(|e| EvalError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
