//! Fixpoint engine: reconciles the environment with the update rule.
//!
//! The engine re-applies the whole update rule until one application leaves
//! the environment unchanged. Termination relies on the rule being acyclic;
//! cycles are not detected. The optional iteration cap in [`EngineConfig`]
//! turns a runaway rule into [`EvalError::NonConvergence`] instead of a hang.

use crate::config::EngineConfig;
use crate::env::Environment;
use crate::equivalence::equivalent;
use crate::error::{EvalError, EvalResult};
use crate::rule::UpdateRule;
use tracing::{debug, instrument, trace, warn};

/// Outcome of one successful fixpoint round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilizeReport {
    /// Update rule applications performed, including the final one that
    /// confirmed the fixpoint. A stable input takes exactly one.
    pub applications: usize,
}

impl StabilizeReport {
    /// Applications that actually changed the environment.
    pub fn changed_rounds(&self) -> usize {
        self.applications.saturating_sub(1)
    }
}

/// Applies an update rule until the environment stops changing.
#[derive(Debug, Clone, Default)]
pub struct FixpointEngine {
    config: EngineConfig,
}

impl FixpointEngine {
    /// Create an engine, rejecting a configuration that could never converge.
    pub fn new(config: EngineConfig) -> EvalResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Stabilize `env` using the flat [`equivalent`] check.
    pub fn stabilize<R>(&self, env: &mut Environment, rule: &R) -> EvalResult<StabilizeReport>
    where
        R: UpdateRule + ?Sized,
    {
        self.stabilize_with(env, rule, equivalent)
    }

    /// Stabilize `env` with a caller-supplied equivalence check.
    ///
    /// Each round snapshots the environment, applies the rule to the current
    /// contents, stores the result in `env`, and stops once the result is
    /// equivalent to the snapshot. On error `env` keeps the last complete
    /// rule output.
    #[instrument(level = "debug", skip_all, fields(keys = env.len()))]
    pub fn stabilize_with<R, E>(
        &self,
        env: &mut Environment,
        rule: &R,
        equivalent: E,
    ) -> EvalResult<StabilizeReport>
    where
        R: UpdateRule + ?Sized,
        E: Fn(&Environment, &Environment) -> bool,
    {
        let mut applications = 0usize;
        loop {
            if let Some(max) = self.config.max_iterations {
                if applications >= max {
                    warn!(applications, "update rule did not converge");
                    return Err(EvalError::NonConvergence {
                        iterations: applications,
                    });
                }
            }

            let next = rule.update(env.clone())?;
            let prev = std::mem::replace(env, next);
            applications += 1;
            trace!(applications, keys = env.len(), "applied update rule");

            if equivalent(env, &prev) {
                debug!(applications, digest = %env.digest(), "fixpoint reached");
                return Ok(StabilizeReport { applications });
            }
        }
    }
}
