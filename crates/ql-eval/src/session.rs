//! Session: the event bridge for one questionnaire.
//!
//! A session owns the environment, the update rule, and the presentation
//! surface. Every edit runs the same synchronous round:
//!
//! 1. read the edited control through the field adapter
//! 2. store the value under the control's bound name
//! 3. stabilize the environment with the fixpoint engine
//! 4. project the stable environment onto the surface
//!
//! Any error aborts the round. Reading happens before the environment is
//! touched, and projection only runs after a successful fixpoint.

use crate::config::EngineConfig;
use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::field;
use crate::fixpoint::{FixpointEngine, StabilizeReport};
use crate::projector::{project, PresentationSurface, ProjectionReport};
use crate::rule::UpdateRule;
use ql_types::Value;
use tracing::{debug, info, instrument};

/// The result of handling an edit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The control is not a question input; nothing changed.
    Ignored,
    /// The edit was stored, stabilized, and projected.
    Applied {
        stabilize: StabilizeReport,
        projection: ProjectionReport,
    },
}

/// Runtime state of one active questionnaire.
pub struct Session<R, S> {
    env: Environment,
    rule: R,
    surface: S,
    engine: FixpointEngine,
}

impl<R, S> Session<R, S>
where
    R: UpdateRule,
    S: PresentationSurface,
{
    /// Create a session with the default engine configuration.
    pub fn new(initial: Environment, rule: R, surface: S) -> Self {
        Self {
            env: initial,
            rule,
            surface,
            engine: FixpointEngine::default(),
        }
    }

    /// Create a session with an explicit engine configuration.
    pub fn with_config(
        initial: Environment,
        rule: R,
        surface: S,
        config: EngineConfig,
    ) -> EvalResult<Self> {
        Ok(Self {
            env: initial,
            rule,
            surface,
            engine: FixpointEngine::new(config)?,
        })
    }

    // ══════════════════════════════════════════════════════════════════════
    // Accessors
    // ══════════════════════════════════════════════════════════════════════

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for hosts mirroring native control state.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    // ══════════════════════════════════════════════════════════════════════
    // Event handling
    // ══════════════════════════════════════════════════════════════════════

    /// Session setup: settle every computed question and conditional from
    /// the initial environment, then project.
    #[instrument(level = "debug", skip_all)]
    pub fn start(&mut self) -> EvalResult<(StabilizeReport, ProjectionReport)> {
        let stabilize = self.engine.stabilize(&mut self.env, &self.rule)?;
        let projection = project(&self.env, &mut self.surface);
        info!(
            keys = self.env.len(),
            applications = stabilize.applications,
            "session started"
        );
        Ok((stabilize, projection))
    }

    /// Handle an edit of the control with this id.
    #[instrument(level = "debug", skip(self))]
    pub fn handle_edit(&mut self, control_id: &str) -> EvalResult<EditOutcome> {
        let control = self
            .surface
            .control(control_id)
            .ok_or_else(|| EvalError::UnknownControl(control_id.to_string()))?;
        if !control.question {
            debug!("control is not a question input, ignoring");
            return Ok(EditOutcome::Ignored);
        }
        let value = field::read(control)?;
        let name = control.name.clone();
        self.apply_edit(name, value)
    }

    /// Store an already-read value under `name` and run the round.
    pub fn apply_edit(&mut self, name: impl Into<String>, value: Value) -> EvalResult<EditOutcome> {
        let name = name.into();
        debug!(%name, %value, "applying edit");
        self.env.set(name, value);
        let stabilize = self.engine.stabilize(&mut self.env, &self.rule)?;
        let projection = project(&self.env, &mut self.surface);
        Ok(EditOutcome::Applied {
            stabilize,
            projection,
        })
    }
}
