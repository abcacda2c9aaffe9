//! Runtime error types for the questionnaire evaluator.

use thiserror::Error;

/// Errors that abort processing of the current edit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The field adapter has no mapping for this control kind.
    #[error("unsupported control kind: {0}")]
    UnsupportedControlKind(String),

    /// The update rule did not reach a fixpoint within the configured cap.
    #[error("no fixpoint reached after {iterations} update rule applications")]
    NonConvergence { iterations: usize },

    /// A host-supplied update rule failed.
    #[error("update rule failed: {0}")]
    UpdateRule(String),

    /// An edit named a control that is not on the surface.
    #[error("unknown control: {0}")]
    UnknownControl(String),

    /// Engine configuration could not be parsed or is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
