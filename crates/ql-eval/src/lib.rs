//! Questionnaire runtime evaluator.
//!
//! Keeps one session's question [`Environment`] consistent with a compiled
//! [`UpdateRule`] and projects it onto a presentation [`Surface`]:
//!
//! ```text
//! edit → Session → Environment → FixpointEngine (UpdateRule + equivalent) → project → Surface
//! ```
//!
//! [`Surface`]: ql_types::Surface

pub mod config;
pub mod env;
pub mod equivalence;
pub mod error;
pub mod field;
pub mod fixpoint;
pub mod logging;
pub mod projector;
pub mod rule;
pub mod session;

pub use config::EngineConfig;
pub use env::Environment;
pub use equivalence::equivalent;
pub use error::{EvalError, EvalResult};
pub use fixpoint::{FixpointEngine, StabilizeReport};
pub use projector::{project, PresentationSurface, ProjectionReport};
pub use rule::UpdateRule;
pub use session::{EditOutcome, Session};
