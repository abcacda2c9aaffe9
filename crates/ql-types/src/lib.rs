//! Shared types for the questionnaire runtime.
//!
//! This crate defines the scalar [`Value`] stored per question and the
//! in-memory presentation model ([`Surface`], [`Block`], [`Control`]) that
//! the runtime projects onto.

mod surface;
mod value;

pub use surface::{Block, Condition, Control, ControlKind, Surface};
pub use value::Value;
