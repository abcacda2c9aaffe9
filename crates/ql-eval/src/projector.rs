//! Projector: renders a stable environment onto the presentation surface.
//!
//! For every question the projector runs two independent passes:
//!
//! - **visibility**: blocks declared `VisibleWhen(key)` are shown iff the
//!   value is truthy, blocks declared `Else(key)` iff it is falsy;
//! - **content**: controls bound to `key` receive the value through
//!   [`field::write`].
//!
//! Each predicate and binding names exactly one question, so the order in
//! which questions are visited does not matter. Questions with no blocks or
//! controls (computed-only internals) are silently skipped.

use crate::env::Environment;
use crate::field;
use ql_types::{Block, Control, Surface};
use tracing::{debug, instrument, trace};

/// The surface operations the projector and event bridge need.
pub trait PresentationSurface {
    /// Blocks whose visibility predicate reads `key`.
    fn conditional_blocks_mut(&mut self, key: &str) -> Vec<&mut Block>;

    /// Controls bound to the question `name`.
    fn bound_controls_mut(&mut self, name: &str) -> Vec<&mut Control>;

    /// Look up a control by id.
    fn control(&self, id: &str) -> Option<&Control>;
}

impl PresentationSurface for Surface {
    fn conditional_blocks_mut(&mut self, key: &str) -> Vec<&mut Block> {
        self.blocks
            .iter_mut()
            .filter(|b| b.condition.key() == key)
            .collect()
    }

    fn bound_controls_mut(&mut self, name: &str) -> Vec<&mut Control> {
        self.controls.iter_mut().filter(|c| c.name == name).collect()
    }

    fn control(&self, id: &str) -> Option<&Control> {
        Surface::control(self, id)
    }
}

/// What one projection touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionReport {
    pub blocks_toggled: usize,
    pub controls_written: usize,
}

/// Project `env` onto `surface`. Never modifies the environment.
#[instrument(level = "debug", skip_all, fields(keys = env.len()))]
pub fn project<S>(env: &Environment, surface: &mut S) -> ProjectionReport
where
    S: PresentationSurface + ?Sized,
{
    let mut report = ProjectionReport::default();
    for (key, value) in env {
        let truthy = value.is_truthy();
        for block in surface.conditional_blocks_mut(key) {
            block.visible = block.condition.visible_for(truthy);
            report.blocks_toggled += 1;
        }

        for control in surface.bound_controls_mut(key) {
            field::write(control, value);
            report.controls_written += 1;
        }
        trace!(%key, %value, truthy, "projected question");
    }
    debug!(
        blocks = report.blocks_toggled,
        controls = report.controls_written,
        "projection complete"
    );
    report
}
