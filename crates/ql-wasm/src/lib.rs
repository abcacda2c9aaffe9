//! Questionnaire runtime as a WASM module for browser environments.
//!
//! This crate exposes a [`ql_eval::Session`] via `wasm-bindgen`. The page
//! keeps its DOM; the runtime keeps a mirror of the questionnaire's blocks
//! and controls and hands back the projected state as JSON after every
//! round.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { QuestionnaireSession } from 'ql-wasm';
//!
//! await init();
//!
//! const session = new QuestionnaireSession(
//!   JSON.stringify({ foo: 0, bar: false }),
//!   JSON.stringify(surface),
//!   (q) => { q.foo_c = q.foo; q.bar_c = !q.bar; return q; },
//!   null,
//! );
//! applySurface(JSON.parse(session.start()));
//!
//! input.addEventListener('input', (e) => {
//!   const t = e.target;
//!   applySurface(JSON.parse(session.input(t.id, t.checked, t.value)));
//! });
//! ```

mod rule;

use ql_eval::{EngineConfig, Environment, Session};
use ql_types::Surface;
use wasm_bindgen::prelude::*;

pub use rule::JsUpdateRule;

/// One questionnaire session driven from JavaScript.
#[wasm_bindgen]
pub struct QuestionnaireSession {
    inner: Session<JsUpdateRule, Surface>,
}

#[wasm_bindgen]
impl QuestionnaireSession {
    /// Build a session.
    ///
    /// - `initial_env`: JSON object of question name → default value
    /// - `surface`: JSON `{ blocks: [...], controls: [...] }`
    /// - `update`: the compiled update function, called with a plain object
    ///   and expected to return one
    /// - `config`: optional engine configuration JSON
    #[wasm_bindgen(constructor)]
    pub fn new(
        initial_env: &str,
        surface: &str,
        update: js_sys::Function,
        config: Option<String>,
    ) -> Result<QuestionnaireSession, JsError> {
        let env: Environment = serde_json::from_str(initial_env)?;
        let surface: Surface = serde_json::from_str(surface)?;
        let config = match config {
            Some(json) => EngineConfig::from_json(&json)?,
            None => EngineConfig::default(),
        };
        let inner = Session::with_config(env, JsUpdateRule::new(update), surface, config)?;
        Ok(Self { inner })
    }

    /// Settle the initial environment and return the projected surface.
    pub fn start(&mut self) -> Result<String, JsError> {
        self.inner.start()?;
        self.surface()
    }

    /// Mirror an edit of control `control_id` and run a round.
    ///
    /// Returns the projected surface JSON.
    pub fn input(
        &mut self,
        control_id: &str,
        checked: bool,
        value: &str,
    ) -> Result<String, JsError> {
        if !self.inner.surface_mut().sync_input(control_id, checked, value) {
            return Err(JsError::new(&format!("unknown control: {control_id}")));
        }
        self.inner.handle_edit(control_id)?;
        self.surface()
    }

    /// Current environment as a JSON object.
    pub fn environment(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.inner.environment())?)
    }

    /// Current surface state as JSON.
    pub fn surface(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.inner.surface())?)
    }

    /// Digest of the current environment.
    pub fn digest(&self) -> String {
        self.inner.environment().digest()
    }
}

/// Return the runtime version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
