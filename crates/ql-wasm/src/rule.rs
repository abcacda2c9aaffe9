//! Update rule backed by a JavaScript function.

use ql_eval::{Environment, EvalError, EvalResult, UpdateRule};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::JsValue;

/// Calls a compiled JavaScript `update(questions)` function.
///
/// The environment is passed as a plain object; the function may mutate it
/// and return it or return a new object.
pub struct JsUpdateRule {
    function: js_sys::Function,
}

impl JsUpdateRule {
    pub fn new(function: js_sys::Function) -> Self {
        Self { function }
    }
}

impl UpdateRule for JsUpdateRule {
    fn update(&self, env: Environment) -> EvalResult<Environment> {
        let arg = env
            .serialize(&Serializer::json_compatible())
            .map_err(|e| EvalError::UpdateRule(e.to_string()))?;
        let result = self
            .function
            .call1(&JsValue::NULL, &arg)
            .map_err(|e| EvalError::UpdateRule(format!("{e:?}")))?;
        serde_wasm_bindgen::from_value(result).map_err(|e| EvalError::UpdateRule(e.to_string()))
    }
}
