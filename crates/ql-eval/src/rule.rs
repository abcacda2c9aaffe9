//! The update rule seam.
//!
//! A questionnaire compiler produces one update rule per questionnaire. It
//! recomputes every derived question and conditional from the current
//! environment. The runtime treats it as a black box.

use crate::env::Environment;
use crate::error::EvalResult;

/// Recomputes all derived questions from the current environment.
///
/// The rule may overwrite derived keys in the environment it is given and
/// hand it back, or build a fresh one. Applied to a stable environment it
/// must return an equivalent one.
///
/// Any `Fn(Environment) -> Environment` closure is an update rule:
///
/// ```
/// use ql_eval::{Environment, UpdateRule};
/// use ql_types::Value;
///
/// let rule = |mut env: Environment| {
///     let foo = env.get("foo").cloned().unwrap_or(Value::Number(0.0));
///     env.set("foo_c", foo);
///     env
/// };
/// let mut env = Environment::new();
/// env.set("foo", 5);
/// let next = rule.update(env).unwrap();
/// assert_eq!(next.get("foo_c"), Some(&Value::Number(5.0)));
/// ```
pub trait UpdateRule {
    fn update(&self, env: Environment) -> EvalResult<Environment>;
}

impl<F> UpdateRule for F
where
    F: Fn(Environment) -> Environment,
{
    fn update(&self, env: Environment) -> EvalResult<Environment> {
        Ok(self(env))
    }
}
