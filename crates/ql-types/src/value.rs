use serde::{Deserialize, Serialize};
use std::fmt;

/// The value of a single question.
///
/// Values are flat scalars. Nothing in the runtime nests them, which is what
/// lets environment comparison stay one level deep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    String(String),
}

impl Value {
    /// Truthiness used for conditional visibility and checkbox writes.
    ///
    /// `0`, `NaN` and `""` are falsy. Booleans are used as-is.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
        }
    }

    /// Scalar equality for environment comparison.
    ///
    /// Unlike `==`, two `NaN` numbers are the same value here: an environment
    /// holding `NaN` must still compare equal to its own snapshot.
    pub fn same_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text a display control shows for this value.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Number(n) => {
                if n.is_nan() {
                    "NaN".to_string()
                } else if n.is_infinite() {
                    let sign = if *n < 0.0 { "-" } else { "" };
                    format!("{sign}Infinity")
                } else if *n != 0.0 && (n.abs() >= 1e21 || n.abs() < 1e-6) {
                    exponent_form(*n)
                } else if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Self::String(s) => s.clone(),
            Self::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        }
    }
}

/// Scientific notation with an explicit exponent sign, e.g. `1e+21`, `1.5e-7`.
fn exponent_form(n: f64) -> String {
    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => formatted,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}
