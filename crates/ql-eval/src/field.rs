//! Field adapter: typed values in and out of a single control.

use crate::error::{EvalError, EvalResult};
use ql_types::{Control, ControlKind, Value};

/// Read the typed value an input control currently holds.
///
/// Checkboxes read as booleans, number inputs as numbers, text inputs as
/// strings. Number inputs follow numeric-input coercion: blank reads as `0`,
/// `Infinity` (optionally signed) and `0x`/`0o`/`0b` integers are accepted,
/// anything else that is not a decimal literal reads as `NaN`. Other kinds
/// are rejected.
pub fn read(control: &Control) -> EvalResult<Value> {
    match &control.kind {
        ControlKind::Checkbox => Ok(Value::Bool(control.checked)),
        ControlKind::Number => Ok(Value::Number(parse_number(&control.value))),
        ControlKind::Text => Ok(Value::String(control.value.clone())),
        other => Err(EvalError::UnsupportedControlKind(other.as_str().to_string())),
    }
}

/// Write a value into a control in the control's native representation.
///
/// A checkbox is toggled by the value's truthiness; every other kind shows
/// the value's display string.
pub fn write(control: &mut Control, value: &Value) {
    match control.kind {
        ControlKind::Checkbox => control.checked = value.is_truthy(),
        _ => control.value = value.to_display_string(),
    }
}

fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(n) = parse_radix_integer(trimmed) {
        return n;
    }
    // `f64::from_str` also takes `inf`, `infinity` and `nan` in any case;
    // a decimal literal has no letters besides the exponent marker.
    if trimmed
        .bytes()
        .any(|c| c.is_ascii_alphabetic() && c != b'e' && c != b'E')
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Unsigned `0x`, `0o` or `0b` integer literal. A prefix with no valid
/// digits reads as `NaN`.
fn parse_radix_integer(s: &str) -> Option<f64> {
    let prefix = s.get(..2)?;
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let mut n = 0.0f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => n = n * f64::from(radix) + f64::from(d),
            None => return Some(f64::NAN),
        }
    }
    Some(n)
}
