//! Flat equivalence of two environment snapshots.

use crate::env::Environment;

/// Returns `true` iff both snapshots bind the same keys to the same values.
///
/// Comparison is one level deep and goes by key lookup, so iteration order of
/// either side does not matter. Values compare with [`Value::same_as`].
///
/// [`Value::same_as`]: ql_types::Value::same_as
pub fn equivalent(a: &Environment, b: &Environment) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(name, value)| match b.get(name) {
        Some(other) => value.same_as(other),
        None => false,
    })
}
