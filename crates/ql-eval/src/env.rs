//! Question environment for one questionnaire session.

use ql_types::Value;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Mapping from question name to its current value.
///
/// Exactly one environment exists per session. It is owned by the
/// [`Session`](crate::Session) and lent to the fixpoint engine and projector.
/// Keys are chosen by the questionnaire compiler; the runtime adds or drops
/// keys only through the update rule's result or an edited control's name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    bindings: BTreeMap<String, Value>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Look up a question's value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Insert or overwrite a question's value, returning the previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.bindings.insert(name.into(), value.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.bindings.iter()
    }

    /// SHA-256 of the environment's canonical form, as lowercase hex.
    ///
    /// Keys are hashed in sorted order and every `NaN` hashes alike, so two
    /// equivalent environments always share a digest.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for (name, value) in &self.bindings {
            hasher.update((name.len() as u64).to_le_bytes());
            hasher.update(name.as_bytes());
            match value {
                Value::Bool(b) => {
                    hasher.update([0u8]);
                    hasher.update([u8::from(*b)]);
                }
                Value::Number(n) => {
                    hasher.update([1u8]);
                    let bits = if n.is_nan() {
                        f64::NAN.to_bits()
                    } else if *n == 0.0 {
                        0.0f64.to_bits()
                    } else {
                        n.to_bits()
                    };
                    hasher.update(bits.to_le_bytes());
                }
                Value::String(s) => {
                    hasher.update([2u8]);
                    hasher.update((s.len() as u64).to_le_bytes());
                    hasher.update(s.as_bytes());
                }
            }
        }
        hasher
            .finalize()
            .iter()
            .fold(String::with_capacity(64), |mut out, byte| {
                let _ = write!(out, "{byte:02x}");
                out
            })
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            bindings: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Environment {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}
