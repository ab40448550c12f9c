//! Order-independent configuration fingerprints.
//!
//! A document is first canonicalized to JSON with every mapping's keys in
//! sorted order, then hashed with SHA-256. Two documents produce the same
//! fingerprint exactly when they are structurally equal after key sorting.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_yaml::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A value that has no canonical JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error generating config hash at '{path}': {reason}")]
pub struct FingerprintError {
    /// Dotted path of the offending value (`$` is the root).
    pub path: String,
    /// What made the value unserializable.
    pub reason: String,
}

impl FingerprintError {
    fn new(path: &str, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// SHA-256 digest of a canonicalized configuration value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprints any configuration value (a whole document or a section).
    pub fn of(value: &Value) -> Result<Self, FingerprintError> {
        let canonical = canonical_json(value)?;
        Ok(Self::of_canonical(&canonical))
    }

    /// Raw digest bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    fn of_canonical(canonical: &str) -> Self {
        Self(Sha256::digest(canonical.as_bytes()).into())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&STANDARD.encode(self.0))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

/// Renders `value` as compact JSON with keys sorted at every level.
pub fn canonical_json(value: &Value) -> Result<String, FingerprintError> {
    let json = to_json(value, "$")?;
    serde_json::to_string(&json).map_err(|e| FingerprintError::new("$", e.to_string()))
}

fn to_json(value: &Value, path: &str) -> Result<serde_json::Value, FingerprintError> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                serde_json::Value::from(u)
            } else if let Some(i) = n.as_i64() {
                serde_json::Value::from(i)
            } else {
                let f = n
                    .as_f64()
                    .ok_or_else(|| FingerprintError::new(path, "unrepresentable number"))?;
                serde_json::Number::from_f64(f)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| FingerprintError::new(path, format!("non-finite float {f}")))?
            }
        }
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| to_json(item, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()?
            .into(),
        Value::Mapping(mapping) => {
            let mut sorted = BTreeMap::new();
            for (key, item) in mapping {
                let Value::String(key) = key else {
                    return Err(FingerprintError::new(
                        path,
                        format!("mapping key {key:?} is not a string"),
                    ));
                };
                sorted.insert(key.clone(), to_json(item, &format!("{path}.{key}"))?);
            }
            // Insert in sorted order so the output is sorted even when
            // serde_json keeps insertion order.
            let mut object = serde_json::Map::with_capacity(sorted.len());
            object.extend(sorted);
            serde_json::Value::Object(object)
        }
        Value::Tagged(tagged) => {
            return Err(FingerprintError::new(
                path,
                format!("tagged value '{}' is not supported", tagged.tag),
            ));
        }
    })
}
