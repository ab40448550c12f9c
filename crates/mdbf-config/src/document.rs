//! The generic configuration document.

use crate::fingerprint::{Fingerprint, FingerprintError};
use serde_yaml::{Mapping, Value};

/// A parsed configuration file: a mapping from string keys to arbitrary
/// nested values.
///
/// Documents are produced fresh on every read and dropped after the reload
/// pass that consumed them; only their fingerprints outlive them.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Value,
}

impl ConfigDocument {
    /// Wraps a mapping as a document.
    pub fn new(root: Mapping) -> Self {
        Self {
            root: Value::Mapping(root),
        }
    }

    /// Builds a document from a parsed value. A null root (an empty file) is
    /// an empty document; any other non-mapping root is rejected.
    pub fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(Self::new(Mapping::new())),
            Value::Mapping(mapping) => Ok(Self::new(mapping)),
            other => Err(other),
        }
    }

    /// Top-level value under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Section handed to a cog.
    ///
    /// `None` (a cog without a dedicated section), an absent key and an
    /// explicit null all yield an empty mapping.
    pub fn section(&self, key: Option<&str>) -> Value {
        match key.and_then(|k| self.get(k)) {
            None | Some(Value::Null) => empty_section(),
            Some(value) => value.clone(),
        }
    }

    /// The whole document as a value.
    pub const fn as_value(&self) -> &Value {
        &self.root
    }

    /// Fingerprint of the whole document.
    pub fn fingerprint(&self) -> Result<Fingerprint, FingerprintError> {
        Fingerprint::of(&self.root)
    }
}

/// The section given to cogs that have no configuration.
pub fn empty_section() -> Value {
    Value::Mapping(Mapping::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(s: &str) -> ConfigDocument {
        ConfigDocument::from_value(serde_yaml::from_str(s).unwrap()).unwrap()
    }

    #[test]
    fn test_section_lookup() {
        let document = doc("filter:\n  banned_words: [x]\nempty:\n");
        let filter = document.section(Some("filter"));
        assert_eq!(filter["banned_words"][0], Value::String("x".into()));
        assert_eq!(document.section(Some("empty")), empty_section());
        assert_eq!(document.section(Some("absent")), empty_section());
        assert_eq!(document.section(None), empty_section());
    }

    #[test]
    fn test_scalar_section_is_passed_through() {
        let document = doc("greeting: hello\n");
        assert_eq!(document.section(Some("greeting")), Value::String("hello".into()));
    }

    #[test]
    fn test_root_must_be_mapping() {
        assert!(ConfigDocument::from_value(Value::Null).is_ok());
        assert!(ConfigDocument::from_value(serde_yaml::from_str("[1, 2]").unwrap()).is_err());
    }

    #[test]
    fn test_document_fingerprint_matches_value_fingerprint() {
        let document = doc("admins: [1]\n");
        assert_eq!(
            document.fingerprint().unwrap(),
            Fingerprint::of(document.as_value()).unwrap()
        );
    }
}
