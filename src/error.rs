//! Error map and fatal engine errors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Fatal configuration failures, raised at validation time.
///
/// Rule violations are never errors at this level; they land in the
/// [`ErrorMap`]. An `EngineError` means the engine and its environment
/// disagree about the form's shape, which silent skipping would only hide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A configured field name has no resolvable element.
    #[error("no element resolvable for configured field `{0}`")]
    MissingField(String),

    /// A field's spec names an async rule whose probe slot is empty.
    #[error("async rule `{rule}` on field `{field}` has no probe installed")]
    ProbeNotConfigured {
        /// Field whose spec names the rule.
        field: String,
        /// The rule token.
        rule: &'static str,
    },
}

/// The per-field result of one validation cycle.
///
/// Holds at most one message per field; [`ErrorMap::add`] overwrites, so
/// when several rules fail for a field the last failing rule's message is
/// the one that survives. Rebuilt from scratch on every cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorMap {
    #[serde(flatten)]
    fields: HashMap<String, String>,
}

impl ErrorMap {
    /// Create an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, replacing any earlier message.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.insert(field.into(), message.into());
    }

    /// Get the message recorded for a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Remove and return the message recorded for a field.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.fields.remove(field)
    }

    /// Drop all recorded messages.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Check whether any field has a message.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with a message.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// All field names with a message.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Iterate over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Convert to a `Result`: `Ok(())` when empty, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: {} field(s) in error", self.len())
    }
}

impl std::error::Error for ErrorMap {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_overwrites_earlier_message() {
        let mut errors = ErrorMap::new();
        errors.add("email", "first");
        errors.add("email", "second");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("second"));
    }

    #[test]
    fn remove_and_clear() {
        let mut errors = ErrorMap::new();
        errors.add("a", "x");
        errors.add("b", "y");

        assert_eq!(errors.remove("a"), Some("x".to_string()));
        assert_eq!(errors.remove("a"), None);
        assert_eq!(errors.len(), 1);

        errors.clear();
        assert!(errors.is_empty());
    }

    #[test]
    fn into_result() {
        assert!(ErrorMap::new().into_result().is_ok());

        let mut errors = ErrorMap::new();
        errors.add("field", "message");
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn serializes_as_flat_map() {
        let mut errors = ErrorMap::new();
        errors.add("email", "Entrez une adresse e-mail valide.");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["email"], "Entrez une adresse e-mail valide.");
    }

    #[test]
    fn engine_error_display() {
        let err = EngineError::MissingField("email".to_string());
        assert_eq!(
            err.to_string(),
            "no element resolvable for configured field `email`"
        );
    }
}
