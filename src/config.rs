//! Engine configuration.
//!
//! Everything the engine needs is passed explicitly at construction: the
//! field list, custom validators, probes, and per-field message overrides.
//! Only values and rule specs stay with the environment, read fresh each
//! cycle.

use crate::rules::{AvailabilityProbe, ProbeKind, ProbeSet};
use std::collections::HashMap;
use std::sync::Arc;

/// A caller-supplied synchronous check: returns a message on failure.
pub type CustomValidator = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Static configuration of a [`ValidationEngine`](crate::ValidationEngine).
pub struct EngineConfig {
    pub(crate) fields: Vec<String>,
    pub(crate) custom_validators: HashMap<String, Arc<CustomValidator>>,
    pub(crate) probes: ProbeSet,
    pub(crate) custom_messages: HashMap<String, String>,
}

impl EngineConfig {
    /// Start building a configuration for the given fields.
    ///
    /// Field order is significant: fields validate in this order, and the
    /// first errored field in this order receives focus.
    pub fn builder<I, S>(fields: I) -> EngineConfigBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EngineConfigBuilder::new(fields)
    }

    /// The configured field names, in validation order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl std::fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineConfig")
            .field("fields", &self.fields)
            .field(
                "custom_validators",
                &self.custom_validators.keys().collect::<Vec<_>>(),
            )
            .field("probes", &self.probes)
            .field("custom_messages", &self.custom_messages)
            .finish()
    }
}

/// Builder for [`EngineConfig`].
pub struct EngineConfigBuilder {
    fields: Vec<String>,
    custom_validators: HashMap<String, Arc<CustomValidator>>,
    probes: ProbeSet,
    custom_messages: HashMap<String, String>,
}

impl EngineConfigBuilder {
    /// Create a builder with the given field list.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            custom_validators: HashMap::new(),
            probes: ProbeSet::new(),
            custom_messages: HashMap::new(),
        }
    }

    /// Register a custom validator for a field.
    ///
    /// Runs after the field's built-in rules; a returned message replaces
    /// any built-in error for the field.
    pub fn custom_validator(
        mut self,
        field: impl Into<String>,
        check: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.custom_validators.insert(field.into(), Arc::new(check));
        self
    }

    /// Install a probe into one of the async rule slots.
    pub fn probe(mut self, kind: ProbeKind, probe: impl AvailabilityProbe + 'static) -> Self {
        self.probes.install(kind, Arc::new(probe));
        self
    }

    /// Install a probe from an `Arc`.
    pub fn probe_arc(mut self, kind: ProbeKind, probe: Arc<dyn AvailabilityProbe>) -> Self {
        self.probes.install(kind, probe);
        self
    }

    /// Override the displayed message for a field.
    ///
    /// Applied at render time only; the error map keeps the rule's own
    /// message.
    pub fn custom_message(
        mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.custom_messages.insert(field.into(), message.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> EngineConfig {
        EngineConfig {
            fields: self.fields,
            custom_validators: self.custom_validators,
            probes: self.probes,
            custom_messages: self.custom_messages,
        }
    }
}
