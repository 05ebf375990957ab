//! Asynchronous availability probes.
//!
//! The engine never performs remote lookups itself; the collaborator
//! supplies a probe per slot and owns the transport.

use crate::parser::Rule;
use async_trait::async_trait;
use std::sync::Arc;

/// An asynchronous check answering "is this value acceptable".
///
/// Implementations typically query a backend for availability or
/// uniqueness. A probe that never resolves stalls the whole validation
/// cycle, so implementations should bound their own latency (e.g. with
/// `tokio::time::timeout`).
#[async_trait]
pub trait AvailabilityProbe: Send + Sync {
    /// Answer whether `value` is acceptable.
    async fn check(&self, value: &str) -> Result<bool, String>;
}

/// The three built-in probe slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    /// Backs the `username_available` rule.
    UsernameAvailable,
    /// Backs the `email_available` rule.
    EmailAvailable,
    /// Backs the `unique` rule.
    Unique,
}

impl ProbeKind {
    /// The slot a rule resolves to, if it is probe-backed.
    pub fn for_rule(rule: &Rule) -> Option<Self> {
        match rule {
            Rule::UsernameAvailable => Some(Self::UsernameAvailable),
            Rule::EmailAvailable => Some(Self::EmailAvailable),
            Rule::Unique => Some(Self::Unique),
            _ => None,
        }
    }

    /// The rule token this slot backs.
    pub fn rule_name(&self) -> &'static str {
        match self {
            Self::UsernameAvailable => "username_available",
            Self::EmailAvailable => "email_available",
            Self::Unique => "unique",
        }
    }

    /// The message recorded when the probe answers "not acceptable".
    pub fn message(&self) -> &'static str {
        match self {
            Self::UsernameAvailable => "Ce nom d’utilisateur est déjà pris.",
            Self::EmailAvailable => "Cet e-mail est déjà utilisé.",
            Self::Unique => "Cette valeur est déjà utilisée.",
        }
    }
}

/// The probe installed in each slot, if any.
#[derive(Clone, Default)]
pub struct ProbeSet {
    username_available: Option<Arc<dyn AvailabilityProbe>>,
    email_available: Option<Arc<dyn AvailabilityProbe>>,
    unique: Option<Arc<dyn AvailabilityProbe>>,
}

impl ProbeSet {
    /// Create an empty probe set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a probe into a slot, replacing any earlier one.
    pub fn install(&mut self, kind: ProbeKind, probe: Arc<dyn AvailabilityProbe>) {
        match kind {
            ProbeKind::UsernameAvailable => self.username_available = Some(probe),
            ProbeKind::EmailAvailable => self.email_available = Some(probe),
            ProbeKind::Unique => self.unique = Some(probe),
        }
    }

    /// Get the probe installed in a slot.
    pub fn get(&self, kind: ProbeKind) -> Option<&Arc<dyn AvailabilityProbe>> {
        match kind {
            ProbeKind::UsernameAvailable => self.username_available.as_ref(),
            ProbeKind::EmailAvailable => self.email_available.as_ref(),
            ProbeKind::Unique => self.unique.as_ref(),
        }
    }
}

impl std::fmt::Debug for ProbeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeSet")
            .field("username_available", &self.username_available.is_some())
            .field("email_available", &self.email_available.is_some())
            .field("unique", &self.unique.is_some())
            .finish()
    }
}
