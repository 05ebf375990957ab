//! The validation engine.
//!
//! Owns the field list, the custom-validator registry, the probe set, and
//! the error map. One [`ValidationEngine::run`] call drives a full cycle:
//! synchronous evaluation, then the asynchronous probe fan-out, then either
//! acceptance or rendered rejection.

use crate::config::EngineConfig;
use crate::env::{FormEnvironment, Notification};
use crate::error::{EngineError, ErrorMap};
use crate::parser::{parse_rules, Rule};
use crate::rules::{sync_rules, AvailabilityProbe, ProbeKind};
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Where the engine is in its validation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No cycle in progress.
    Idle,
    /// Synchronous evaluation in progress.
    ValidatingSync,
    /// Asynchronous probes in flight.
    ValidatingAsync,
    /// Last cycle passed; the collaborator may proceed with submission.
    Accepted,
    /// Last cycle failed; errors are rendered.
    Rejected,
}

/// Result of a full validation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every check passed.
    Accepted,
    /// At least one check failed; errors are rendered and the first
    /// errored field holds focus.
    Rejected,
}

/// The rule-evaluation and orchestration engine.
///
/// The engine holds no reference to the environment; each operation
/// borrows one, so a single engine can validate against different
/// environments (the `&mut self` receiver rules out overlapping cycles).
pub struct ValidationEngine {
    config: EngineConfig,
    errors: ErrorMap,
    state: EngineState,
}

impl ValidationEngine {
    /// Create an engine from its configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            errors: ErrorMap::new(),
            state: EngineState::Idle,
        }
    }

    /// The error map from the most recent evaluation.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Register a custom validator for a field, replacing any earlier one.
    ///
    /// The validator persists across validation runs.
    pub fn add_custom_validation(
        &mut self,
        field: impl Into<String>,
        check: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) {
        self.config
            .custom_validators
            .insert(field.into(), Arc::new(check));
    }

    /// Install a probe into one of the async rule slots.
    pub fn install_probe(&mut self, kind: ProbeKind, probe: Arc<dyn AvailabilityProbe>) {
        self.config.probes.install(kind, probe);
    }

    /// Run synchronous validation over every configured field.
    ///
    /// Rebuilds the error map from scratch (readable via [`errors`]) and
    /// returns `Ok(true)` iff it came out empty. Emits `BeforeValidate`
    /// first, then `AfterValidate` or `OnError` depending on the result.
    ///
    /// [`errors`]: Self::errors
    pub fn validate_sync<E: FormEnvironment>(
        &mut self,
        env: &mut E,
    ) -> Result<bool, EngineError> {
        env.notify(Notification::BeforeValidate);
        self.errors.clear();

        for field in &self.config.fields {
            let handle = env
                .lookup_field(field)
                .ok_or_else(|| EngineError::MissingField(field.clone()))?;
            let value = env.read_value(&handle);
            let mut rules = parse_rules(&env.rule_spec(&handle));
            if self.config.custom_validators.contains_key(field.as_str()) {
                // Custom validators evaluate last; the overwrite policy
                // gives their message precedence.
                rules.push(Rule::Custom {
                    name: field.clone(),
                });
            }

            // The last failing rule's message wins.
            let mut failure = None;
            for rule in &rules {
                if let Some(message) = self.eval_sync(rule, &value) {
                    failure = Some(message);
                }
            }
            if let Some(message) = failure {
                self.errors.add(field.clone(), message);
            }
        }

        if self.errors.is_empty() {
            env.notify(Notification::AfterValidate);
            Ok(true)
        } else {
            env.notify(Notification::OnError(&self.errors));
            Ok(false)
        }
    }

    fn eval_sync(&self, rule: &Rule, value: &str) -> Option<String> {
        match rule {
            Rule::Required => sync_rules::required(value),
            Rule::MinLength { n } => sync_rules::min_length(*n, value),
            Rule::MaxLength { n } => sync_rules::max_length(*n, value),
            Rule::Email => sync_rules::email(value),
            Rule::Url => sync_rules::url(value),
            Rule::Numeric => sync_rules::numeric(value),
            Rule::Phone => sync_rules::phone(value),
            Rule::PostalCode { country } => sync_rules::postal_code(country, value),
            Rule::PasswordStrength => sync_rules::password_strength(value),
            // Probe-backed rules run in the async phase.
            Rule::UsernameAvailable | Rule::EmailAvailable | Rule::Unique => None,
            Rule::Custom { name } => self
                .config
                .custom_validators
                .get(name.as_str())
                .and_then(|check| check(value)),
        }
    }

    /// Run asynchronous validation over every configured field.
    ///
    /// Every probe-backed rule across all fields launches concurrently;
    /// the call resolves once all probes have. Failures merge into the
    /// existing error map (a probe answering "acceptable" never clears a
    /// synchronous error). Returns `Ok(true)` iff no probe recorded an
    /// error this phase.
    pub async fn validate_async<E: FormEnvironment>(
        &mut self,
        env: &mut E,
    ) -> Result<bool, EngineError> {
        let mut launches = Vec::new();
        for field in &self.config.fields {
            let handle = env
                .lookup_field(field)
                .ok_or_else(|| EngineError::MissingField(field.clone()))?;
            let value = env.read_value(&handle);
            for rule in parse_rules(&env.rule_spec(&handle)) {
                let Some(kind) = ProbeKind::for_rule(&rule) else {
                    continue;
                };
                let probe = self
                    .config
                    .probes
                    .get(kind)
                    .ok_or_else(|| EngineError::ProbeNotConfigured {
                        field: field.clone(),
                        rule: kind.rule_name(),
                    })?
                    .clone();
                let field = field.clone();
                let value = value.clone();
                launches.push(async move {
                    let acceptable = match probe.check(&value).await {
                        Ok(acceptable) => acceptable,
                        Err(reason) => {
                            // A probe error counts as unavailable.
                            warn!(field = %field, rule = kind.rule_name(), %reason,
                                "probe failed, treating value as unavailable");
                            false
                        }
                    };
                    (field, kind, acceptable)
                });
            }
        }

        // Results land in launch order (field order, then rule order), so
        // the overwrite policy stays deterministic.
        let mut clean = true;
        for (field, kind, acceptable) in join_all(launches).await {
            if !acceptable {
                self.errors.add(field, kind.message());
                clean = false;
            }
        }
        Ok(clean)
    }

    /// Run one full validation cycle against the environment.
    ///
    /// Clears prior errors and rendered state, runs the synchronous phase,
    /// then the asynchronous phase unconditionally (so one pass surfaces
    /// errors of every rule kind), and finally either accepts or renders
    /// the merged errors and focuses the first errored field in field-list
    /// order.
    pub async fn run<E: FormEnvironment>(
        &mut self,
        env: &mut E,
    ) -> Result<Outcome, EngineError> {
        debug!(fields = self.config.fields.len(), "validation cycle started");
        self.state = EngineState::ValidatingSync;
        self.clear_rendered(env);
        self.validate_sync(env)?;

        self.state = EngineState::ValidatingAsync;
        self.validate_async(env).await?;

        if self.errors.is_empty() {
            self.state = EngineState::Accepted;
            debug!("validation cycle accepted");
            Ok(Outcome::Accepted)
        } else {
            self.render_errors(env);
            self.state = EngineState::Rejected;
            debug!(errors = self.errors.len(), "validation cycle rejected");
            Ok(Outcome::Rejected)
        }
    }

    /// Clear the error map and rendered state without re-validating.
    pub fn reset<E: FormEnvironment>(&mut self, env: &mut E) {
        self.clear_rendered(env);
        self.errors.clear();
        self.state = EngineState::Idle;
    }

    /// Clear one field's error, mark, and message.
    pub fn clear_field<E: FormEnvironment>(&mut self, env: &mut E, field: &str) {
        if let Some(handle) = env.lookup_field(field) {
            env.clear_errored(&handle);
            env.clear_message(&handle);
        }
        self.errors.remove(field);
    }

    fn clear_rendered<E: FormEnvironment>(&self, env: &mut E) {
        for field in &self.config.fields {
            if let Some(handle) = env.lookup_field(field) {
                env.clear_errored(&handle);
                env.clear_message(&handle);
            }
        }
    }

    fn render_errors<E: FormEnvironment>(&self, env: &mut E) {
        let mut first_errored = None;
        for field in &self.config.fields {
            let Some(message) = self.errors.get(field) else {
                continue;
            };
            let Some(handle) = env.lookup_field(field) else {
                continue;
            };
            env.mark_errored(&handle);
            // A configured per-field message replaces the rule's own at
            // render time only.
            let text = self
                .config
                .custom_messages
                .get(field.as_str())
                .map(String::as_str)
                .unwrap_or(message);
            env.show_message(&handle, text);
            if first_errored.is_none() {
                first_errored = Some(handle);
            }
        }
        if let Some(handle) = first_errored {
            env.focus(&handle);
        }
    }
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("config", &self.config)
            .field("errors", &self.errors)
            .field("state", &self.state)
            .finish()
    }
}
