//! # SureForm
//!
//! A form-validation engine. Fields carry their validation rules as a
//! pipe-delimited spec string (`"required|minlength:3|email"`); the engine
//! parses the spec fresh on every run, evaluates synchronous rules, fans out
//! asynchronous availability probes, and drives error feedback through a
//! narrow [`FormEnvironment`] trait implemented by the surrounding layer
//! (a DOM binding, a test harness, a server-side form model).
//!
//! ## Features
//!
//! - Pipe-delimited rule grammar with numeric and country-code parameters
//! - Synchronous checks: presence, length, email, URL, numeric, phone,
//!   postal code, password length
//! - Asynchronous checks: caller-supplied availability/uniqueness probes,
//!   launched concurrently and joined before reporting
//! - Per-field custom validators and per-field message overrides
//! - Accessible feedback: errored fields are marked, messages shown inline,
//!   and the first errored field focused
//!
//! ## Example
//!
//! ```rust,ignore
//! use sureform::prelude::*;
//!
//! let config = EngineConfig::builder(["username", "email"])
//!     .probe(ProbeKind::UsernameAvailable, MyUsernameProbe::new(api))
//!     .custom_validator("username", |value| {
//!         value.contains(' ').then(|| "Pas d'espaces dans le nom d'utilisateur.".to_string())
//!     })
//!     .build();
//!
//! let mut engine = ValidationEngine::new(config);
//!
//! // `form` implements FormEnvironment and owns the elements, their values
//! // and their rule-spec attributes.
//! match engine.run(&mut form).await? {
//!     Outcome::Accepted => form.submit(),
//!     Outcome::Rejected => {} // errors are already rendered and focused
//! }
//! ```

mod config;
mod engine;
mod env;
mod error;
mod parser;
mod rules;

#[cfg(test)]
mod tests;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use engine::{EngineState, Outcome, ValidationEngine};
pub use env::{FormEnvironment, Notification};
pub use error::{EngineError, ErrorMap};
pub use parser::{parse_rules, Rule};
pub use rules::{AvailabilityProbe, ProbeKind, ProbeSet};

/// Prelude module.
pub mod prelude {
    pub use crate::config::{EngineConfig, EngineConfigBuilder};
    pub use crate::engine::{EngineState, Outcome, ValidationEngine};
    pub use crate::env::{FormEnvironment, Notification};
    pub use crate::error::{EngineError, ErrorMap};
    pub use crate::parser::{parse_rules, Rule};
    pub use crate::rules::{AvailabilityProbe, ProbeKind, ProbeSet};
}
