//! Rule semantics.
//!
//! Synchronous checks live in [`sync_rules`]; the asynchronous availability
//! probes and their slots live in [`async_rules`].

pub(crate) mod async_rules;
pub(crate) mod sync_rules;

pub use async_rules::{AvailabilityProbe, ProbeKind, ProbeSet};
