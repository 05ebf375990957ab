//! The collaborator seam.
//!
//! The engine does not own the document: it resolves fields, reads values
//! and rule specs, and renders feedback through this trait. A DOM binding,
//! a test harness, or a server-side form model all fit behind it.

use crate::error::ErrorMap;

/// Lifecycle notifications emitted during a validation cycle.
///
/// These are the only externally observable events; they fire
/// synchronously through [`FormEnvironment::notify`].
#[derive(Debug)]
pub enum Notification<'a> {
    /// Evaluation is about to start.
    BeforeValidate,
    /// Synchronous evaluation finished with no errors.
    AfterValidate,
    /// Synchronous evaluation finished with errors.
    OnError(&'a ErrorMap),
}

impl Notification<'_> {
    /// The event name, as the collaborator layer would dispatch it.
    pub fn name(&self) -> &'static str {
        match self {
            Notification::BeforeValidate => "beforeValidate",
            Notification::AfterValidate => "afterValidate",
            Notification::OnError(_) => "onError",
        }
    }
}

/// A document-like environment holding the form's fields.
///
/// `Handle` is whatever the environment uses to address one element; the
/// engine only passes handles back unmodified. Values and rule specs are
/// read fresh on every call, so the environment may mutate both between
/// validation runs.
pub trait FormEnvironment {
    /// An opaque reference to one field element.
    type Handle;

    /// Resolve a field name to its element, if present.
    fn lookup_field(&self, name: &str) -> Option<Self::Handle>;

    /// The element's current value.
    fn read_value(&self, handle: &Self::Handle) -> String;

    /// The element's current rule spec string.
    fn rule_spec(&self, handle: &Self::Handle) -> String;

    /// Mark the element as errored (e.g. toggle error classes).
    fn mark_errored(&mut self, handle: &Self::Handle);

    /// Remove the errored mark.
    fn clear_errored(&mut self, handle: &Self::Handle);

    /// Show an error message adjacent to the element.
    fn show_message(&mut self, handle: &Self::Handle, text: &str);

    /// Remove the element's error message, if any.
    fn clear_message(&mut self, handle: &Self::Handle);

    /// Move input focus to the element.
    fn focus(&mut self, handle: &Self::Handle);

    /// Dispatch a lifecycle notification.
    fn notify(&mut self, notification: Notification<'_>);
}
