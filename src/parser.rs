//! Rule-spec parsing.
//!
//! A rule spec is the raw per-field string the collaborator environment
//! stores alongside each field, e.g. `"required|minlength:3|email"`. It is
//! re-read and re-parsed on every validation run, so forms may rewrite a
//! field's rules between runs.

use serde::{Deserialize, Serialize};

/// A parsed validation rule.
///
/// Produced by [`parse_rules`], never mutated. `Custom` is the extension
/// point for caller-registered validators; the parser itself never emits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// Value must not be the empty string.
    Required,
    /// Value must be at least `n` characters long.
    MinLength { n: usize },
    /// Value must be at most `n` characters long.
    MaxLength { n: usize },
    /// Value must look like an e-mail address.
    Email,
    /// Value must look like a URL.
    Url,
    /// Value must be ASCII digits only.
    Numeric,
    /// Value must be a phone number (optional `+`, 10-15 digits).
    Phone,
    /// Value must match the postal-code shape for `country`.
    PostalCode { country: String },
    /// Value must be an acceptable password (length-based).
    PasswordStrength,
    /// Username availability, answered by an async probe.
    UsernameAvailable,
    /// E-mail availability, answered by an async probe.
    EmailAvailable,
    /// Value uniqueness, answered by an async probe.
    Unique,
    /// A caller-registered validator, looked up by name at evaluation time.
    Custom { name: String },
}

impl Rule {
    /// Whether this rule is answered by an asynchronous probe.
    pub fn is_async(&self) -> bool {
        matches!(
            self,
            Rule::UsernameAvailable | Rule::EmailAvailable | Rule::Unique
        )
    }

    /// Render the rule back to its spec-string token.
    ///
    /// Inverse of [`parse_rules`] for every rule the parser can produce:
    /// `parse_rules(&rule.as_token())` yields the rule back.
    pub fn as_token(&self) -> String {
        match self {
            Rule::Required => "required".to_string(),
            Rule::MinLength { n } => format!("minlength:{n}"),
            Rule::MaxLength { n } => format!("maxlength:{n}"),
            Rule::Email => "email".to_string(),
            Rule::Url => "url".to_string(),
            Rule::Numeric => "numeric".to_string(),
            Rule::Phone => "phone".to_string(),
            Rule::PostalCode { country } => format!("postalcode:{country}"),
            Rule::PasswordStrength => "password_strength".to_string(),
            Rule::UsernameAvailable => "username_available".to_string(),
            Rule::EmailAvailable => "email_available".to_string(),
            Rule::Unique => "unique".to_string(),
            Rule::Custom { name } => name.clone(),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_token())
    }
}

/// Parse a rule spec into its rules.
///
/// Splits on `|`, trims each token, and matches tokens against the
/// recognized shapes. Pure and total: unrecognized tokens and malformed
/// numeric parameters produce no rule rather than an error, so a spec
/// written for a newer rule set still parses.
pub fn parse_rules(spec: &str) -> Vec<Rule> {
    spec.split('|')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(parse_token)
        .collect()
}

fn parse_token(token: &str) -> Option<Rule> {
    // `required` and the length rules match by containment, so variants
    // like `required_if` still count as their base rule.
    if token.contains("required") {
        return Some(Rule::Required);
    }
    if token.contains("minlength") {
        return extract_count(token, "minlength").map(|n| Rule::MinLength { n });
    }
    if token.contains("maxlength") {
        return extract_count(token, "maxlength").map(|n| Rule::MaxLength { n });
    }
    if let Some(rest) = token.strip_prefix("postalcode") {
        let country = rest.strip_prefix(':')?;
        return Some(Rule::PostalCode {
            country: country.to_string(),
        });
    }
    match token {
        "email" => Some(Rule::Email),
        "url" => Some(Rule::Url),
        "numeric" => Some(Rule::Numeric),
        "phone" => Some(Rule::Phone),
        "password_strength" => Some(Rule::PasswordStrength),
        "username_available" => Some(Rule::UsernameAvailable),
        "email_available" => Some(Rule::EmailAvailable),
        "unique" => Some(Rule::Unique),
        // Unrecognized tokens are ignored on purpose.
        _ => None,
    }
}

/// Extract the digits of a `name:<digits>` parameter anywhere in `token`.
///
/// `minlength:abc` has no digits to extract, so the token yields no rule.
fn extract_count(token: &str, name: &str) -> Option<usize> {
    let at = token.find(name)?;
    let rest = token[at + name.len()..].strip_prefix(':')?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
