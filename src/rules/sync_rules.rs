//! Synchronous rule checks.
//!
//! Each check takes the field's current value and returns `Some(message)`
//! on failure, `None` on pass. Messages are the user-facing French strings.

use regex::Regex;
use std::sync::OnceLock;

// Pre-compiled patterns
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static NUMERIC_REGEX: OnceLock<Regex> = OnceLock::new();
static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$").unwrap()
    })
}

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| {
        // Optional scheme (with or without www.), domain, optional port,
        // optional path.
        Regex::new(
            r"^(http://www\.|https://www\.|http://|https://)?[a-z0-9]+([-.][a-z0-9]+)*\.[a-z]{2,5}(:[0-9]{1,5})?(/.*)?$",
        )
        .unwrap()
    })
}

fn numeric_regex() -> &'static Regex {
    NUMERIC_REGEX.get_or_init(|| Regex::new(r"^[0-9]+$").unwrap())
}

fn phone_regex() -> &'static Regex {
    PHONE_REGEX.get_or_init(|| Regex::new(r"^\+?[0-9]{10,15}$").unwrap())
}

fn postal_code_regex(country: &str) -> &'static Regex {
    static FIVE_DIGITS: OnceLock<Regex> = OnceLock::new();
    static US: OnceLock<Regex> = OnceLock::new();
    static CA: OnceLock<Regex> = OnceLock::new();
    static UK: OnceLock<Regex> = OnceLock::new();
    static AU: OnceLock<Regex> = OnceLock::new();
    static FALLBACK: OnceLock<Regex> = OnceLock::new();

    match country {
        "FR" | "DE" => FIVE_DIGITS.get_or_init(|| Regex::new(r"^\d{5}$").unwrap()),
        "US" => US.get_or_init(|| Regex::new(r"^\d{5}(-\d{4})?$").unwrap()),
        "CA" => CA.get_or_init(|| Regex::new(r"^[A-Za-z]\d[A-Za-z][ -]?\d[A-Za-z]\d$").unwrap()),
        "UK" => UK.get_or_init(|| {
            Regex::new(r"^[A-Za-z]{1,2}\d[A-Za-z\d]?\s?\d[A-Za-z]{2}$").unwrap()
        }),
        "AU" => AU.get_or_init(|| Regex::new(r"^\d{4}$").unwrap()),
        // Unknown country: digits only.
        _ => FALLBACK.get_or_init(|| Regex::new(r"^\d+$").unwrap()),
    }
}

/// Fails only on the empty string; whitespace is significant.
pub fn required(value: &str) -> Option<String> {
    if value.is_empty() {
        Some("Ce champ est obligatoire.".to_string())
    } else {
        None
    }
}

pub fn min_length(n: usize, value: &str) -> Option<String> {
    if value.chars().count() < n {
        Some(format!("La longueur minimale est de {n} caractères."))
    } else {
        None
    }
}

pub fn max_length(n: usize, value: &str) -> Option<String> {
    if value.chars().count() > n {
        Some(format!("La longueur maximale est de {n} caractères."))
    } else {
        None
    }
}

pub fn email(value: &str) -> Option<String> {
    if email_regex().is_match(value) {
        None
    } else {
        Some("Entrez une adresse e-mail valide.".to_string())
    }
}

pub fn url(value: &str) -> Option<String> {
    if url_regex().is_match(value) {
        None
    } else {
        Some("Entrez une URL valide.".to_string())
    }
}

pub fn numeric(value: &str) -> Option<String> {
    if numeric_regex().is_match(value) {
        None
    } else {
        Some("Entrez uniquement des chiffres.".to_string())
    }
}

pub fn phone(value: &str) -> Option<String> {
    if phone_regex().is_match(value) {
        None
    } else {
        Some("Entrez un numéro de téléphone valide.".to_string())
    }
}

pub fn postal_code(country: &str, value: &str) -> Option<String> {
    if postal_code_regex(country).is_match(value) {
        None
    } else {
        Some("Entrez un code postal valide.".to_string())
    }
}

/// Length-based only; the extension point for complexity checks.
pub fn password_strength(value: &str) -> Option<String> {
    if value.chars().count() < 8 {
        Some("Le mot de passe doit contenir au moins 8 caractères.".to_string())
    } else {
        None
    }
}
