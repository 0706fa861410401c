//! Client-side form validation rules.
//!
//! Forms collect problems into [`FieldErrors`] keyed by field name, so the
//! UI can render each message under its input before any request is sent.

use crate::shared::api::ApiError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9(][0-9 ()-]{6,19}$").unwrap());
static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap());
static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 -]{1,8}[A-Za-z0-9]$").unwrap());
static COUPON_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9_-]{3,32}$").unwrap());
static IBAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z0-9]{11,30}$").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`; the first message per field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Record `message` unless `ok` holds.
    pub fn check(&mut self, field: &str, ok: bool, message: impl Into<String>) {
        if !ok {
            self.add(field, message);
        }
    }

    pub fn require(&mut self, field: &str, value: &str, label: &str) {
        self.check(field, !value.trim().is_empty(), format!("{} is required", label));
    }

    /// Fold in another set; fields already present keep their message.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.errors {
            self.add(&field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn summary(&self) -> String {
        self.errors.values().cloned().collect::<Vec<_>>().join("; ")
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::validation(errors.summary())
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value.trim())
}

pub fn is_valid_slug(value: &str) -> bool {
    value.len() <= 64 && SLUG_RE.is_match(value)
}

pub fn is_valid_url(value: &str) -> bool {
    URL_RE.is_match(value.trim())
}

pub fn is_valid_postal_code(value: &str) -> bool {
    POSTAL_CODE_RE.is_match(value.trim())
}

pub fn is_valid_coupon_code(value: &str) -> bool {
    COUPON_CODE_RE.is_match(value)
}

/// Format check plus the ISO 13616 mod-97 checksum. Spaces are ignored.
pub fn is_valid_iban(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    if !IBAN_RE.is_match(&compact) {
        return false;
    }

    let (head, tail) = compact.split_at(4);
    let mut remainder: u32 = 0;
    for ch in tail.chars().chain(head.chars()) {
        let digits = match ch.to_digit(36) {
            Some(d) => d,
            None => return false,
        };
        if digits >= 10 {
            remainder = (remainder * 100 + digits) % 97;
        } else {
            remainder = (remainder * 10 + digits) % 97;
        }
    }
    remainder == 1
}

/// Lowercase, hyphen-separated form of a display name.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Inclusive character-count bounds on a trimmed value.
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.trim().chars().count();
    len >= min && len <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_first_message_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("starts_at", "Enter a valid date");
        let mut rules = FieldErrors::new();
        rules.add("starts_at", "Must be in the future");
        rules.add("name", "Name is required");
        errors.merge(rules);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("starts_at"), Some("Enter a valid date"));
        assert_eq!(errors.get("name"), Some("Name is required"));
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("ops@example.org"));
        assert!(is_valid_email("  first.last+tag@sub.example.co "));
        assert!(!is_valid_email("ops@example"));
        assert!(!is_valid_email("not an email"));
    }

    #[test]
    fn test_phone() {
        assert!(is_valid_phone("+44 20 7946 0958"));
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(!is_valid_phone("12"));
        assert!(!is_valid_phone("call me"));
    }

    #[test]
    fn test_slug_and_slugify() {
        assert!(is_valid_slug("rust-conf-2026"));
        assert!(!is_valid_slug("Rust Conf"));
        assert!(!is_valid_slug("-leading"));
        assert_eq!(slugify("  Rust Conf 2026!! "), "rust-conf-2026");
        assert_eq!(slugify("Été Festival"), "t-festival");
    }

    #[test]
    fn test_coupon_code() {
        assert!(is_valid_coupon_code("EARLY_BIRD-10"));
        assert!(!is_valid_coupon_code("ab"));
        assert!(!is_valid_coupon_code("lowercase"));
    }

    #[test]
    fn test_iban_checksum() {
        assert!(is_valid_iban("GB82 WEST 1234 5698 7654 32"));
        assert!(is_valid_iban("DE89370400440532013000"));
        assert!(!is_valid_iban("GB82 WEST 1234 5698 7654 33"));
        assert!(!is_valid_iban("12345"));
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.require("name", "  ", "Name");
        errors.check("name", false, "second message");
        errors.check("email", true, "unused");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert!(!errors.has("email"));

        let api: ApiError = errors.clone().into_result().unwrap_err().into();
        assert_eq!(api.kind, crate::shared::api::ErrorKind::Validation);
        assert_eq!(api.message, "Name is required");
    }
}
