//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

use crate::config::PasswordPolicy;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

// Unicode punctuation and symbol categories
static SPECIAL_CHAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{P}\p{S}]").expect("special character pattern")
});

/// Validation error with field-level details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Collection of validation errors
#[derive(Debug, Default, Clone)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) {
        self.add(ValidationError::new(field, message, code));
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Joins all messages into a single sentence-per-error string
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn to_field_errors(&self) -> HashMap<String, Vec<String>> {
        let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();
        for error in &self.errors {
            field_errors
                .entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        field_errors
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Checks an email address against the accepted address format.
pub fn validate_email(email: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if email.trim().is_empty() {
        errors.add_error("email", "email is required", "required");
    } else if !EMAIL_REGEX.is_match(email) {
        errors.add_error("email", "email address is not valid", "invalid_format");
    }
    errors.into_result()
}

/// Checks a password against `policy`, reporting every rule it breaks.
pub fn check_password(password: &str, policy: &PasswordPolicy) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if password.chars().count() < policy.min_length {
        errors.add_error(
            "password",
            format!("password must be at least {} characters", policy.min_length),
            "too_short",
        );
    }
    if policy.require_uppercase && !password.chars().any(char::is_uppercase) {
        errors.add_error("password", "password must contain an uppercase letter", "missing_uppercase");
    }
    if policy.require_lowercase && !password.chars().any(char::is_lowercase) {
        errors.add_error("password", "password must contain a lowercase letter", "missing_lowercase");
    }
    if policy.require_number && !password.chars().any(char::is_numeric) {
        errors.add_error("password", "password must contain a number", "missing_number");
    }
    if policy.require_special && !SPECIAL_CHAR_REGEX.is_match(password) {
        errors.add_error("password", "password must contain a special character", "missing_special");
    }

    errors.into_result()
}

/// Common validation functions
pub mod validators {
    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length is within bounds
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.chars().count();
        len >= min && len <= max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("missing-at.com").is_err());
        assert!(validate_email("a@x.c").is_err());
        assert!(validate_email("a b@x.com").is_err());
    }

    #[test]
    fn test_password_missing_digit() {
        let errors = check_password("Password!", &PasswordPolicy::default()).unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(errors.errors()[0].code, "missing_number");
    }

    #[test]
    fn test_password_reports_every_rule() {
        let errors = check_password("abc", &PasswordPolicy::default()).unwrap_err();
        let codes: Vec<&str> = errors.errors().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["too_short", "missing_uppercase", "missing_number", "missing_special"]);
        assert!(errors.summary().contains("at least 8"));
    }

    #[test]
    fn test_password_unicode_special_characters() {
        let policy = PasswordPolicy::default();
        assert!(check_password("Passw0rd€", &policy).is_ok());
        assert!(check_password("Passw0rd¿", &policy).is_ok());
        assert!(check_password("Passw0rd-", &policy).is_ok());
    }

    #[test]
    fn test_length_only_policy_ignores_classes() {
        let policy = PasswordPolicy::length_only(4);
        assert!(check_password("abcd", &policy).is_ok());
        assert!(check_password("abc", &policy).is_err());
    }

    #[test]
    fn test_field_errors_grouping() {
        let mut errors = ValidationErrors::new();
        errors.add_error("password", "one", "a");
        errors.add_error("password", "two", "b");
        errors.add_error("email", "three", "c");
        let fields = errors.to_field_errors();
        assert_eq!(fields["password"].len(), 2);
        assert_eq!(fields["email"], vec!["three".to_string()]);
    }
}
