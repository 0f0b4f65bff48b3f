//! Verification mail configuration

use serde::{Deserialize, Serialize};

/// Sender settings for registration mail
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Public domain used in verification links and subjects
    pub domain: String,

    /// Sender address
    pub from_address: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            domain: String::from("localhost:8080"),
            from_address: String::from("no-reply@localhost"),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            domain: std::env::var("MAIL_DOMAIN").unwrap_or(defaults.domain),
            from_address: std::env::var("MAIL_FROM").unwrap_or(defaults.from_address),
        }
    }

    pub fn new(domain: impl Into<String>, from_address: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            from_address: from_address.into(),
        }
    }
}
