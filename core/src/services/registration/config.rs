//! Configuration for the registration service

use std::time::Duration;

use ba_shared::config::{DatabaseConfig, MailConfig, PasswordPolicy, RegistrationConfig};

use crate::domain::entities::verification::GenerationLimit;

/// Configuration for the registration service
#[derive(Debug, Clone)]
pub struct RegistrationServiceConfig {
    /// Verification token time-to-live
    pub token_ttl: Duration,
    /// Generation ceiling, reported in rate limit errors
    pub limit: GenerationLimit,
    /// Deadline for each verification store and mailer call
    pub store_timeout: Duration,
    /// Deadline for each user store call
    pub query_timeout: Duration,
    /// Clear the generation ledger after a successful verification
    pub clear_ledger_on_verify: bool,
    /// Password complexity requirements
    pub password_policy: PasswordPolicy,
    /// Verification mail sender settings
    pub mail: MailConfig,
}

impl Default for RegistrationServiceConfig {
    fn default() -> Self {
        Self::new(
            &RegistrationConfig::default(),
            &DatabaseConfig::default(),
            &MailConfig::default(),
        )
    }
}

impl RegistrationServiceConfig {
    pub fn new(registration: &RegistrationConfig, database: &DatabaseConfig, mail: &MailConfig) -> Self {
        Self {
            token_ttl: Duration::from_secs(registration.verification_token_ttl),
            limit: GenerationLimit::new(
                registration.max_tokens_per_window,
                Duration::from_secs(registration.generation_window),
            ),
            store_timeout: Duration::from_secs(registration.store_timeout),
            query_timeout: Duration::from_secs(database.query_timeout),
            clear_ledger_on_verify: registration.clear_ledger_on_verify,
            password_policy: registration.password.clone(),
            mail: mail.clone(),
        }
    }
}
