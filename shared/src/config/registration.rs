//! Registration and email verification configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Verification token lifetime used when none is configured (10 minutes)
pub const DEFAULT_VERIFICATION_TOKEN_TTL: u64 = 600;

/// Verification tokens a single address may be issued per window
pub const DEFAULT_MAX_TOKENS_PER_WINDOW: u32 = 5;

/// Rolling window for the generation ledger (24 hours)
pub const DEFAULT_GENERATION_WINDOW: u64 = 86_400;

/// Deadline for a single verification store or user store call
pub const DEFAULT_STORE_TIMEOUT: u64 = 10;

/// Registration workflow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrationConfig {
    /// Verification token time-to-live in seconds
    pub verification_token_ttl: u64,

    /// Maximum token generations per address within the window
    pub max_tokens_per_window: u32,

    /// Length of the rolling generation window in seconds
    pub generation_window: u64,

    /// Deadline for each collaborator call in seconds
    pub store_timeout: u64,

    /// Whether a successful verification clears the address's generation ledger
    #[serde(default = "default_clear_ledger_on_verify")]
    pub clear_ledger_on_verify: bool,

    /// Password complexity requirements
    #[serde(default)]
    pub password: PasswordPolicy,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            verification_token_ttl: DEFAULT_VERIFICATION_TOKEN_TTL,
            max_tokens_per_window: DEFAULT_MAX_TOKENS_PER_WINDOW,
            generation_window: DEFAULT_GENERATION_WINDOW,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            clear_ledger_on_verify: default_clear_ledger_on_verify(),
            password: PasswordPolicy::default(),
        }
    }
}

impl RegistrationConfig {
    /// Create from environment variables
    ///
    /// A zero TTL is treated as unset and replaced by the default.
    pub fn from_env() -> Self {
        let ttl = env_or("REGISTRATION_VERIFICATION_TOKEN_TTL", DEFAULT_VERIFICATION_TOKEN_TTL);

        Self {
            verification_token_ttl: if ttl == 0 { DEFAULT_VERIFICATION_TOKEN_TTL } else { ttl },
            max_tokens_per_window: env_or("REGISTRATION_MAX_TOKENS_PER_DAY", DEFAULT_MAX_TOKENS_PER_WINDOW),
            generation_window: env_or("REGISTRATION_GENERATION_WINDOW", DEFAULT_GENERATION_WINDOW),
            store_timeout: env_or("REGISTRATION_STORE_TIMEOUT", DEFAULT_STORE_TIMEOUT),
            clear_ledger_on_verify: env_or(
                "REGISTRATION_CLEAR_LEDGER_ON_VERIFY",
                default_clear_ledger_on_verify(),
            ),
            password: PasswordPolicy::from_env(),
        }
    }

    /// Set the maximum number of generations per window
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens_per_window = max;
        self
    }

    /// Set the verification token TTL in seconds
    pub fn with_token_ttl(mut self, seconds: u64) -> Self {
        self.verification_token_ttl = seconds;
        self
    }
}

/// Password complexity policy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PasswordPolicy {
    /// Minimum length in characters
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_number: bool,
    /// Requires at least one punctuation or symbol character
    pub require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_uppercase: true,
            require_lowercase: true,
            require_number: true,
            require_special: true,
        }
    }
}

impl PasswordPolicy {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            min_length: env_or("PASSWORD_MIN_LENGTH", 8),
            require_uppercase: env_or("PASSWORD_REQUIRE_UPPERCASE", true),
            require_lowercase: env_or("PASSWORD_REQUIRE_LOWERCASE", true),
            require_number: env_or("PASSWORD_REQUIRE_NUMBER", true),
            require_special: env_or("PASSWORD_REQUIRE_SPECIAL", true),
        }
    }

    /// A policy that only enforces a minimum length
    pub fn length_only(min_length: usize) -> Self {
        Self {
            min_length,
            require_uppercase: false,
            require_lowercase: false,
            require_number: false,
            require_special: false,
        }
    }
}

fn default_clear_ledger_on_verify() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_defaults() {
        let config = RegistrationConfig::default();
        assert_eq!(config.verification_token_ttl, 600);
        assert_eq!(config.max_tokens_per_window, 5);
        assert_eq!(config.generation_window, 86_400);
        assert_eq!(config.store_timeout, 10);
        assert!(config.clear_ledger_on_verify);
        assert_eq!(config.password, PasswordPolicy::default());
    }

    #[test]
    fn test_builders() {
        let config = RegistrationConfig::default().with_max_tokens(2).with_token_ttl(30);
        assert_eq!(config.max_tokens_per_window, 2);
        assert_eq!(config.verification_token_ttl, 30);
    }

    #[test]
    fn test_length_only_policy() {
        let policy = PasswordPolicy::length_only(12);
        assert_eq!(policy.min_length, 12);
        assert!(!policy.require_special);
    }
}
