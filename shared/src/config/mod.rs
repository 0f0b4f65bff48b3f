//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Session token lifetimes and issuer
//! - `cache` - Redis connection configuration
//! - `database` - MySQL connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Verification mail sender settings
//! - `registration` - Verification token TTL, generation limits and password policy
//! - `server` - HTTP server and CORS configuration
//!
//! Signing secrets are deliberately absent: they are supplied by a secret
//! provider at startup and never serialized with the rest of the config.

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod mail;
pub mod registration;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::MailConfig;
pub use registration::{PasswordPolicy, RegistrationConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Session token configuration
    pub jwt: JwtConfig,

    /// Registration and verification configuration
    pub registration: RegistrationConfig,

    /// Verification mail configuration
    pub mail: MailConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            jwt: JwtConfig::default(),
            registration: RegistrationConfig::default(),
            mail: MailConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// Every section falls back to its defaults for unset variables. The
    /// result is immutable for the lifetime of the process.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }
        if let Some(format) = env_parse::<LogFormat>("LOG_FORMAT") {
            logging.format = format;
        }

        let cors = if environment.is_production() {
            CorsConfig::from_env()
        } else {
            CorsConfig::development()
        };

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            jwt: JwtConfig::from_env(),
            registration: RegistrationConfig::from_env(),
            mail: MailConfig::from_env(),
            cors,
            logging,
        }
    }
}

/// Reads and parses an environment variable, ignoring unset or unparsable values.
pub(crate) fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|value| value.trim().parse().ok())
}

/// Reads an environment variable with a fallback.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env_parse(key).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_consistent() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.registration.max_tokens_per_window, 5);
        assert_eq!(config.jwt.access_token_expiry, 72 * 3600);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        std::env::set_var("BA_SHARED_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("BA_SHARED_TEST_GARBAGE", 42u32), 42);
        std::env::set_var("BA_SHARED_TEST_NUMBER", " 7 ");
        assert_eq!(env_or("BA_SHARED_TEST_NUMBER", 42u32), 7);
        assert_eq!(env_or("BA_SHARED_TEST_UNSET_KEY", 9u32), 9);
    }
}
