//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the BasicAuth backend.
//! It provides concrete implementations of the collaborator traits declared
//! in `ba_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL user persistence using SQLx
//! - **Cache**: Redis verification token store and generation ledger
//! - **Mail**: Verification mail delivery
//! - **Secrets**: Token signing secrets loaded from the environment

use ba_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and the verification token store
pub mod cache;

/// Mail module - outbound verification mail
pub mod mail;

/// Secrets module - signing secret providers
pub mod secrets;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration loading for infrastructure services
    //!
    //! Handles:
    //! - `.env` loading for local development
    //! - Database and Redis settings

    pub use ba_shared::config::{AppConfig, CacheConfig, DatabaseConfig};

    /// Load application configuration from the environment
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn load_config() -> AppConfig {
        dotenvy::dotenv().ok();
        AppConfig::from_env()
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail delivery error
    #[error("Mail error: {0}")]
    Mail(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Database(e) => DomainError::unavailable("user store", e.to_string()),
            InfrastructureError::Migration(e) => DomainError::unavailable("user store", e.to_string()),
            InfrastructureError::Cache(e) => DomainError::unavailable("verification store", e.to_string()),
            InfrastructureError::Mail(message) => DomainError::unavailable("mailer", message),
            InfrastructureError::Config(message) => DomainError::Configuration { message },
        }
    }
}
