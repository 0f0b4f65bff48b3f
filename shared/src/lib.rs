//! Shared utilities and common types for the BasicAuth server
//!
//! This crate provides common functionality used across all server modules:
//! - Typed configuration assembled once at startup
//! - The wire-level error response structure
//! - Input validators (email format, password policy)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, MailConfig, PasswordPolicy, RegistrationConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::{masking, validation};
