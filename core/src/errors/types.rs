//! Domain-specific error types for session tokens, registration and login
//!
//! Each enum covers one service. They are folded into [`super::DomainError`]
//! through `#[from]` so callers can match either broadly or precisely.

use thiserror::Error;

/// Login errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are indistinguishable to callers
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,
}

/// Session token codec errors
///
/// The three validation failures stay distinct here even though the HTTP
/// boundary reports them all as 401.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is empty")]
    Empty,

    #[error("Token is malformed or has an invalid signature")]
    Malformed,

    #[error("Token expired")]
    Expired,

    #[error("Token signing failed: {reason}")]
    SigningFailed { reason: String },
}

/// Registration and email verification errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Email address is already in use")]
    EmailInUse,

    #[error("Verification token limit of {max} per {window_hours} hours reached")]
    RateLimitExceeded { max: u32, window_hours: u64 },

    #[error("Verification token generation failed")]
    TokenGenerationFailed,

    #[error("Verification token expired or does not exist")]
    TokenExpiredOrMissing,

    #[error("Verification token does not match")]
    TokenMismatch,

    #[error("User not found")]
    UserNotFound,
}
