//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
#[path = "tests/domain_error_tests.rs"]
mod tests;

pub use types::{AuthError, RegistrationError, TokenError};

use std::collections::HashMap;

use ba_shared::errors::{error_codes, ErrorResponse};
use ba_shared::utils::validation::ValidationErrors;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed input; never worth retrying
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: HashMap<String, Vec<String>>,
    },

    /// Unique constraint violation in a store
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// A store or network dependency failed
    #[error("{dependency} unavailable: {message}")]
    DependencyUnavailable { dependency: String, message: String },

    #[error("Deadline of {timeout_ms}ms exceeded during {operation}")]
    DeadlineExceeded { operation: String, timeout_ms: u64 },

    /// A compensating action failed after `original`; state may be orphaned
    #[error("{original} (compensating action failed: {compensation})")]
    PartialFailure {
        original: Box<DomainError>,
        compensation: Box<DomainError>,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Coarse classification used for transport mapping and retry decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    RateLimited,
    NotFound,
    Expired,
    InvalidToken,
    Unauthorized,
    Signing,
    DependencyUnavailable,
    DeadlineExceeded,
    PartialFailure,
    Internal,
}

impl ErrorKind {
    /// Whether the caller caused the failure (4xx-equivalent)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::Validation
                | ErrorKind::Conflict
                | ErrorKind::RateLimited
                | ErrorKind::NotFound
                | ErrorKind::Expired
                | ErrorKind::InvalidToken
                | ErrorKind::Unauthorized
        )
    }
}

impl DomainError {
    /// Validation error without field details
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
            fields: HashMap::new(),
        }
    }

    pub fn unavailable(dependency: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::DependencyUnavailable {
            dependency: dependency.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. } => ErrorKind::Validation,
            DomainError::Conflict { .. } => ErrorKind::Conflict,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::DependencyUnavailable { .. } => ErrorKind::DependencyUnavailable,
            DomainError::DeadlineExceeded { .. } => ErrorKind::DeadlineExceeded,
            DomainError::PartialFailure { .. } => ErrorKind::PartialFailure,
            DomainError::Configuration { .. } | DomainError::Internal { .. } => ErrorKind::Internal,
            DomainError::Auth(AuthError::InvalidCredentials) => ErrorKind::Unauthorized,
            DomainError::Auth(AuthError::UserNotFound) => ErrorKind::NotFound,
            DomainError::Token(TokenError::Expired) => ErrorKind::Expired,
            DomainError::Token(TokenError::SigningFailed { .. }) => ErrorKind::Signing,
            DomainError::Token(_) => ErrorKind::InvalidToken,
            DomainError::Registration(err) => match err {
                RegistrationError::EmailInUse => ErrorKind::Conflict,
                RegistrationError::RateLimitExceeded { .. } => ErrorKind::RateLimited,
                RegistrationError::TokenGenerationFailed => ErrorKind::Internal,
                RegistrationError::TokenExpiredOrMissing => ErrorKind::Expired,
                RegistrationError::TokenMismatch => ErrorKind::Validation,
                RegistrationError::UserNotFound => ErrorKind::NotFound,
            },
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.kind().is_client_error()
    }

    /// Whether the same call may succeed later without changing its input
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::RateLimited | ErrorKind::DependencyUnavailable | ErrorKind::DeadlineExceeded
        )
    }

    /// Stable machine-readable code for the error response
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::Conflict { .. } => error_codes::CONFLICT,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::DependencyUnavailable { .. } => error_codes::SERVICE_UNAVAILABLE,
            DomainError::DeadlineExceeded { .. } => error_codes::DEADLINE_EXCEEDED,
            DomainError::PartialFailure { .. } => error_codes::PARTIAL_FAILURE,
            DomainError::Configuration { .. } => error_codes::CONFIGURATION_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Auth(AuthError::InvalidCredentials) => error_codes::INVALID_CREDENTIALS,
            DomainError::Auth(AuthError::UserNotFound) => error_codes::USER_NOT_FOUND,
            DomainError::Token(err) => match err {
                TokenError::Empty => error_codes::TOKEN_EMPTY,
                TokenError::Malformed => error_codes::TOKEN_INVALID,
                TokenError::Expired => error_codes::TOKEN_EXPIRED,
                TokenError::SigningFailed { .. } => error_codes::TOKEN_SIGNING_FAILED,
            },
            DomainError::Registration(err) => match err {
                RegistrationError::EmailInUse => error_codes::EMAIL_IN_USE,
                RegistrationError::RateLimitExceeded { .. } => error_codes::RATE_LIMIT_EXCEEDED,
                RegistrationError::TokenGenerationFailed => error_codes::TOKEN_GENERATION_FAILED,
                RegistrationError::TokenExpiredOrMissing => error_codes::VERIFICATION_TOKEN_EXPIRED,
                RegistrationError::TokenMismatch => error_codes::VERIFICATION_TOKEN_MISMATCH,
                RegistrationError::UserNotFound => error_codes::USER_NOT_FOUND,
            },
        }
    }

    /// Builds the wire response. Server-side failures get a generic message so
    /// dependency details stay in the logs.
    pub fn to_error_response(&self) -> ErrorResponse {
        if !self.is_client_error() {
            let message = match self.kind() {
                ErrorKind::DependencyUnavailable => "A required service is temporarily unavailable",
                ErrorKind::DeadlineExceeded => "The request timed out, please retry",
                _ => "An internal error occurred",
            };
            return ErrorResponse::new(self.code(), message);
        }

        let response = ErrorResponse::new(self.code(), self.to_string());
        match self {
            DomainError::Validation { fields, .. } if !fields.is_empty() => {
                response.add_detail("fields", fields)
            }
            DomainError::Registration(RegistrationError::RateLimitExceeded { max, window_hours }) => {
                response
                    .add_detail("max", max)
                    .add_detail("window_hours", window_hours)
            }
            _ => response,
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation {
            message: errors.summary(),
            fields: errors.to_field_errors(),
        }
    }
}
