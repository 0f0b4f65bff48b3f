//! Request and response bodies for the HTTP surface

pub mod auth;

pub use auth::{
    LoginRequest, MessageResponse, RefreshRequest, ResendRequest, SignupRequest, UserResponse,
    VerifyQuery,
};

use std::collections::HashMap;

use ba_core::errors::DomainError;

/// Fold `validator` derive failures into a domain validation error
pub fn validation_error(errors: validator::ValidationErrors) -> DomainError {
    let fields: HashMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();

    let mut names: Vec<&str> = fields.keys().map(String::as_str).collect();
    names.sort_unstable();

    DomainError::Validation {
        message: format!("invalid request fields: {}", names.join(", ")),
        fields,
    }
}
