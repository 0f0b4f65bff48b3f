use serde::{Deserialize, Serialize};
use validator::Validate;

use ba_core::domain::entities::user::UserProfile;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Format is checked by the registration service
    #[validate(length(min = 1, max = 255, message = "email is required"))]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 128, message = "password must be 1 to 128 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255, message = "email is required"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendRequest {
    #[validate(length(min = 1, max = 255, message = "email is required"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Query string of the mailed verification link
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyQuery {
    #[validate(length(min = 1, max = 255, message = "email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: UserProfile,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::validation_error;
    use ba_core::errors::DomainError;

    #[test]
    fn test_signup_request_rejects_empty_fields() {
        let request = SignupRequest {
            email: String::new(),
            name: String::new(),
            password: "Sup3r$ecret".to_string(),
        };

        let errors = request.validate().unwrap_err();
        match validation_error(errors) {
            DomainError::Validation { message, fields } => {
                assert_eq!(message, "invalid request fields: email, name");
                assert_eq!(fields["email"], vec!["email is required".to_string()]);
                assert!(!fields.contains_key("password"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_query_requires_token() {
        let query = VerifyQuery {
            email: "alice@example.com".to_string(),
            token: String::new(),
        };
        assert!(query.validate().is_err());
    }
}
