//! Main authentication service implementation

use std::future::Future;
use std::sync::Arc;

use ba_shared::utils::masking::mask_email;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::UserProfile;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::deadline::with_deadline;
use crate::services::password::{digest_password, verify_password};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Authentication service for email/password sessions
pub struct AuthService<U>
where
    U: UserRepository,
{
    /// User repository for credential lookups
    user_repository: Arc<U>,
    /// Token codec for session tokens
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U> AuthService<U>
where
    U: UserRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for JWT token management
    /// * `config` - Service configuration
    pub fn new(user_repository: Arc<U>, token_service: Arc<TokenService>, config: AuthServiceConfig) -> Self {
        Self {
            user_repository,
            token_service,
            config,
        }
    }

    /// Log in with email and password
    ///
    /// Unknown email and wrong password fail identically with
    /// `AuthError::InvalidCredentials`. Unverified users may log in.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - The user's public view and a fresh token pair
    /// * `Err(DomainError)` - Bad credentials or store failure
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = email.trim().to_lowercase();
        let masked = mask_email(&email);

        let user = self
            .call("find_user_by_email", self.user_repository.find_by_email(&email))
            .await?;

        let user = match user {
            Some(user) if verify_password(password, &user.password_digest) => user,
            Some(user) => {
                tracing::warn!(user_id = %user.id, email = %masked, event = "login_failed", reason = "bad_password", "Login rejected");
                return Err(AuthError::InvalidCredentials.into());
            }
            None => {
                // Keep the unknown-user path doing the same hashing work
                std::hint::black_box(digest_password(password));
                tracing::warn!(email = %masked, event = "login_failed", reason = "unknown_user", "Login rejected");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let tokens = self.token_service.issue_token_pair(user.id)?;

        tracing::info!(user_id = %user.id, email = %masked, event = "login_succeeded", "User logged in");
        Ok(AuthResponse::new(user.profile(), tokens))
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        self.token_service.refresh_token_pair(refresh_token)
    }

    /// Load the user an access token was issued for
    ///
    /// # Errors
    ///
    /// * `DomainError::Token` - The token is empty, malformed or expired
    /// * `AuthError::UserNotFound` - The token is valid but the user is gone
    pub async fn current_user(&self, access_token: &str) -> DomainResult<UserProfile> {
        let user_id = self.token_service.validate_access_token(access_token)?;

        let user = self
            .call("find_user_by_id", self.user_repository.find_by_id(user_id))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user.profile())
    }

    async fn call<T, F>(&self, operation: &str, call: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        with_deadline(operation, self.config.query_timeout, call).await
    }
}
