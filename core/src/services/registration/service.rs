//! Main registration service implementation

use std::future::Future;
use std::sync::Arc;

use ba_shared::utils::masking::mask_email;
use ba_shared::utils::validation::{check_password, validate_email, ValidationErrors};
use constant_time_eq::constant_time_eq;
use url::Url;

use crate::domain::entities::user::{User, UserProfile};
use crate::domain::entities::verification::RegistrationState;
use crate::errors::{DomainError, DomainResult, RegistrationError};
use crate::repositories::{UserRepository, VerificationTokenStore};
use crate::services::clock::Clock;
use crate::services::deadline::with_deadline;
use crate::services::password::digest_password;

use super::config::RegistrationServiceConfig;
use super::traits::{Mailer, TokenGenerator};
use super::types::{MailMessage, SignupResult};

/// Coordinates user creation, verification token issuance and confirmation
///
/// Users live in one store and verification tokens in another, so there is
/// no transaction spanning both. Partial progress is undone with explicit
/// compensating deletes, each attempted exactly once.
pub struct RegistrationService<U, V, M>
where
    U: UserRepository,
    V: VerificationTokenStore,
    M: Mailer,
{
    users: Arc<U>,
    store: Arc<V>,
    mailer: Arc<M>,
    generator: Arc<dyn TokenGenerator>,
    clock: Arc<dyn Clock>,
    config: RegistrationServiceConfig,
}

impl<U, V, M> RegistrationService<U, V, M>
where
    U: UserRepository,
    V: VerificationTokenStore,
    M: Mailer,
{
    /// Create a new registration service
    ///
    /// # Arguments
    ///
    /// * `users` - User persistence
    /// * `store` - Verification token store and generation ledger
    /// * `mailer` - Outbound mail delivery
    /// * `generator` - Verification token source
    /// * `clock` - Time source for user timestamps
    /// * `config` - Service configuration
    pub fn new(
        users: Arc<U>,
        store: Arc<V>,
        mailer: Arc<M>,
        generator: Arc<dyn TokenGenerator>,
        clock: Arc<dyn Clock>,
        config: RegistrationServiceConfig,
    ) -> Self {
        Self {
            users,
            store,
            mailer,
            generator,
            clock,
            config,
        }
    }

    /// Create an unverified user and issue its first verification token
    ///
    /// This method:
    /// 1. Validates the input (no store is touched on failure)
    /// 2. Rejects an email that is already registered
    /// 3. Checks the generation ceiling before any side effect
    /// 4. Inserts the user
    /// 5. Generates and stores the verification token, deleting the user on failure
    /// 6. Records the generation in the ledger
    ///
    /// A ledger failure in step 6 is returned to the caller but leaves the user
    /// and the token in place.
    ///
    /// # Returns
    ///
    /// * `Ok(SignupResult)` - The created user and the token to deliver
    /// * `Err(DomainError)` - Validation, conflict, rate limit or store failure
    pub async fn signup(&self, email: &str, name: &str, password: &str) -> DomainResult<SignupResult> {
        let email = normalize_email(email);
        let masked = mask_email(&email);
        let mut state = RegistrationState::Requested;

        self.validate_signup(&email, name, password)?;

        // Step 1: Uniqueness
        if self
            .query("find_user_by_email", self.users.find_by_email(&email))
            .await?
            .is_some()
        {
            tracing::info!(email = %masked, event = "email_in_use", "Sign-up rejected, email already registered");
            return Err(RegistrationError::EmailInUse.into());
        }

        // Step 2: Rate limit ahead of any side effect
        if let Err(e) = self.ensure_can_generate(&email).await {
            transition(&masked, &mut state, RegistrationState::RateLimited);
            return Err(e);
        }

        // Step 3: Insert user
        let user = User::new(email.as_str(), name.trim(), digest_password(password), self.clock.now());
        let user = match self.query("create_user", self.users.create(user)).await {
            Ok(user) => user,
            Err(DomainError::Conflict { .. }) => {
                tracing::info!(email = %masked, event = "email_in_use", "Sign-up lost a race on the unique email index");
                return Err(RegistrationError::EmailInUse.into());
            }
            Err(e) => return Err(e),
        };
        transition(&masked, &mut state, RegistrationState::UserCreated);

        // Step 4: Generate token
        let token = match self.generator.generate() {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(email = %masked, error = %e, event = "token_generation_failed", "Failed to generate verification token");
                let err = self
                    .roll_back_user(&user, RegistrationError::TokenGenerationFailed.into())
                    .await;
                transition(&masked, &mut state, RegistrationState::RolledBack);
                return Err(err);
            }
        };

        // Step 5: Store token
        if let Err(e) = self
            .call("set_token", self.store.set_token(&email, &token, self.config.token_ttl))
            .await
        {
            let err = self.roll_back_user(&user, e).await;
            transition(&masked, &mut state, RegistrationState::RolledBack);
            return Err(err);
        }
        transition(&masked, &mut state, RegistrationState::TokenIssued);

        // Step 6: Ledger
        self.record_generation(&email).await?;

        tracing::info!(
            user_id = %user.id,
            email = %masked,
            event = "signup_completed",
            "User registered, verification token issued"
        );

        Ok(SignupResult {
            user: user.profile(),
            token,
        })
    }

    /// Consume the verification token for `email`
    ///
    /// The token is deleted on success so it cannot be used twice. Clearing
    /// the generation ledger afterwards is best-effort.
    ///
    /// # Errors
    ///
    /// * `RegistrationError::TokenExpiredOrMissing` - No live token for `email`
    /// * `RegistrationError::TokenMismatch` - A live token exists but differs
    pub async fn verify_token(&self, email: &str, token: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        let masked = mask_email(&email);
        let mut state = RegistrationState::TokenIssued;

        let stored = match self.call("get_token", self.store.get_token(&email)).await {
            Ok(stored) => stored,
            Err(DomainError::NotFound { .. }) => {
                tracing::info!(email = %masked, event = "verification_token_missing", "No live verification token");
                transition(&masked, &mut state, RegistrationState::Expired);
                return Err(RegistrationError::TokenExpiredOrMissing.into());
            }
            Err(e) => return Err(e),
        };

        if !constant_time_eq(stored.as_bytes(), token.trim().as_bytes()) {
            tracing::warn!(email = %masked, event = "verification_token_mismatch", "Verification token does not match");
            return Err(RegistrationError::TokenMismatch.into());
        }

        self.call("delete_token", self.store.delete_token(&email)).await?;

        if self.config.clear_ledger_on_verify {
            if let Err(e) = self
                .call("delete_generation_ledger", self.store.delete_generation_ledger(&email))
                .await
            {
                tracing::warn!(email = %masked, error = %e, event = "ledger_clear_failed", "Failed to clear generation ledger after verification");
            }
        }

        tracing::info!(email = %masked, event = "verification_token_consumed", "Verification token accepted");
        transition(&masked, &mut state, RegistrationState::Verified);
        Ok(())
    }

    /// Mark the user registered under `email` as verified now
    ///
    /// Already-verified users are left untouched.
    pub async fn set_user_verified(&self, email: &str) -> DomainResult<UserProfile> {
        let email = normalize_email(email);

        let mut user = self
            .query("find_user_by_email", self.users.find_by_email(&email))
            .await?
            .ok_or(RegistrationError::UserNotFound)?;

        if user.is_verified {
            return Ok(user.profile());
        }

        user.mark_verified(self.clock.now());
        let user = match self.query("update_user", self.users.update(user)).await {
            Ok(user) => user,
            Err(DomainError::NotFound { .. }) => return Err(RegistrationError::UserNotFound.into()),
            Err(e) => return Err(e),
        };

        tracing::info!(
            user_id = %user.id,
            email = %mask_email(&email),
            event = "user_verified",
            "User email verified"
        );
        Ok(user.profile())
    }

    /// Issue a fresh verification token, superseding any live one
    ///
    /// Subject to the same generation ceiling as sign-up.
    pub async fn reload_token(&self, email: &str) -> DomainResult<String> {
        let email = normalize_email(email);
        let masked = mask_email(&email);

        self.ensure_can_generate(&email).await?;

        let token = self.generator.generate().map_err(|e| {
            tracing::error!(email = %masked, error = %e, event = "token_generation_failed", "Failed to generate verification token");
            DomainError::from(RegistrationError::TokenGenerationFailed)
        })?;

        self.call("set_token", self.store.set_token(&email, &token, self.config.token_ttl))
            .await?;
        self.record_generation(&email).await?;

        tracing::info!(email = %masked, event = "verification_token_reissued", "Verification token reissued");
        Ok(token)
    }

    /// Sign up and deliver the verification mail
    ///
    /// A mail failure fails the call but keeps the user and token; the user
    /// can ask for a resend.
    pub async fn register(&self, email: &str, name: &str, password: &str) -> DomainResult<UserProfile> {
        let result = self.signup(email, name, password).await?;
        let message = self.verification_mail(&result.user.email, Some(&result.user.name), &result.token)?;
        self.deliver(message).await?;
        Ok(result.user)
    }

    /// Reissue the token for an existing unverified user and mail it
    pub async fn resend(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);

        let user = self
            .query("find_user_by_email", self.users.find_by_email(&email))
            .await?
            .ok_or(RegistrationError::UserNotFound)?;
        if user.is_verified {
            return Err(DomainError::validation("email address is already verified"));
        }

        let token = self.reload_token(&email).await?;
        let message = self.verification_mail(&email, Some(&user.name), &token)?;
        self.deliver(message).await
    }

    /// Verify the token and mark the user verified
    pub async fn confirm(&self, email: &str, token: &str) -> DomainResult<UserProfile> {
        self.verify_token(email, token).await?;
        self.set_user_verified(email).await
    }

    /// Compose the verification mail for `email`
    pub fn verification_mail(&self, email: &str, name: Option<&str>, token: &str) -> DomainResult<MailMessage> {
        let domain = &self.config.mail.domain;
        let mut link = Url::parse(&format!("https://{}/registration/verify-user", domain)).map_err(|e| {
            DomainError::Configuration {
                message: format!("invalid mail domain {}: {}", domain, e),
            }
        })?;
        link.query_pairs_mut()
            .append_pair("token", token)
            .append_pair("email", email);

        let greeting = match name {
            Some(name) if !name.is_empty() => format!("Hello {},", name),
            _ => "Hello,".to_string(),
        };
        let minutes = (self.config.token_ttl.as_secs() / 60).max(1);

        Ok(MailMessage {
            from: self.config.mail.from_address.clone(),
            to: email.to_string(),
            subject: format!("Registration Verification Email at {}", domain),
            body: format!(
                "{}\n\nPlease confirm your email address by opening the link below. \
                 The link expires in {} minutes.\n\n{}\n",
                greeting, minutes, link
            ),
        })
    }

    fn validate_signup(&self, email: &str, name: &str, password: &str) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_email(email) {
            errors.extend(e);
        }
        if name.trim().is_empty() {
            errors.add_error("name", "name is required", "required");
        }
        if let Err(e) = check_password(password, &self.config.password_policy) {
            errors.extend(e);
        }
        errors.into_result().map_err(DomainError::from)
    }

    async fn ensure_can_generate(&self, email: &str) -> DomainResult<()> {
        let allowed = self
            .call("can_generate", self.store.can_generate(email))
            .await?;
        if !allowed {
            tracing::warn!(
                email = %mask_email(email),
                max = self.config.limit.max_per_window,
                event = "rate_limit_exceeded",
                "Verification token generation limit reached"
            );
            return Err(RegistrationError::RateLimitExceeded {
                max: self.config.limit.max_per_window,
                window_hours: self.config.limit.window_hours(),
            }
            .into());
        }
        Ok(())
    }

    async fn record_generation(&self, email: &str) -> DomainResult<()> {
        self.call("record_generation", self.store.record_generation(email))
            .await
            .map_err(|e| {
                tracing::warn!(
                    email = %mask_email(email),
                    error = %e,
                    event = "ledger_update_failed",
                    "Failed to record token generation; user and token are kept"
                );
                e
            })
    }

    /// Deletes a just-created user after a downstream failure.
    ///
    /// Returns the error to surface: `original` when the delete succeeds, or
    /// a `PartialFailure` carrying both errors when it does not.
    async fn roll_back_user(&self, user: &User, original: DomainError) -> DomainError {
        match self.query("delete_user", self.users.delete(user.id)).await {
            Ok(_) => {
                tracing::warn!(user_id = %user.id, error = %original, event = "user_rolled_back", "Rolled back user after failed token issuance");
                original
            }
            Err(compensation) => {
                tracing::error!(
                    user_id = %user.id,
                    email = %mask_email(&user.email),
                    error = %original,
                    compensation_error = %compensation,
                    event = "orphaned_user",
                    "Rollback failed, user row is orphaned and needs operator attention"
                );
                DomainError::PartialFailure {
                    original: Box::new(original),
                    compensation: Box::new(compensation),
                }
            }
        }
    }

    async fn deliver(&self, message: MailMessage) -> DomainResult<()> {
        self.call("send_mail", self.mailer.send(&message)).await.map_err(|e| {
            tracing::error!(to = %mask_email(&message.to), error = %e, event = "verification_mail_failed", "Failed to send verification mail");
            e
        })?;
        tracing::info!(to = %mask_email(&message.to), event = "verification_mail_sent", "Verification mail sent");
        Ok(())
    }

    async fn call<T, F>(&self, operation: &str, call: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        with_deadline(operation, self.config.store_timeout, call).await
    }

    async fn query<T, F>(&self, operation: &str, call: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        with_deadline(operation, self.config.query_timeout, call).await
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn transition(email: &str, state: &mut RegistrationState, next: RegistrationState) {
    tracing::debug!(
        email = %email,
        from = %state,
        to = %next,
        terminal = next.is_terminal(),
        event = "registration_state",
        "Registration state changed"
    );
    *state = next;
}
