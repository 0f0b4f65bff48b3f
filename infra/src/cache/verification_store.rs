//! Redis-backed verification token store
//!
//! Key patterns:
//! - `token-{email}` - the live verification token, expiring with its TTL
//! - `resend_verification-count-{email}` - sorted set of generation times
//!
//! Ledger members are `"{unix_ts}-{uuid}"` scored by `unix_ts`, so two
//! generations in the same second are two members. An entry counts while
//! `score > now - window`.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use ba_core::domain::entities::verification::GenerationLimit;
use ba_core::errors::DomainError;
use ba_core::repositories::VerificationTokenStore;
use ba_core::services::clock::Clock;
use ba_shared::utils::mask_email;

use super::redis_client::RedisClient;

/// Key holding the live token for `email`
pub fn token_key(email: &str) -> String {
    format!("token-{}", email)
}

/// Key holding the generation ledger for `email`
pub fn ledger_key(email: &str) -> String {
    format!("resend_verification-count-{}", email)
}

/// `key_for(email)` with the email masked, for log fields
pub fn log_key(key_for: fn(&str) -> String, email: &str) -> String {
    key_for(&mask_email(email))
}

/// Verification token store over Redis
#[derive(Clone)]
pub struct RedisVerificationStore {
    client: RedisClient,
    clock: Arc<dyn Clock>,
    limit: GenerationLimit,
}

impl RedisVerificationStore {
    pub fn new(client: RedisClient, clock: Arc<dyn Clock>, limit: GenerationLimit) -> Self {
        Self { client, clock, limit }
    }

    fn now_secs(&self) -> i64 {
        self.clock.now().timestamp()
    }
}

#[async_trait]
impl VerificationTokenStore for RedisVerificationStore {
    async fn set_token(&self, email: &str, token: &str, ttl: Duration) -> Result<(), DomainError> {
        if ttl.as_secs() == 0 {
            return Err(DomainError::validation("verification token ttl must be at least one second"));
        }
        tracing::debug!(key = %log_key(token_key, email), ttl_secs = ttl.as_secs(), "Storing verification token");
        let key = self.client.key(&token_key(email));
        self.client.set_with_expiry(&key, token, ttl.as_secs()).await?;
        Ok(())
    }

    async fn get_token(&self, email: &str) -> Result<String, DomainError> {
        let key = self.client.key(&token_key(email));
        self.client
            .get(&key)
            .await?
            .ok_or_else(|| DomainError::not_found("verification token"))
    }

    async fn delete_token(&self, email: &str) -> Result<(), DomainError> {
        tracing::debug!(key = %log_key(token_key, email), "Deleting verification token");
        let key = self.client.key(&token_key(email));
        self.client.delete(&key).await?;
        Ok(())
    }

    async fn record_generation(&self, email: &str) -> Result<(), DomainError> {
        let now = self.now_secs();
        let key = self.client.key(&ledger_key(email));
        let member = format!("{}-{}", now, Uuid::new_v4());
        tracing::debug!(key = %log_key(ledger_key, email), "Recording token generation");
        let window = self.limit.window.as_secs() as i64;

        self.client
            .record_in_window(&key, &member, now, self.limit.window_start(now), window)
            .await?;
        Ok(())
    }

    async fn can_generate(&self, email: &str) -> Result<bool, DomainError> {
        let count = self.generation_count(email).await?;
        Ok(self.limit.allows(count))
    }

    async fn generation_count(&self, email: &str) -> Result<u64, DomainError> {
        let key = self.client.key(&ledger_key(email));
        let start = self.limit.window_start(self.now_secs());
        Ok(self.client.count_after(&key, start).await?)
    }

    async fn delete_generation_ledger(&self, email: &str) -> Result<(), DomainError> {
        tracing::debug!(key = %log_key(ledger_key, email), "Clearing generation ledger");
        let key = self.client.key(&ledger_key(email));
        self.client.delete(&key).await?;
        Ok(())
    }
}
