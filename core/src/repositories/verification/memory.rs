//! In-memory verification token store driven by an injectable clock

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::entities::verification::GenerationLimit;
use crate::errors::DomainError;
use crate::services::clock::Clock;

use super::trait_::VerificationTokenStore;

#[derive(Debug, Clone)]
struct StoredToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Verification store held in process memory
///
/// Expiry is evaluated lazily against the clock on every read, standing in
/// for the key-value store's native TTL.
#[derive(Clone)]
pub struct InMemoryVerificationStore {
    clock: Arc<dyn Clock>,
    limit: GenerationLimit,
    tokens: Arc<RwLock<HashMap<String, StoredToken>>>,
    ledgers: Arc<RwLock<HashMap<String, Vec<i64>>>>,
}

impl InMemoryVerificationStore {
    pub fn new(clock: Arc<dyn Clock>, limit: GenerationLimit) -> Self {
        Self {
            clock,
            limit,
            tokens: Arc::new(RwLock::new(HashMap::new())),
            ledgers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of addresses holding a live token
    pub async fn live_token_count(&self) -> usize {
        let now = self.clock.now();
        let tokens = self.tokens.read().await;
        tokens.values().filter(|t| t.expires_at > now).count()
    }

    fn count_in_window(&self, entries: &[i64]) -> u64 {
        let start = self.limit.window_start(self.clock.now().timestamp());
        entries.iter().filter(|&&score| score > start).count() as u64
    }
}

#[async_trait]
impl VerificationTokenStore for InMemoryVerificationStore {
    async fn set_token(&self, email: &str, token: &str, ttl: Duration) -> Result<(), DomainError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| DomainError::validation(format!("invalid token ttl: {}", e)))?;
        let expires_at = self.clock.now() + ttl;

        let mut tokens = self.tokens.write().await;
        tokens.insert(
            email.to_string(),
            StoredToken {
                value: token.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get_token(&self, email: &str) -> Result<String, DomainError> {
        let now = self.clock.now();
        let mut tokens = self.tokens.write().await;

        match tokens.get(email) {
            Some(stored) if stored.expires_at > now => Ok(stored.value.clone()),
            Some(_) => {
                tokens.remove(email);
                Err(DomainError::not_found("verification token"))
            }
            None => Err(DomainError::not_found("verification token")),
        }
    }

    async fn delete_token(&self, email: &str) -> Result<(), DomainError> {
        self.tokens.write().await.remove(email);
        Ok(())
    }

    async fn record_generation(&self, email: &str) -> Result<(), DomainError> {
        let now = self.clock.now().timestamp();
        let start = self.limit.window_start(now);

        let mut ledgers = self.ledgers.write().await;
        let entries = ledgers.entry(email.to_string()).or_default();
        entries.push(now);
        entries.retain(|&score| score > start);
        Ok(())
    }

    async fn can_generate(&self, email: &str) -> Result<bool, DomainError> {
        let count = self.generation_count(email).await?;
        Ok(self.limit.allows(count))
    }

    async fn generation_count(&self, email: &str) -> Result<u64, DomainError> {
        let ledgers = self.ledgers.read().await;
        Ok(ledgers
            .get(email)
            .map(|entries| self.count_in_window(entries))
            .unwrap_or(0))
    }

    async fn delete_generation_ledger(&self, email: &str) -> Result<(), DomainError> {
        self.ledgers.write().await.remove(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::ManualClock;
    use chrono::TimeZone;

    fn setup(max: u32) -> (Arc<ManualClock>, InMemoryVerificationStore) {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let store = InMemoryVerificationStore::new(
            clock.clone(),
            GenerationLimit::new(max, Duration::from_secs(86_400)),
        );
        (clock, store)
    }

    #[tokio::test]
    async fn test_set_token_overwrites_previous() {
        let (_, store) = setup(5);
        store.set_token("a@x.com", "t1", Duration::from_secs(600)).await.unwrap();
        store.set_token("a@x.com", "t2", Duration::from_secs(600)).await.unwrap();

        assert_eq!(store.get_token("a@x.com").await.unwrap(), "t2");
        assert_eq!(store.live_token_count().await, 1);
    }

    #[tokio::test]
    async fn test_token_expires_with_ttl() {
        let (clock, store) = setup(5);
        store.set_token("a@x.com", "t1", Duration::from_secs(600)).await.unwrap();

        clock.advance(chrono::Duration::seconds(599));
        assert!(store.get_token("a@x.com").await.is_ok());

        clock.advance(chrono::Duration::seconds(1));
        let result = store.get_token("a@x.com").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_token_is_idempotent() {
        let (_, store) = setup(5);
        store.set_token("a@x.com", "t1", Duration::from_secs(600)).await.unwrap();
        store.delete_token("a@x.com").await.unwrap();
        store.delete_token("a@x.com").await.unwrap();
        assert!(store.get_token("a@x.com").await.is_err());
    }

    #[tokio::test]
    async fn test_ledger_window_slides() {
        let (clock, store) = setup(2);
        store.record_generation("a@x.com").await.unwrap();
        clock.advance(chrono::Duration::hours(1));
        store.record_generation("a@x.com").await.unwrap();
        assert!(!store.can_generate("a@x.com").await.unwrap());

        // First entry leaves the window exactly 24h after it was recorded
        clock.advance(chrono::Duration::hours(23));
        assert_eq!(store.generation_count("a@x.com").await.unwrap(), 1);
        assert!(store.can_generate("a@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_same_second_generations_are_counted_separately() {
        let (_, store) = setup(5);
        store.record_generation("a@x.com").await.unwrap();
        store.record_generation("a@x.com").await.unwrap();
        assert_eq!(store.generation_count("a@x.com").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ledger_and_token_are_independent() {
        let (_, store) = setup(5);
        store.set_token("a@x.com", "t1", Duration::from_secs(600)).await.unwrap();
        store.record_generation("a@x.com").await.unwrap();

        store.delete_generation_ledger("a@x.com").await.unwrap();
        assert_eq!(store.get_token("a@x.com").await.unwrap(), "t1");
        assert_eq!(store.generation_count("a@x.com").await.unwrap(), 0);

        store.record_generation("a@x.com").await.unwrap();
        store.delete_token("a@x.com").await.unwrap();
        assert_eq!(store.generation_count("a@x.com").await.unwrap(), 1);
    }
}
