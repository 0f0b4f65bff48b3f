//! Verification token store trait.
//!
//! Holds at most one live verification token per email address plus a
//! per-address generation ledger used for rate limiting. The token and the
//! ledger are independent pieces of state: clearing one never clears the other.

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::DomainError;

/// Single-use token persistence and the rolling generation ledger
///
/// `can_generate` followed by `record_generation` is check-then-act and is
/// not atomic across concurrent requests for the same address. Concurrent
/// racers can overshoot the ceiling by at most their own number.
#[async_trait]
pub trait VerificationTokenStore: Send + Sync {
    /// Stores `token` for `email` with the given time-to-live, replacing any
    /// live token for that address
    async fn set_token(&self, email: &str, token: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Fetches the live token for `email`
    ///
    /// # Errors
    /// * `DomainError::NotFound` - No token exists or it has expired
    async fn get_token(&self, email: &str) -> Result<String, DomainError>;

    /// Removes the token for `email`; absence is not an error
    async fn delete_token(&self, email: &str) -> Result<(), DomainError>;

    /// Appends the current time to the ledger and prunes entries that have
    /// left the window, in one operation
    async fn record_generation(&self, email: &str) -> Result<(), DomainError>;

    /// Whether another token may be issued for `email` within the window.
    /// Never mutates state.
    async fn can_generate(&self, email: &str) -> Result<bool, DomainError>;

    /// Number of ledger entries inside the window
    async fn generation_count(&self, email: &str) -> Result<u64, DomainError>;

    /// Clears the generation ledger for `email`
    async fn delete_generation_ledger(&self, email: &str) -> Result<(), DomainError>;
}
