//! Bounded waits on collaborator calls.

use std::future::Future;
use std::time::Duration;

use crate::errors::DomainError;

/// Runs `call` under `limit`, mapping an elapsed deadline to
/// [`DomainError::DeadlineExceeded`].
///
/// The inner future is dropped when the deadline fires, which cancels the
/// outstanding store call.
pub async fn with_deadline<T, F>(operation: &str, limit: Duration, call: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                operation = operation,
                timeout_ms = limit.as_millis() as u64,
                event = "deadline_exceeded",
                "Collaborator call exceeded its deadline"
            );
            Err(DomainError::DeadlineExceeded {
                operation: operation.to_string(),
                timeout_ms: limit.as_millis() as u64,
            })
        }
    }
}
