//! Traits for mail delivery and verification token generation

use async_trait::async_trait;

use crate::errors::DomainError;

use super::types::MailMessage;

/// Outbound mail delivery
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a single message
    async fn send(&self, message: &MailMessage) -> Result<(), DomainError>;
}

/// Source of opaque verification tokens
pub trait TokenGenerator: Send + Sync {
    /// Produce a new high-entropy token
    fn generate(&self) -> Result<String, DomainError>;
}
