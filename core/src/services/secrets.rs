//! Source of the token signing secrets.

use crate::domain::value_objects::SigningSecrets;
use crate::errors::DomainError;

/// Supplies the access and refresh signing secrets
///
/// Called once during startup. A failure means the process cannot serve
/// authentication and should exit.
pub trait SecretProvider: Send + Sync {
    fn signing_secrets(&self) -> Result<SigningSecrets, DomainError>;
}

/// Provider over secrets already held in memory
pub struct StaticSecretProvider {
    secrets: SigningSecrets,
}

impl StaticSecretProvider {
    pub fn new(secrets: SigningSecrets) -> Self {
        Self { secrets }
    }
}

impl SecretProvider for StaticSecretProvider {
    fn signing_secrets(&self) -> Result<SigningSecrets, DomainError> {
        Ok(self.secrets.clone())
    }
}
