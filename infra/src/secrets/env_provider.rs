//! Signing secrets read from environment variables.

use ba_core::domain::value_objects::SigningSecrets;
use ba_core::errors::DomainError;
use ba_core::services::secrets::SecretProvider;

/// Variable holding the access token secret
pub const ACCESS_SECRET_VAR: &str = "JWT_SECRET";

/// Variable holding the refresh token secret
pub const REFRESH_SECRET_VAR: &str = "JWT_REFRESH_SECRET";

/// Reads the access and refresh secrets from the process environment
///
/// Both variables must be set, non-empty and different from each other.
#[derive(Debug, Clone)]
pub struct EnvSecretProvider {
    access_var: String,
    refresh_var: String,
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new(ACCESS_SECRET_VAR, REFRESH_SECRET_VAR)
    }
}

impl EnvSecretProvider {
    /// Provider over custom variable names
    pub fn new(access_var: impl Into<String>, refresh_var: impl Into<String>) -> Self {
        Self {
            access_var: access_var.into(),
            refresh_var: refresh_var.into(),
        }
    }

    fn read(&self, var: &str) -> Result<String, DomainError> {
        std::env::var(var).map_err(|_| DomainError::Configuration {
            message: format!("{} is not set", var),
        })
    }
}

impl SecretProvider for EnvSecretProvider {
    fn signing_secrets(&self) -> Result<SigningSecrets, DomainError> {
        let access = self.read(&self.access_var)?;
        let refresh = self.read(&self.refresh_var)?;
        SigningSecrets::new(access, refresh)
    }
}
