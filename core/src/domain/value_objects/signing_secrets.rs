//! Signing secrets for the access and refresh token namespaces.

use std::fmt;

use crate::errors::{DomainError, DomainResult};

/// The pair of HMAC secrets used by the token codec
///
/// Constructed once at startup and passed by reference to the codec. The two
/// secrets must differ so that a refresh token never validates as an access
/// token and vice versa.
#[derive(Clone)]
pub struct SigningSecrets {
    access: Vec<u8>,
    refresh: Vec<u8>,
}

impl SigningSecrets {
    /// Creates the secret pair, rejecting empty or identical secrets
    pub fn new(access: impl Into<Vec<u8>>, refresh: impl Into<Vec<u8>>) -> DomainResult<Self> {
        let access = access.into();
        let refresh = refresh.into();

        if access.is_empty() || refresh.is_empty() {
            return Err(DomainError::Configuration {
                message: "signing secrets must not be empty".to_string(),
            });
        }
        if access == refresh {
            return Err(DomainError::Configuration {
                message: "access and refresh signing secrets must differ".to_string(),
            });
        }

        Ok(Self { access, refresh })
    }

    pub fn access(&self) -> &[u8] {
        &self.access
    }

    pub fn refresh(&self) -> &[u8] {
        &self.refresh
    }
}

impl fmt::Debug for SigningSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecrets")
            .field("access", &"[redacted]")
            .field("refresh", &"[redacted]")
            .finish()
    }
}
