//! Verification token generation from the operating system's CSPRNG

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};

use crate::domain::entities::verification::VERIFICATION_TOKEN_BYTES;
use crate::errors::DomainError;

use super::traits::TokenGenerator;

/// Generates URL-safe base64 tokens from `OsRng`
#[derive(Debug, Clone, Copy)]
pub struct OsTokenGenerator {
    bytes: usize,
}

impl OsTokenGenerator {
    pub fn new() -> Self {
        Self {
            bytes: VERIFICATION_TOKEN_BYTES,
        }
    }
}

impl Default for OsTokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenGenerator for OsTokenGenerator {
    fn generate(&self) -> Result<String, DomainError> {
        let mut buf = vec![0u8; self.bytes];
        OsRng.try_fill_bytes(&mut buf).map_err(|e| DomainError::Internal {
            message: format!("random source failed: {}", e),
        })?;
        Ok(URL_SAFE_NO_PAD.encode(&buf))
    }
}
