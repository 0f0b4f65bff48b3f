//! Main token service implementation

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPair};
use crate::domain::value_objects::SigningSecrets;
use crate::errors::{DomainError, TokenError};
use crate::services::clock::Clock;

use super::config::TokenServiceConfig;

/// Encoding and decoding halves of one HMAC secret
struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Issues and validates HS256 session tokens
///
/// Access and refresh tokens are signed with different secrets, so each one
/// only validates in its own namespace. Expiry is checked against the
/// injected clock rather than by `jsonwebtoken`, which keeps "expired"
/// distinguishable from "malformed" and testable without waiting.
pub struct TokenService {
    config: TokenServiceConfig,
    access_keys: KeyPair,
    refresh_keys: KeyPair,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `secrets` - Access and refresh signing secrets
    /// * `config` - Token lifetimes and issuer
    /// * `clock` - Time source for `iat`/`exp` and expiry checks
    pub fn new(secrets: &SigningSecrets, config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Self {
            config,
            access_keys: KeyPair::from_secret(secrets.access()),
            refresh_keys: KeyPair::from_secret(secrets.refresh()),
            validation,
            clock,
        }
    }

    /// Issues a new access and refresh token pair for a user
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Both tokens signed
    /// * `Err(TokenError::SigningFailed)` - Either signature could not be produced
    pub fn issue_token_pair(&self, user_id: Uuid) -> Result<TokenPair, DomainError> {
        let now = self.clock.now();

        let access_claims = Claims::new(user_id, &self.config.issuer, now, self.config.access_token_expiry);
        let refresh_claims = Claims::new(user_id, &self.config.issuer, now, self.config.refresh_token_expiry);

        let access_token = self.sign(&access_claims, &self.access_keys.encoding)?;
        let refresh_token = self.sign(&refresh_claims, &self.refresh_keys.encoding)?;

        tracing::debug!(user_id = %user_id, event = "tokens_issued", "Issued session token pair");

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry.num_seconds(),
            self.config.refresh_token_expiry.num_seconds(),
        ))
    }

    /// Validates an access token and returns the user id it was issued for
    ///
    /// # Errors
    ///
    /// * `TokenError::Empty` - Input is empty
    /// * `TokenError::Malformed` - Bad structure, bad signature, wrong secret or wrong issuer
    /// * `TokenError::Expired` - Signature valid but past `exp`
    pub fn validate_access_token(&self, token: &str) -> Result<Uuid, DomainError> {
        self.validate(token, &self.access_keys.decoding)
    }

    /// Validates a refresh token against the refresh secret only
    pub fn validate_refresh_token(&self, token: &str) -> Result<Uuid, DomainError> {
        self.validate(token, &self.refresh_keys.decoding)
    }

    /// Exchanges a refresh token for a brand-new token pair
    ///
    /// Both tokens are rotated. There is no server-side revocation list, so
    /// the presented refresh token stays valid until its own expiry: anyone
    /// who captured it before rotation can keep using it until then.
    pub fn refresh_token_pair(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let user_id = self.validate_refresh_token(refresh_token)?;
        let pair = self.issue_token_pair(user_id)?;

        tracing::info!(user_id = %user_id, event = "token_refreshed", "Rotated session token pair");
        Ok(pair)
    }

    fn sign(&self, claims: &Claims, key: &EncodingKey) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, key).map_err(|e| {
            tracing::error!(error = %e, event = "token_signing_failed", "Failed to sign token");
            DomainError::Token(TokenError::SigningFailed {
                reason: e.to_string(),
            })
        })
    }

    fn validate(&self, token: &str, key: &DecodingKey) -> Result<Uuid, DomainError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Empty.into());
        }

        let data = decode::<Claims>(token, key, &self.validation).map_err(|e| match e.kind() {
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })?;

        if data.claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired.into());
        }

        data.claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::Malformed))
    }
}
