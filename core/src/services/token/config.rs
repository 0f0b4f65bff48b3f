//! Configuration for the token service

use ba_shared::config::JwtConfig;
use chrono::Duration;

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_HOURS, REFRESH_TOKEN_EXPIRY_DAYS};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Access token lifetime
    pub access_token_expiry: Duration,
    /// Refresh token lifetime
    pub refresh_token_expiry: Duration,
    /// Issuer claim written into and required on every token
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_token_expiry: Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS),
            refresh_token_expiry: Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
            issuer: "basic-auth".to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            access_token_expiry: Duration::seconds(config.access_token_expiry),
            refresh_token_expiry: Duration::seconds(config.refresh_token_expiry),
            issuer: config.issuer.clone(),
        }
    }
}
