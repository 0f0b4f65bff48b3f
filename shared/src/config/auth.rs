//! Session token configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Default access token lifetime: 72 hours
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 72 * 3600;

/// Default refresh token lifetime: 7 days
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 7 * 86400;

/// JWT lifetimes and issuer claim
///
/// The signing secrets are not part of this struct; see the secret provider
/// in the infrastructure crate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
            issuer: String::from("basic-auth"),
        }
    }
}

impl JwtConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_token_expiry: env_or("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry),
            refresh_token_expiry: env_or("JWT_REFRESH_TOKEN_EXPIRY", defaults.refresh_token_expiry),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }

    /// Set access token expiry in hours
    pub fn with_access_expiry_hours(mut self, hours: i64) -> Self {
        self.access_token_expiry = hours * 3600;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }
}
