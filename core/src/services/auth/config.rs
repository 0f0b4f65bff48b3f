//! Configuration for the authentication service

use std::time::Duration;

use ba_shared::config::DatabaseConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Deadline for each user store call
    pub query_timeout: Duration,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            query_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&DatabaseConfig> for AuthServiceConfig {
    fn from(database: &DatabaseConfig) -> Self {
        Self {
            query_timeout: Duration::from_secs(database.query_timeout),
        }
    }
}
