//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Redis configuration for the verification token store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Number of connection attempts made at startup
    #[serde(default = "default_connect_attempts")]
    pub connect_attempts: u32,

    /// Optional prefix prepended to every key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            connect_attempts: default_connect_attempts(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let key_prefix = std::env::var("REDIS_KEY_PREFIX")
            .ok()
            .filter(|prefix| !prefix.is_empty());

        Self {
            url,
            connection_timeout: env_or("REDIS_CONNECTION_TIMEOUT", 5),
            connect_attempts: env_or("REDIS_CONNECT_ATTEMPTS", default_connect_attempts()),
            key_prefix,
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_connect_attempts() -> u32 {
    3
}
