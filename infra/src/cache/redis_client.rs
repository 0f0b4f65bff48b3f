//! Redis cache client implementation
//!
//! This module provides a Redis client with a multiplexed connection, startup
//! retry logic and the handful of commands the verification store needs:
//! string keys with expiry and sorted-set sliding windows.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::CacheConfig;
use crate::InfrastructureError;

/// Base delay between connection attempts (exponential backoff)
const RETRY_DELAY_MS: u64 = 100;

/// Attempts made for idempotent commands
const MAX_COMMAND_ATTEMPTS: u32 = 2;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis cache client with a shared multiplexed connection
///
/// Cloning is cheap; clones share the same underlying connection. Dropping an
/// in-flight command future does not poison the connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// Connects eagerly, retrying up to `config.connect_attempts` times with
    /// exponential backoff.
    ///
    /// # Example
    /// ```no_run
    /// use ba_infra::cache::{CacheConfig, RedisClient};
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(CacheConfig::new("redis://localhost:6379")).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(&client, &config).await?;

        info!("Redis client created successfully");
        Ok(Self { connection, config })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: &Client,
        config: &CacheConfig,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let max_attempts = config.connect_attempts.max(1);
        let timeout = Duration::from_secs(config.connection_timeout);
        let mut attempts = 0;
        let mut delay = RETRY_DELAY_MS;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = match tokio::time::timeout(timeout, client.get_multiplexed_async_connection()).await {
                Ok(result) => result,
                Err(_) => Err(RedisError::from(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "connection attempt timed out",
                ))),
            };

            match result {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_attempts => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_attempts, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Apply the configured key prefix
    pub fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    // Keys embed email addresses, so they stay out of these log lines

    /// Set a value with expiration time, replacing any existing value
    pub async fn set_with_expiry(&self, key: &str, value: &str, expiry_seconds: u64) -> Result<(), InfrastructureError> {
        debug!(expiry_seconds, "Setting value with expiry");

        let key = key.to_string();
        let value = value.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key.clone();
            let value = value.clone();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Get a value, `None` when the key is absent or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Getting value");

        let key = key.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Delete a key, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Deleting key");

        let key = key.to_string();
        let deleted = self
            .execute_with_retry(move |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await
            .map_err(InfrastructureError::Cache)?;
        Ok(deleted > 0)
    }

    /// Add `member` at `score` to a sorted-set window and drop members with
    /// `score <= prune_up_to`, in one atomic pipeline
    ///
    /// The key expires `ttl_seconds` after the last write. Not retried: a
    /// retry after an ambiguous failure could record the member twice.
    pub async fn record_in_window(
        &self,
        key: &str,
        member: &str,
        score: i64,
        prune_up_to: i64,
        ttl_seconds: i64,
    ) -> Result<(), InfrastructureError> {
        debug!(score, "Recording window entry");

        let mut conn = self.connection.clone();
        redis::pipe()
            .atomic()
            .zadd(key, member, score)
            .ignore()
            .zrembyscore(key, "-inf", prune_up_to)
            .ignore()
            .expire(key, ttl_seconds)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| {
                error!("Failed to record window entry: {}", e);
                InfrastructureError::Cache(e)
            })
    }

    /// Count sorted-set members with `score > after`
    pub async fn count_after(&self, key: &str, after: i64) -> Result<u64, InfrastructureError> {
        let key = key.to_string();
        let min = format!("({}", after);
        self.execute_with_retry(move |mut conn| {
            let key = key.clone();
            let min = min.clone();
            Box::pin(async move { conn.zcount::<_, _, _, u64>(key, min, "+inf").await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Check if the Redis connection is healthy
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let response: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(InfrastructureError::Cache)?;
        Ok(response == "PONG")
    }

    /// Execute an idempotent Redis command, retrying transient failures
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;

        loop {
            attempts += 1;
            match operation(self.connection.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < MAX_COMMAND_ATTEMPTS && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying...",
                        attempts, MAX_COMMAND_ATTEMPTS, e
                    );
                    sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
                }
                Err(e) => {
                    error!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }
}

/// Whether a Redis error is worth retrying
pub fn is_retriable_error(error: &RedisError) -> bool {
    error.is_io_error() || error.is_connection_dropped() || error.is_timeout()
}

/// Hide credentials in a Redis URL for logging
pub fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}****{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}
