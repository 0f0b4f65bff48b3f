//! Cache module for Redis-based storage
//!
//! This module provides the Redis client and the verification token store
//! built on it.

pub mod redis_client;
pub mod verification_store;


pub use redis_client::RedisClient;
pub use verification_store::{ledger_key, log_key, token_key, RedisVerificationStore};

// Re-export commonly used types
pub use ba_shared::config::CacheConfig;
