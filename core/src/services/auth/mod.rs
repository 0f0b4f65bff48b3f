//! Authentication service module
//!
//! This module provides email/password sessions:
//! - Login with constant-time digest comparison
//! - Token pair refresh
//! - Current user lookup from an access token

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
