//! Token service module for JWT session management
//!
//! This module handles:
//! - Issuing access and refresh token pairs signed with separate secrets
//! - Access token validation with distinct empty/malformed/expired failures
//! - Refresh token rotation

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
