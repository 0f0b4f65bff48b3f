//! Signing secret providers

pub mod env_provider;

pub use env_provider::{EnvSecretProvider, ACCESS_SECRET_VAR, REFRESH_SECRET_VAR};
