//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod signing_secrets;

// Re-export commonly used types
pub use auth_response::AuthResponse;
pub use signing_secrets::SigningSecrets;
