//! # BasicAuth Core
//!
//! Core business logic and domain layer for the BasicAuth backend.
//! This crate contains domain entities, the session token codec, the
//! registration workflow, collaborator traits and error types. Concrete
//! stores, mail delivery and secret loading live in `ba_infra`.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::{AuthResponse, Claims, GenerationLimit, SigningSecrets, TokenPair, User, UserProfile};
pub use errors::{AuthError, DomainError, DomainResult, ErrorKind, RegistrationError, TokenError};
pub use repositories::{UserRepository, VerificationTokenStore};
pub use services::{AuthService, Clock, RegistrationService, TokenService};
