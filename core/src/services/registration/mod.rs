//! Registration service module for email/password sign-up
//!
//! This module provides the email verification workflow:
//! - Sign-up with rate limiting ahead of any side effect
//! - Compensating deletion of the new user when token issuance fails
//! - Single-use verification token confirmation
//! - Token reissue ("resend") that supersedes the live token
//! - Verification mail composition and delivery

mod config;
mod generator;
mod service;
mod traits;
mod types;


pub use config::RegistrationServiceConfig;
pub use generator::OsTokenGenerator;
pub use service::RegistrationService;
pub use traits::{Mailer, TokenGenerator};
pub use types::{MailMessage, SignupResult};
