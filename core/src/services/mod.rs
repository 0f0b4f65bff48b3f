//! Business services containing domain logic and use cases.

pub mod auth;
pub mod clock;
pub mod deadline;
pub mod password;
pub mod registration;
pub mod secrets;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use clock::{Clock, ManualClock, SystemClock};
pub use deadline::with_deadline;
pub use registration::{
    MailMessage, Mailer, OsTokenGenerator, RegistrationService, RegistrationServiceConfig,
    SignupResult, TokenGenerator,
};
pub use secrets::{SecretProvider, StaticSecretProvider};
pub use token::{TokenService, TokenServiceConfig};
