//! Domain entities representing core business objects.

pub mod token;
pub mod user;
pub mod verification;

// Re-export commonly used types
pub use token::{
    Claims, TokenPair, ACCESS_TOKEN_EXPIRY_HOURS, REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use user::{User, UserProfile};
pub use verification::{
    GenerationLimit, RegistrationState, DEFAULT_GENERATION_WINDOW_SECS,
    DEFAULT_MAX_GENERATIONS, DEFAULT_VERIFICATION_TTL_SECS, VERIFICATION_TOKEN_BYTES,
};
