//! Email verification token constants, generation limit and registration states.

use std::fmt;
use std::time::Duration;

/// Random bytes behind each verification token
pub const VERIFICATION_TOKEN_BYTES: usize = 64;

/// Verification token lifetime when none is configured
pub const DEFAULT_VERIFICATION_TTL_SECS: u64 = 600;

/// Tokens an address may be issued per window
pub const DEFAULT_MAX_GENERATIONS: u32 = 5;

/// Rolling window of the generation ledger
pub const DEFAULT_GENERATION_WINDOW_SECS: u64 = 86_400;

/// Ceiling on verification token issuance per address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationLimit {
    pub max_per_window: u32,
    pub window: Duration,
}

impl Default for GenerationLimit {
    fn default() -> Self {
        Self {
            max_per_window: DEFAULT_MAX_GENERATIONS,
            window: Duration::from_secs(DEFAULT_GENERATION_WINDOW_SECS),
        }
    }
}

impl GenerationLimit {
    pub fn new(max_per_window: u32, window: Duration) -> Self {
        Self {
            max_per_window,
            window,
        }
    }

    /// Oldest ledger score, in unix seconds, still inside the window at `now`.
    ///
    /// An entry counts iff `score > now - window`, so an entry exactly one
    /// window old has already expired.
    pub fn window_start(&self, now_secs: i64) -> i64 {
        now_secs - self.window.as_secs() as i64
    }

    /// Window length in whole hours, for error messages
    pub fn window_hours(&self) -> u64 {
        self.window.as_secs() / 3600
    }

    /// Whether `count` prior generations still allow another one
    pub fn allows(&self, count: u64) -> bool {
        count < u64::from(self.max_per_window)
    }
}

/// States of a single registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Requested,
    UserCreated,
    TokenIssued,
    Verified,
    Expired,
    RateLimited,
    RolledBack,
}

impl RegistrationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationState::Requested => "requested",
            RegistrationState::UserCreated => "user_created",
            RegistrationState::TokenIssued => "token_issued",
            RegistrationState::Verified => "verified",
            RegistrationState::Expired => "expired",
            RegistrationState::RateLimited => "rate_limited",
            RegistrationState::RolledBack => "rolled_back",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RegistrationState::Verified
                | RegistrationState::Expired
                | RegistrationState::RateLimited
                | RegistrationState::RolledBack
        )
    }
}

impl fmt::Display for RegistrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
