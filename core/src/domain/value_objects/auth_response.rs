//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{TokenPair, UserProfile};

/// Authentication response returned after a successful login
///
/// Carries the public user view together with a freshly issued token pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// The authenticated user
    pub user: UserProfile,

    /// Newly issued session tokens
    #[serde(flatten)]
    pub tokens: TokenPair,
}

impl AuthResponse {
    pub fn new(user: UserProfile, tokens: TokenPair) -> Self {
        Self { user, tokens }
    }
}
