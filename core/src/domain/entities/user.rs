//! User entity for email/password accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity as stored by the user persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, unique across all users
    pub email: String,

    /// Display name
    pub name: String,

    /// Hex digest of the password, never the password itself
    #[serde(skip_serializing, default)]
    pub password_digest: String,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// Timestamp of successful email verification
    pub verified_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user
    ///
    /// # Arguments
    ///
    /// * `email` - The user's email address
    /// * `name` - The display name
    /// * `password_digest` - Digest of the chosen password
    /// * `now` - Creation timestamp, taken from the injected clock
    ///
    /// # Returns
    ///
    /// A new `User` instance with a fresh id
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password_digest: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            name: name.into(),
            password_digest: password_digest.into(),
            is_verified: false,
            verified_at: None,
            created_at: now,
        }
    }

    /// Marks the user's email address as verified at `at`
    pub fn mark_verified(&mut self, at: DateTime<Utc>) {
        self.is_verified = true;
        self.verified_at = Some(at);
    }

    /// Public view of the user without the password digest
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            is_verified: self.is_verified,
            verified_at: self.verified_at,
            created_at: self.created_at,
        }
    }
}

/// User data safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub is_verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
