//! Types for the registration service

use serde::Serialize;

use crate::domain::entities::user::UserProfile;

/// A plain-text mail message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Result of a successful sign-up
#[derive(Debug, Clone)]
pub struct SignupResult {
    /// The newly created, unverified user
    pub user: UserProfile,
    /// Verification token to embed in the delivered link
    pub token: String,
}
