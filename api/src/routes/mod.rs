//! HTTP route handlers

pub mod auth;
pub mod users;

use std::sync::Arc;

use ba_core::repositories::{UserRepository, VerificationTokenStore};
use ba_core::services::auth::AuthService;
use ba_core::services::registration::{Mailer, RegistrationService};

/// Application state that holds shared services
pub struct AppState<U, V, M>
where
    U: UserRepository,
    V: VerificationTokenStore,
    M: Mailer,
{
    pub registration: Arc<RegistrationService<U, V, M>>,
    pub auth: Arc<AuthService<U>>,
}

impl<U, V, M> AppState<U, V, M>
where
    U: UserRepository,
    V: VerificationTokenStore,
    M: Mailer,
{
    pub fn new(registration: Arc<RegistrationService<U, V, M>>, auth: Arc<AuthService<U>>) -> Self {
        Self { registration, auth }
    }
}
