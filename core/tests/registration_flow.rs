//! End-to-end registration and session flow over in-memory collaborators

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use ba_core::domain::value_objects::SigningSecrets;
use ba_core::errors::{DomainError, RegistrationError};
use ba_core::repositories::{InMemoryUserRepository, InMemoryVerificationStore, UserRepository};
use ba_core::services::auth::{AuthService, AuthServiceConfig};
use ba_core::services::clock::ManualClock;
use ba_core::services::registration::{
    MailMessage, Mailer, OsTokenGenerator, RegistrationService, RegistrationServiceConfig,
};
use ba_core::services::secrets::{SecretProvider, StaticSecretProvider};
use ba_core::services::token::{TokenService, TokenServiceConfig};

#[derive(Default)]
struct Outbox {
    messages: Mutex<Vec<MailMessage>>,
}

#[async_trait]
impl Mailer for Outbox {
    async fn send(&self, message: &MailMessage) -> Result<(), DomainError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Pulls the `token` query parameter out of the mailed link
fn token_from_mail(message: &MailMessage) -> String {
    let link = message
        .body
        .split_whitespace()
        .find(|word| word.starts_with("https://"))
        .expect("mail carries a link");
    let url = url::Url::parse(link).unwrap();
    url.query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .expect("link carries a token")
}

#[tokio::test]
async fn test_register_confirm_login_refresh() {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 11, 4, 9, 30, 0).unwrap()));
    let config = RegistrationServiceConfig::default();

    let users = Arc::new(InMemoryUserRepository::new());
    let store = Arc::new(InMemoryVerificationStore::new(clock.clone(), config.limit));
    let outbox = Arc::new(Outbox::default());

    let registration = RegistrationService::new(
        users.clone(),
        store.clone(),
        outbox.clone(),
        Arc::new(OsTokenGenerator::new()),
        clock.clone(),
        config,
    );

    let secrets = StaticSecretProvider::new(SigningSecrets::new("flow-access", "flow-refresh").unwrap())
        .signing_secrets()
        .unwrap();
    let tokens = Arc::new(TokenService::new(&secrets, TokenServiceConfig::default(), clock.clone()));
    let auth = AuthService::new(users.clone(), tokens, AuthServiceConfig::default());

    // Register and receive the mail
    let profile = registration
        .register("dave@example.com", "Dave", "Sup3r$ecret")
        .await
        .unwrap();
    assert!(!profile.is_verified);

    let mail = outbox.messages.lock().unwrap()[0].clone();
    let token = token_from_mail(&mail);

    // Confirm via the link
    let confirmed = registration.confirm(&mail.to, &token).await.unwrap();
    assert!(confirmed.is_verified);
    let stored = users.find_by_email("dave@example.com").await.unwrap().unwrap();
    assert!(stored.is_verified);

    // The link cannot be reused
    let reused = registration.confirm(&mail.to, &token).await.unwrap_err();
    assert_eq!(reused, DomainError::Registration(RegistrationError::TokenExpiredOrMissing));

    // Sessions
    let session = auth.login("dave@example.com", "Sup3r$ecret").await.unwrap();
    assert_eq!(session.user.id, profile.id);

    let rotated = auth.refresh(&session.tokens.refresh_token).await.unwrap();
    let me = auth.current_user(&rotated.access_token).await.unwrap();
    assert_eq!(me.email, "dave@example.com");
    assert!(me.is_verified);
}

#[test]
fn test_crate_root_reexports_resolve() {
    let limit = ba_core::GenerationLimit::default();
    assert!(limit.allows(0));

    let err: ba_core::DomainError = ba_core::RegistrationError::EmailInUse.into();
    assert_eq!(err.kind(), ba_core::ErrorKind::Conflict);
}
