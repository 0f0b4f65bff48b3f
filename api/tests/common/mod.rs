//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use ba_api::AppState;
use ba_core::domain::value_objects::SigningSecrets;
use ba_core::errors::DomainError;
use ba_core::repositories::{InMemoryUserRepository, InMemoryVerificationStore};
use ba_core::services::auth::{AuthService, AuthServiceConfig};
use ba_core::services::clock::ManualClock;
use ba_core::services::registration::{
    MailMessage, Mailer, OsTokenGenerator, RegistrationService, RegistrationServiceConfig,
};
use ba_core::services::token::{TokenService, TokenServiceConfig};
use ba_shared::config::MailConfig;

pub type TestState = AppState<InMemoryUserRepository, InMemoryVerificationStore, Outbox>;

/// Mailer that keeps every message for inspection
#[derive(Default)]
pub struct Outbox {
    messages: Mutex<Vec<MailMessage>>,
}

impl Outbox {
    pub fn messages(&self) -> Vec<MailMessage> {
        self.messages.lock().unwrap().clone()
    }

    /// `token` query parameter of the most recent verification link
    pub fn last_token(&self) -> String {
        let message = self.messages().pop().expect("a mail was sent");
        let link = message
            .body
            .split_whitespace()
            .find(|word| word.starts_with("https://"))
            .expect("mail carries a link");
        url::Url::parse(link)
            .unwrap()
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .expect("link carries a token")
    }
}

#[async_trait]
impl Mailer for Outbox {
    async fn send(&self, message: &MailMessage) -> Result<(), DomainError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub outbox: Arc<Outbox>,
    pub clock: Arc<ManualClock>,
}

impl TestContext {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap()));

        let mut config = RegistrationServiceConfig::default();
        config.mail = MailConfig::new("auth.example.com", "no-reply@example.com");

        let users = Arc::new(InMemoryUserRepository::new());
        let store = Arc::new(InMemoryVerificationStore::new(clock.clone(), config.limit));
        let outbox = Arc::new(Outbox::default());

        let registration = Arc::new(RegistrationService::new(
            users.clone(),
            store,
            outbox.clone(),
            Arc::new(OsTokenGenerator::new()),
            clock.clone(),
            config,
        ));

        let secrets = SigningSecrets::new("api-test-access", "api-test-refresh").unwrap();
        let tokens = Arc::new(TokenService::new(&secrets, TokenServiceConfig::default(), clock.clone()));
        let auth = Arc::new(AuthService::new(users, tokens, AuthServiceConfig::default()));

        Self {
            state: web::Data::new(AppState::new(registration, auth)),
            outbox,
            clock,
        }
    }
}

pub const PASSWORD: &str = "Sup3r$ecret";
