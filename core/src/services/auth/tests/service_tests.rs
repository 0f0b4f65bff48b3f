//! Unit tests for authentication service

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::value_objects::SigningSecrets;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{InMemoryUserRepository, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::clock::{Clock, ManualClock};
use crate::services::password::digest_password;
use crate::services::token::{TokenService, TokenServiceConfig};

const EMAIL: &str = "carol@example.com";
const PASSWORD: &str = "Corr3ct!Horse";

struct Setup {
    clock: Arc<ManualClock>,
    users: Arc<InMemoryUserRepository>,
    service: AuthService<InMemoryUserRepository>,
}

async fn setup() -> (Setup, User) {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 9, 2, 10, 0, 0).unwrap()));
    let secrets = SigningSecrets::new("access-test-secret", "refresh-test-secret").unwrap();
    let tokens = Arc::new(TokenService::new(&secrets, TokenServiceConfig::default(), clock.clone()));
    let users = Arc::new(InMemoryUserRepository::new());

    let user = users
        .create(User::new(EMAIL, "Carol", digest_password(PASSWORD), clock.now()))
        .await
        .unwrap();

    let service = AuthService::new(users.clone(), tokens, AuthServiceConfig::default());
    (
        Setup {
            clock,
            users,
            service,
        },
        user,
    )
}

#[tokio::test]
async fn test_login_returns_profile_and_tokens() {
    let (s, user) = setup().await;

    let response = s.service.login("  Carol@Example.com", PASSWORD).await.unwrap();

    assert_eq!(response.user.id, user.id);
    assert!(!response.user.is_verified);
    assert_eq!(response.tokens.expires_in, 72 * 3600);
    let me = s.service.current_user(&response.tokens.access_token).await.unwrap();
    assert_eq!(me.email, EMAIL);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_the_same() {
    let (s, _) = setup().await;

    let wrong_password = s.service.login(EMAIL, "Wrong!Pass1").await.unwrap_err();
    let unknown_email = s.service.login("nobody@example.com", PASSWORD).await.unwrap_err();

    assert_eq!(wrong_password, DomainError::Auth(AuthError::InvalidCredentials));
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_refresh_issues_working_access_token() {
    let (s, user) = setup().await;
    let login = s.service.login(EMAIL, PASSWORD).await.unwrap();

    s.clock.advance(Duration::hours(80));
    let expired = s.service.current_user(&login.tokens.access_token).await.unwrap_err();
    assert_eq!(expired, DomainError::Token(TokenError::Expired));

    let pair = s.service.refresh(&login.tokens.refresh_token).await.unwrap();
    assert_eq!(s.service.current_user(&pair.access_token).await.unwrap().id, user.id);
}

#[tokio::test]
async fn test_current_user_for_deleted_user() {
    let (s, user) = setup().await;
    let login = s.service.login(EMAIL, PASSWORD).await.unwrap();

    assert!(s.users.delete(user.id).await.unwrap());

    let err = s.service.current_user(&login.tokens.access_token).await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::UserNotFound));
}

#[tokio::test]
async fn test_current_user_rejects_garbage() {
    let (s, _) = setup().await;
    assert_eq!(
        s.service.current_user("").await.unwrap_err(),
        DomainError::Token(TokenError::Empty)
    );
    assert_eq!(
        s.service.current_user(&Uuid::new_v4().to_string()).await.unwrap_err(),
        DomainError::Token(TokenError::Malformed)
    );
}
