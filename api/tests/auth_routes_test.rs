//! Integration tests for the registration and session endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use ba_api::create_app;
use ba_shared::config::CorsConfig;

use common::{TestContext, PASSWORD};

macro_rules! app {
    ($ctx:expr) => {
        test::init_service(create_app($ctx.state.clone(), &CorsConfig::development())).await
    };
}

fn signup_body(email: &str) -> Value {
    json!({ "email": email, "name": "Alice", "password": PASSWORD })
}

#[actix_web::test]
async fn test_signup_creates_unverified_user_and_sends_mail() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(signup_body("  Alice@Example.com "))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["is_verified"], false);
    assert!(body["user"].get("password_digest").is_none());

    let messages = ctx.outbox.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].to, "alice@example.com");
    assert_eq!(messages[0].subject, "Registration Verification Email at auth.example.com");
}

#[actix_web::test]
async fn test_signup_weak_password_reports_field_errors() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({ "email": "bob@example.com", "name": "Bob", "password": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["fields"]["password"].is_array());
    assert!(ctx.outbox.messages().is_empty());
}

#[actix_web::test]
async fn test_signup_empty_name_is_rejected_before_the_service() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({ "email": "bob@example.com", "name": "", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["fields"]["name"][0], "name must be 1 to 100 characters");
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_duplicate_signup_is_conflict() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .set_json(signup_body("carol@example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);

        if expected == StatusCode::CONFLICT {
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "EMAIL_IN_USE");
        }
    }
    assert_eq!(ctx.outbox.messages().len(), 1);
}

#[actix_web::test]
async fn test_verify_link_is_single_use() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(signup_body("dave@example.com"))
        .to_request();
    test::call_service(&app, req).await;
    let token = ctx.outbox.last_token();

    let uri = format!("/api/v1/auth/verify?email=dave%40example.com&token={}", token);

    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["is_verified"], true);

    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::GONE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VERIFICATION_TOKEN_EXPIRED");
}

#[actix_web::test]
async fn test_verify_with_wrong_token_is_rejected() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(signup_body("erin@example.com"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/verify?email=erin%40example.com&token=not-the-token")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VERIFICATION_TOKEN_MISMATCH");
}

#[actix_web::test]
async fn test_verify_after_ttl_is_gone() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(signup_body("frank@example.com"))
        .to_request();
    test::call_service(&app, req).await;
    let token = ctx.outbox.last_token();

    ctx.clock.advance(chrono::Duration::seconds(600));

    let uri = format!("/api/v1/auth/verify?email=frank%40example.com&token={}", token);
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::GONE);
}

#[actix_web::test]
async fn test_verify_without_token_parameter_is_bad_request() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/verify?email=frank%40example.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_resend_supersedes_previous_token() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(signup_body("gina@example.com"))
        .to_request();
    test::call_service(&app, req).await;
    let first = ctx.outbox.last_token();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/resend")
        .set_json(json!({ "email": "gina@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let second = ctx.outbox.last_token();
    assert_ne!(first, second);

    let uri = format!("/api/v1/auth/verify?email=gina%40example.com&token={}", first);
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let uri = format!("/api/v1/auth/verify?email=gina%40example.com&token={}", second);
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_resend_for_unknown_user_is_not_found() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/resend")
        .set_json(json!({ "email": "nobody@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "USER_NOT_FOUND");
}

#[actix_web::test]
async fn test_sixth_generation_in_a_day_is_rate_limited() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(signup_body("hank@example.com"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    // Sign-up used one of the five
    for _ in 0..4 {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/resend")
            .set_json(json!({ "email": "hank@example.com" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::ACCEPTED);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/resend")
        .set_json(json!({ "email": "hank@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "RATE_LIMIT_EXCEEDED");
    assert_eq!(body["details"]["max"], 5);
    assert_eq!(body["details"]["window_hours"], 24);
    assert_eq!(ctx.outbox.messages().len(), 5);
}

#[actix_web::test]
async fn test_login_and_refresh() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(signup_body("ivy@example.com"))
        .to_request();
    test::call_service(&app, req).await;

    // Verification is not required to log in
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "IVY@example.com", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "ivy@example.com");
    assert_eq!(body["expires_in"], 72 * 3600);
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();
    let access_token = body["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": refresh_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_ne!(body["refresh_token"].as_str().unwrap(), refresh_token);

    // Access tokens are signed with a different secret
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": access_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_INVALID");
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(signup_body("jack@example.com"))
        .to_request();
    test::call_service(&app, req).await;

    let attempts = [
        json!({ "email": "jack@example.com", "password": "Wr0ng$password" }),
        json!({ "email": "nobody@example.com", "password": PASSWORD }),
    ];

    for attempt in attempts {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(attempt)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "INVALID_CREDENTIALS");
        assert_eq!(body["message"], "Invalid email or password");
    }
}
