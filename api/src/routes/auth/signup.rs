use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{validation_error, SignupRequest, UserResponse};
use crate::handlers::error_handler::handle_domain_error;
use crate::routes::AppState;

use ba_core::repositories::{UserRepository, VerificationTokenStore};
use ba_core::services::registration::Mailer;

/// Handler for POST /api/v1/auth/signup
///
/// Creates an unverified user and mails the verification link.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "name": "Alice",
///     "password": "Sup3r$ecret"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "user": { "id": "...", "email": "alice@example.com", "is_verified": false, ... },
///     "message": "Verification email sent"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid email, empty name or weak password
/// - 409 Conflict: Email address already registered
/// - 429 Too Many Requests: Verification token limit reached
/// - 503 Service Unavailable: User store, verification store or mailer down
pub async fn signup<U, V, M>(
    state: web::Data<AppState<U, V, M>>,
    request: web::Json<SignupRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationTokenStore + 'static,
    M: Mailer + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_domain_error(validation_error(errors));
    }

    match state
        .registration
        .register(&request.email, &request.name, &request.password)
        .await
    {
        Ok(user) => HttpResponse::Created().json(UserResponse {
            user,
            message: "Verification email sent".to_string(),
        }),
        Err(error) => handle_domain_error(error),
    }
}
