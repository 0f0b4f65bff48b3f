use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{validation_error, LoginRequest};
use crate::handlers::error_handler::handle_domain_error;
use crate::routes::AppState;

use ba_core::repositories::{UserRepository, VerificationTokenStore};
use ba_core::services::registration::Mailer;

/// Handler for POST /api/v1/auth/login
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "user": { "id": "...", "email": "alice@example.com", ... },
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "expires_in": 259200,
///     "refresh_expires_in": 604800
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Unknown email or wrong password, reported identically
pub async fn login<U, V, M>(
    state: web::Data<AppState<U, V, M>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationTokenStore + 'static,
    M: Mailer + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_domain_error(validation_error(errors));
    }

    match state.auth.login(&request.email, &request.password).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => handle_domain_error(error),
    }
}
