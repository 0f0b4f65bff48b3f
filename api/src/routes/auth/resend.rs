use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{validation_error, MessageResponse, ResendRequest};
use crate::handlers::error_handler::handle_domain_error;
use crate::routes::AppState;

use ba_core::repositories::{UserRepository, VerificationTokenStore};
use ba_core::services::registration::Mailer;

/// Handler for POST /api/v1/auth/resend
///
/// Issues a fresh verification token, superseding the live one, and mails
/// it. Counts toward the same generation limit as sign-up.
///
/// ## Errors
/// - 400 Bad Request: Address already verified
/// - 404 Not Found: No user with this address
/// - 429 Too Many Requests: Verification token limit reached
pub async fn resend<U, V, M>(
    state: web::Data<AppState<U, V, M>>,
    request: web::Json<ResendRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationTokenStore + 'static,
    M: Mailer + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_domain_error(validation_error(errors));
    }

    match state.registration.resend(&request.email).await {
        Ok(()) => HttpResponse::Accepted().json(MessageResponse::new("Verification email sent")),
        Err(error) => handle_domain_error(error),
    }
}
