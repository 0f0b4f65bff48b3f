use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{validation_error, UserResponse, VerifyQuery};
use crate::handlers::error_handler::handle_domain_error;
use crate::routes::AppState;

use ba_core::repositories::{UserRepository, VerificationTokenStore};
use ba_core::services::registration::Mailer;

/// Handler for GET /api/v1/auth/verify?email=..&token=..
///
/// Target of the mailed verification link. The token is single use; a second
/// visit answers 410 Gone.
pub async fn verify<U, V, M>(
    state: web::Data<AppState<U, V, M>>,
    query: web::Query<VerifyQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationTokenStore + 'static,
    M: Mailer + 'static,
{
    if let Err(errors) = query.validate() {
        return handle_domain_error(validation_error(errors));
    }

    match state.registration.confirm(&query.email, &query.token).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse {
            user,
            message: "Email address verified".to_string(),
        }),
        Err(error) => handle_domain_error(error),
    }
}
