use actix_web::{web, HttpResponse};

use crate::handlers::error_handler::handle_domain_error;
use crate::middleware::auth::BearerToken;
use crate::routes::AppState;

use ba_core::repositories::{UserRepository, VerificationTokenStore};
use ba_core::services::registration::Mailer;

/// Handler for GET /api/v1/users/me
///
/// Requires `Authorization: Bearer <access token>`.
pub async fn me<U, V, M>(state: web::Data<AppState<U, V, M>>, token: BearerToken) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationTokenStore + 'static,
    M: Mailer + 'static,
{
    match state.auth.current_user(token.as_str()).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(error) => handle_domain_error(error),
    }
}
