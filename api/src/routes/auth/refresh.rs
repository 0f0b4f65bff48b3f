use actix_web::{web, HttpResponse};

use crate::dto::RefreshRequest;
use crate::handlers::error_handler::handle_domain_error;
use crate::routes::AppState;

use ba_core::repositories::{UserRepository, VerificationTokenStore};
use ba_core::services::registration::Mailer;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new access and refresh pair.
///
/// ## Errors
/// - 401 Unauthorized: Empty, malformed or expired refresh token, or an
///   access token presented in its place
pub async fn refresh<U, V, M>(
    state: web::Data<AppState<U, V, M>>,
    request: web::Json<RefreshRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationTokenStore + 'static,
    M: Mailer + 'static,
{
    match state.auth.refresh(&request.refresh_token).await {
        Ok(tokens) => HttpResponse::Ok().json(tokens),
        Err(error) => handle_domain_error(error),
    }
}
