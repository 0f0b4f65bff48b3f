//! Application factory
//!
//! Builds the actix-web application around an already wired [`AppState`].
//! Middleware order: request tracing outermost, then CORS.

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use ba_core::repositories::{UserRepository, VerificationTokenStore};
use ba_core::services::registration::Mailer;
use ba_shared::config::CorsConfig;
use ba_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::cors::create_cors;
use crate::routes::auth::{login::login, refresh::refresh, resend::resend, signup::signup, verify::verify};
use crate::routes::users::me::me;
use crate::routes::AppState;

/// Create and configure the application with all dependencies
pub fn create_app<U, V, M>(
    app_state: web::Data<AppState<U, V, M>>,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    V: VerificationTokenStore + 'static,
    M: Mailer + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            let response = HttpResponse::BadRequest()
                .json(ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string()));
            actix_web::error::InternalError::from_response(err, response).into()
        }))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            let response = HttpResponse::BadRequest()
                .json(ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string()));
            actix_web::error::InternalError::from_response(err, response).into()
        }))
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/signup", web::post().to(signup::<U, V, M>))
                        .route("/verify", web::get().to(verify::<U, V, M>))
                        .route("/resend", web::post().to(resend::<U, V, M>))
                        .route("/login", web::post().to(login::<U, V, M>))
                        .route("/refresh", web::post().to(refresh::<U, V, M>)),
                )
                .service(web::scope("/users").route("/me", web::get().to(me::<U, V, M>))),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "basic-auth-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
