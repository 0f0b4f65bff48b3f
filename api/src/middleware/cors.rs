//! CORS middleware configuration for cross-origin requests.
//!
//! Origins come from [`CorsConfig`]. A `*` entry allows any origin, which is
//! what development uses; production lists its web origins explicitly.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ba_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// Credentials are only supported with an explicit origin list.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("Configuring CORS for any origin");
        return cors.allow_any_origin();
    }

    for origin in &config.allowed_origins {
        tracing::info!(origin = %origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
