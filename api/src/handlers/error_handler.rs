//! Domain error to HTTP response mapping

use actix_web::{http::StatusCode, HttpResponse};

use ba_core::errors::{DomainError, ErrorKind, RegistrationError, TokenError};

/// HTTP status for a domain error
///
/// An expired or missing verification token is 410 so clients can offer a
/// resend. Every session token failure other than signing is a plain 401.
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Registration(RegistrationError::TokenExpiredOrMissing) => StatusCode::GONE,
        DomainError::Token(TokenError::SigningFailed { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        _ => match error.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized | ErrorKind::InvalidToken => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Expired => StatusCode::GONE,
            ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::DependencyUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
            ErrorKind::Signing | ErrorKind::PartialFailure | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let status = status_for(&error);

    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), code = error.code(), error = %error, "Request failed");
    } else {
        tracing::debug!(status = status.as_u16(), code = error.code(), "Request rejected");
    }

    HttpResponse::build(status).json(error.to_error_response())
}
