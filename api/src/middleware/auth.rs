//! Bearer token extraction for protected endpoints.
//!
//! The extractor only pulls the raw token out of the `Authorization` header.
//! Signature and expiry checks happen in the token service so that every
//! token failure maps through the same domain errors.

use actix_web::{
    dev::Payload, http::header::AUTHORIZATION, http::StatusCode, FromRequest, HttpRequest,
    HttpResponse, ResponseError,
};
use std::future::{ready, Ready};

use ba_shared::errors::{error_codes, ErrorResponse};

/// Raw access token from an `Authorization: Bearer <token>` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Authorization header must use the Bearer scheme")]
    InvalidScheme,
}

impl ResponseError for BearerError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ErrorResponse::new(error_codes::UNAUTHORIZED, self.to_string()))
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &HttpRequest) -> Result<BearerToken, BearerError> {
    let value = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::InvalidScheme)?;

    value
        .strip_prefix("Bearer ")
        .map(|token| BearerToken(token.trim().to_string()))
        .ok_or(BearerError::InvalidScheme)
}

impl FromRequest for BearerToken {
    type Error = BearerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract_bearer_token(req))
    }
}
