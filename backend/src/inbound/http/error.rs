//! HTTP error payloads and mapping from domain errors.
//!
//! Keep the domain free of transport concerns by translating [`Error`]
//! into Actix responses here. Not-found responses carry an empty body
//! because clients compare bodies byte for byte; internal errors are
//! redacted so persistence detail never reaches the client.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Transport wrapper around the domain error, carrying the HTTP mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError(Error);

/// JSON envelope emitted for 400 responses.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: ErrorCode,
    message: &'a str,
}

impl ApiError {
    /// The wrapped domain error.
    pub fn inner(&self) -> &Error {
        &self.0
    }

    fn to_status_code(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        match self.0.code() {
            // Absence has no representation; clients byte-compare bodies.
            ErrorCode::NotFound => HttpResponse::NotFound().finish(),
            ErrorCode::InvalidRequest => HttpResponse::BadRequest().json(ErrorBody {
                code: ErrorCode::InvalidRequest,
                message: self.0.message(),
            }),
            ErrorCode::InternalError => {
                error!(error = %self.0, "request failed with internal error");
                HttpResponse::InternalServerError().json(ErrorBody {
                    code: ErrorCode::InternalError,
                    message: "internal error",
                })
            }
        }
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
