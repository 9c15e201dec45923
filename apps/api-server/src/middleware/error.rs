//! Error mapping at the HTTP boundary.
//!
//! Domain operations return typed errors; this is the single place where
//! they are matched onto status codes. Every body has the shape
//! `{"error": <message>}`.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use quill_core::error::DomainError;
use quill_shared::ErrorBody;

/// Application-level error type for handler results.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::PostNotFound { .. } => AppError::NotFound(message),
            DomainError::InvalidData(_) => AppError::BadRequest(message),
            DomainError::DuplicateUser => AppError::BadRequest(message),
            DomainError::InvalidCredentials => AppError::Unauthorized(message),
            DomainError::Internal(_) => AppError::Internal(message),
        }
    }
}

/// Remap actix's JSON deserialization failures onto the `{"error": ...}`
/// shape.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid input format: {err}")).into()
}

/// Remap query-string deserialization failures (e.g. non-integer `page`)
/// onto the `{"error": ...}` shape.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid query parameters: {err}")).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
