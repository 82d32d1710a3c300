use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorEnvelope;
use common::validation::FieldError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

const INTERNAL_MESSAGE: &str = "Something went wrong, please try again later.";

/// Every handler and extractor failure ends up here; this is the only place
/// that picks an HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("input validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self { Self::Validation(errors) }
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self { Self::NotFound(message.into()) }

    fn envelope(self) -> (StatusCode, ErrorEnvelope) {
        let (status, message, kind, errors) = match self {
            ApiError::Validation(errs) => (StatusCode::BAD_REQUEST, "Validation failed.".to_string(), "INPUT_VALIDATION_ERROR", Some(errs)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND", None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, "UNAUTHORIZED", None),
            ApiError::Service(e) => {
                let kind = e.kind();
                match e {
                    ServiceError::Validation(errs) => (StatusCode::BAD_REQUEST, "Validation failed.".to_string(), kind, Some(errs)),
                    ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, kind, None),
                    ServiceError::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid email or password.".to_string(), kind, None),
                    other => {
                        let source = std::error::Error::source(&other).map(|s| s.to_string());
                        error!(kind, error = %other, source = ?source, "request failed");
                        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string(), kind, None)
                    }
                }
            }
        };
        (status, ErrorEnvelope { status: status.as_u16(), message, kind: kind.to_string(), errors })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.envelope();
        if status.is_client_error() {
            warn!(status = status.as_u16(), kind = %body.kind, "request rejected");
        }
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
