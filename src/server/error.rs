//! HTTP error responses.

use crate::error::{TrackerError, ValidationError};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors a request handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No issue has the requested id.
    #[error("Issue not found")]
    NotFound,

    /// The request failed validation before reaching the store.
    #[error("validation failed: {0:?}")]
    Validation(Vec<ValidationError>),

    /// Internal error (should not occur in normal operation).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// - NotFound: 404 Not Found
    /// - Validation: 422 Unprocessable Entity
    /// - Internal: 500 Internal Server Error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(vec![ValidationError::new(field, message)])
    }
}

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        match err.field_errors() {
            Some(errors) => Self::Validation(errors),
            None => Self::Internal(err.to_string()),
        }
    }
}

impl From<Vec<ValidationError>> for ApiError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid("body", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid("query", rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid("id", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::NotFound => json!({ "detail": "Issue not found" }),
            Self::Validation(errors) => json!({ "detail": errors }),
            Self::Internal(message) => {
                tracing::error!(error = %message, "Request failed");
                json!({ "detail": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}
