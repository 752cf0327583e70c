//! HTTP error types for TubeMagic Hub.
//!
//! JSON endpoints return an [`AppError`], which always produces a body with
//! a machine-readable `error` field and a human-readable `message`. The
//! hosting page never uses this path: a failed run is rendered as a banner.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use tubemagic_core::error::LaunchError;

/// Application-level error returned from JSON handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Requested resource not found.
    #[error("{0}")]
    NotFound(String),
    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl AppError {
    /// Status code this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, message) = match self {
            Self::NotFound(msg) => ("not_found", msg),
            Self::Internal(msg) => ("internal_error", msg),
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<LaunchError> for AppError {
    fn from(err: LaunchError) -> Self {
        match err {
            LaunchError::MissingPage { .. } => Self::NotFound(err.to_string()),
            LaunchError::Secrets(_) | LaunchError::Page(_) => Self::Internal(err.to_string()),
        }
    }
}

/// Status code for the hosting page of a failed run.
#[must_use]
pub fn launch_status(err: &LaunchError) -> StatusCode {
    if err.is_missing_page() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
