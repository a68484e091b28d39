//! Response types and error handling for API endpoints
//!
//! Every response, success or failure, is the `{code, message, data}`
//! envelope, and the HTTP status equals `code`.

use account_common::{AppError, ErrorResponse};
use account_core::DomainError;
use account_service::dto::ApiResponse;
use account_service::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidPath(String),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("{0}")]
    InvalidBody(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

/// Message of the first failing field in `order`; fields not listed there
/// follow by name
fn first_validation_message(errors: &ValidationErrors, order: &[&str]) -> String {
    let failing = errors.field_errors();
    let mut unlisted: Vec<&str> = failing
        .keys()
        .map(|name| &**name)
        .filter(|name| !order.contains(name))
        .collect();
    unlisted.sort_unstable();

    order
        .iter()
        .copied()
        .chain(unlisted)
        .find_map(|name| {
            let error = failing.get(name)?.first()?;
            Some(
                error
                    .message
                    .as_ref()
                    .map_or_else(|| format!("{name} is invalid"), ToString::to_string),
            )
        })
        .unwrap_or_else(|| "invalid request".to_string())
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::App(e) => e.status_code(),
            Self::Service(e) => e.status_code(),
            Self::Domain(e) => e.status_code(),
            Self::Validation(_) | Self::InvalidPath(_) | Self::InvalidQuery(_) | Self::InvalidBody(_) => 400,
            Self::Internal(_) => 500,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidQuery(_) => "INVALID_QUERY_PARAMETER",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Validation failure reported by its first failing field in `order`
    pub fn validation(errors: &ValidationErrors, order: &[&str]) -> Self {
        Self::Validation(first_validation_message(errors, order))
    }

    /// Create an invalid path error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create an invalid query error
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create an invalid body error
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            error!(error = ?self, code = self.error_code(), "Server error occurred");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse::new(status.as_u16(), message))).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Successful envelope response (200)
pub struct Envelope<T>(pub ApiResponse<T>);

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self(ApiResponse::new(data))
    }
}

impl Envelope<String> {
    /// Confirmation whose data is a short human-readable note
    pub fn confirm(note: &str) -> Self {
        Self::ok(note.to_string())
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}
