// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.
//!
//! Status precedence across controller operations is fixed:
//! 401 -> 400 -> 404 -> 403 -> success.

use crate::middleware::auth::AuthErrorCode;
use crate::services::validator::SchemaViolation;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized(Option<AuthErrorCode>),

    #[error("Request payload failed schema validation")]
    Validation(Vec<SchemaViolation>),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// JSON body for schema validation failures: always a structured list,
/// never a freeform string.
#[derive(Serialize)]
struct ValidationResponse<'a> {
    errors: &'a [SchemaViolation],
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized(code) => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                code.as_ref().map(|c| c.to_string()),
            ),
            AppError::Validation(violations) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationResponse { errors: violations }),
                )
                    .into_response();
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
