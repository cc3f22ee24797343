//! Error types for list endpoints.
//!
//! Errors are returned as a small JSON body with a matching HTTP status:
//!
//! ```json
//! { "error": { "code": "invalid", "message": "field not allowed: password" } }
//! ```
//!
//! | Error | HTTP Status | Code |
//! |-------|-------------|------|
//! | BadRequest | 400 | invalid |
//! | InternalError | 500 | exception |

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use paginator::PaginatorError;

/// The error type for list endpoint operations.
#[derive(Debug)]
pub enum RestError {
    /// Bad request, e.g. a field rejected by the allow-list (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            RestError::BadRequest { .. } => "invalid",
            RestError::InternalError { .. } => "exception",
        }
    }

    fn message(&self) -> &str {
        match self {
            RestError::BadRequest { message } | RestError::InternalError { message } => message,
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.message()
            }
        });
        (self.status(), Json(body)).into_response()
    }
}

impl From<PaginatorError> for RestError {
    fn from(err: PaginatorError) -> Self {
        match err {
            PaginatorError::FieldNotAllowed { .. } | PaginatorError::InvalidFieldName { .. } => {
                RestError::BadRequest {
                    message: err.to_string(),
                }
            }
            // base_url comes from server configuration
            PaginatorError::InvalidUrl(_) => RestError::InternalError {
                message: err.to_string(),
            },
        }
    }
}

/// Result type alias for list endpoint operations.
pub type RestResult<T> = Result<T, RestError>;
