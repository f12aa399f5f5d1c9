//! Gateway error types and their HTTP renderings.
//!
//! Error bodies carry `{error, details?}`; rejected MFA codes additionally
//! carry `success: false` so clients can branch on one field for both the
//! happy and unhappy paths of a verification call.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// An error response produced by a REST handler.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status to respond with
    pub status: StatusCode,
    /// Client-facing error message
    pub error: String,
    /// Optional diagnostic detail (internal failures only)
    pub details: Option<String>,
}

impl ApiError {
    /// 400: the request body or query string is malformed
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
            details: None,
        }
    }

    /// 401: a verification code was rejected
    pub fn unauthorized(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: error.into(),
            details: None,
        }
    }

    /// 500: a subsystem failed internally
    pub fn internal(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = if self.status == StatusCode::UNAUTHORIZED {
            json!({
                "success": false,
                "error": self.error,
            })
        } else {
            match self.details {
                Some(details) => json!({ "error": self.error, "details": details }),
                None => json!({ "error": self.error }),
            }
        };
        (self.status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.status, self.error)
    }
}

impl std::error::Error for ApiError {}

/// Gateway-level errors (startup and configuration, not per-request)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server runtime error
    #[error("server error: {0}")]
    Serve(String),
}
