//! Authentication error type and its HTTP mapping.

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Errors surfaced by the access mediator.
///
/// Every verification failure — token absent, malformed, expired, bad
/// signature — collapses into `Unauthorized` with one stable client
/// message. The sub-reason is logged where it is detected, not here.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The request lacks a valid session.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Stable, non-identifying description.
        message: String,
    },

    /// An unexpected internal failure during authentication.
    #[error("Internal error: {message}")]
    Internal {
        /// Operator-facing description; never sent to the client.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `Unauthorized` error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized { message } => {
                let mut headers = HeaderMap::new();
                headers.insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static("Bearer realm=\"quill\""),
                );
                (
                    StatusCode::UNAUTHORIZED,
                    headers,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
            Self::Internal { message } => {
                tracing::error!(error = %message, "Internal authentication failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
