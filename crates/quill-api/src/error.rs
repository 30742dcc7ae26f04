//! The error taxonomy shared by both services.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use quill_auth::{AuthError, TokenError};
use quill_core::StorageError;

/// Errors a handler can return.
///
/// 4xx variants carry a short stable message shown to the client. 5xx
/// variants carry operator detail that goes to logs only; the client sees
/// a generic message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed input body or query.
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input.
        message: String,
    },

    /// Missing, invalid, or expired session.
    #[error("Unauthorized")]
    Unauthorized,

    /// Login with an unknown email or a wrong password. One variant for
    /// both, so the response never reveals which part was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The resource does not exist.
    #[error("Not found")]
    NotFound,

    /// The resource does not exist, or exists but belongs to someone
    /// else. The two cases are deliberately indistinguishable.
    #[error("Not found or forbidden")]
    NotFoundOrForbidden,

    /// A uniqueness constraint was violated.
    #[error("Conflict: {message}")]
    Conflict {
        /// Stable description of the conflict.
        message: String,
    },

    /// The store or another required dependency is unreachable.
    #[error("Dependency unavailable: {message}")]
    DependencyUnavailable {
        /// Operator-facing detail.
        message: String,
    },

    /// Anything unexpected.
    #[error("Internal error: {message}")]
    Internal {
        /// Operator-facing detail.
        message: String,
    },
}

impl ApiError {
    /// Creates a new `Validation` error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new `Conflict` error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
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

    /// Returns the HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound | Self::NotFoundOrForbidden => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::DependencyUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            Self::Validation { message } => message.clone(),
            Self::Unauthorized => "unauthorized".to_string(),
            Self::InvalidCredentials => "invalid email or password".to_string(),
            Self::NotFound => "not found".to_string(),
            Self::NotFoundOrForbidden => "note not found".to_string(),
            Self::Conflict { message } => message.clone(),
            Self::DependencyUnavailable { message } => {
                tracing::error!(error = %message, "Dependency unavailable");
                "service temporarily unavailable".to_string()
            }
            Self::Internal { message } => {
                tracing::error!(error = %message, "Internal error");
                "internal server error".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFoundOrForbidden => Self::NotFoundOrForbidden,
            StorageError::Conflict { message } => Self::Conflict { message },
            StorageError::Unavailable { message } => Self::DependencyUnavailable { message },
            StorageError::Database { message } => Self::Internal { message },
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized { .. } => Self::Unauthorized,
            AuthError::Internal { message } => Self::Internal { message },
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            // Issuance failures are server-side; verification failures
            // reaching this layer still present as a plain 401.
            TokenError::Signing { message } => Self::Internal { message },
            other => {
                tracing::debug!(error = %other, "Token rejected");
                Self::Unauthorized
            }
        }
    }
}

/// Result type alias for handler bodies.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
