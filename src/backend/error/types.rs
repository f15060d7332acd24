/**
 * API Error Types
 *
 * Error type for the HTTP layer. Wraps domain failures and adds the
 * request-shape errors only a handler can detect (missing parameters,
 * malformed bodies). Every variant maps to an HTTP status code, mirroring
 * the domain taxonomy: validation -> 400, not-found -> 404, conflict -> 409.
 */
use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::error::DomainError;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request-shape error detected in a handler.
    #[error("{message}")]
    Handler {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Domain failure from the service or store.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// JSON serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Create a handler error with an explicit status code.
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Handler {
            status,
            message: message.into(),
        }
    }

    /// Shorthand for a 400 handler error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// The HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Handler { status, .. } => *status,
            Self::Domain(err) if err.is_validation() => StatusCode::BAD_REQUEST,
            Self::Domain(DomainError::UsernameExists) => StatusCode::CONFLICT,
            // Everything else in the domain taxonomy is a not-found
            Self::Domain(_) => StatusCode::NOT_FOUND,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The error message for the response body.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
