//! Error types for the site server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use site_core::{AdminError, ChatTurnError};
use thiserror::Error;

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum WebError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] database::DatabaseError),

    /// The resource does not exist or is switched off.
    #[error("Not found: {0}")]
    NotFound(&'static str),

    /// Admin login required.
    #[error("Admin login required")]
    Unauthenticated,

    /// The request collides with work still in progress.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AdminError> for WebError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::Unauthenticated => WebError::Unauthenticated,
            AdminError::Persistence(err) => WebError::Database(err),
            AdminError::Auth(err) => WebError::Internal(err.to_string()),
        }
    }
}

impl From<ChatTurnError> for WebError {
    fn from(err: ChatTurnError) -> Self {
        match err {
            ChatTurnError::Disabled => WebError::NotFound("chat"),
            ChatTurnError::Busy => WebError::Conflict(err.to_string()),
            ChatTurnError::EmptyInput => WebError::Conflict(err.to_string()),
            ChatTurnError::Persistence(err) => WebError::Database(err),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            WebError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
            WebError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            WebError::Unauthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
            WebError::Conflict(msg) => {
                tracing::debug!("Conflict: {}", msg);
                (StatusCode::CONFLICT, msg.clone())
            }
            WebError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, WebError>;
