//! Error types for the carelens server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A persistence or search dependency failed. The message is the
    /// endpoint's public, generic description and is safe to return.
    #[error("{0}")]
    Dependency(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Collapse internal failures into a generic public message for one
    /// endpoint, logging the original error. Client-facing variants
    /// (validation, not-found, unauthorized) pass through untouched.
    pub fn or_internal(self, public_message: &str) -> Error {
        match self {
            Error::Validation(_) | Error::NotFound(_) | Error::Unauthorized(_) => self,
            other => {
                tracing::error!(error = %other, "{public_message}");
                Error::Dependency(public_message.to_string())
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Error::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Error::Dependency(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Error::Database(_) | Error::Internal(_) | Error::Other(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}
