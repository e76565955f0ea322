//! Error types for repertorio
//!
//! One crate-wide error type using thiserror, mapped onto HTTP responses
//! so handlers can propagate with `?`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the repertoire service
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or empty required field, or an unparseable path id (400)
    #[error("Invalid request: {0}")]
    Validation(String),

    /// A song with the same titulo/artista/tono already exists (400)
    #[error("Duplicate song: {0}")]
    Duplicate(String),

    /// No song with the requested id (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// File I/O errors from the persisted store (500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or parse errors from the persisted store (500)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Duplicate(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Error::Storage(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Convenience Result type using the repertorio Error
pub type Result<T> = std::result::Result<T, Error>;
