//! Lead store error types.

use thiserror::Error;

/// Errors that can occur when reading or writing lead rows.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The credentials were rejected (401/403).
    #[error("unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// An update matched no lead row.
    #[error("lead not found: {0}")]
    NotFound(String),

    /// Failed to parse a backend response or fixture file.
    #[error("parse error: {0}")]
    Parse(String),

    /// Reading a fixture file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The client could not be built from the given settings.
    #[error("invalid store configuration: {0}")]
    Config(String),
}
