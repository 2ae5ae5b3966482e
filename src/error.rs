//! Error types for Quillpost.

use thiserror::Error;

/// Common error type for Quillpost.
#[derive(Error, Debug)]
pub enum BlogError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant with their message.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for BlogError {
    fn from(e: sqlx::Error) -> Self {
        BlogError::Database(e.to_string())
    }
}

/// Result type alias for Quillpost operations.
pub type Result<T> = std::result::Result<T, BlogError>;
