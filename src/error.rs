//! Error types for Chirpy.

use thiserror::Error;

use crate::auth::{PasswordError, TokenError};

/// Common error type for Chirpy.
#[derive(Error, Debug)]
pub enum ChirpyError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Password hashing or verification error.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Token issuance or validation error.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// A unique constraint was violated.
    #[error("{0} already exists")]
    Conflict(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for ChirpyError {
    fn from(e: sqlx::Error) -> Self {
        ChirpyError::Database(e.to_string())
    }
}

/// Result type alias for Chirpy operations.
pub type Result<T> = std::result::Result<T, ChirpyError>;
