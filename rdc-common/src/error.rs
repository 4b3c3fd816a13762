//! Common error types for the intake workspace

use crate::participant::FieldViolation;
use thiserror::Error;

/// Common result type for intake operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared between the intake service and its callers
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Submission body could not be parsed at all
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Participant schema validation failed; carries every violated field
    #[error("Invalid data provided")]
    Validation(Vec<FieldViolation>),

    /// File part declared a non-image content type
    #[error("Only image files are allowed ({slot}: {content_type})")]
    UnsupportedFileType { slot: String, content_type: String },

    /// File part exceeded the per-file size ceiling
    #[error("File too large ({slot}: {size} bytes, limit {limit})")]
    FileTooLarge { slot: String, size: usize, limit: usize },

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Image persistence failure (filesystem or object store)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
