//! Centralized error types for RDOC.

use thiserror::Error;

/// Main error type for report document operations.
#[derive(Error, Debug)]
pub enum RdocError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid request body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Document archive error: {0}")]
    Archive(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Processing error: {0}")]
    Processing(String),
}

/// Result type for RDOC operations.
pub type RdocResult<T> = Result<T, RdocError>;

impl RdocError {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a template error.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Create an archive error.
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }

    /// Create a processing error.
    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing(msg.into())
    }

    /// True for errors caused by the caller's payload rather than by rendering.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Json(_))
    }
}
