//! Error types for filebox.

use thiserror::Error;

/// Common error type for filebox.
#[derive(Error, Debug)]
pub enum FileboxError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input (bad filenames, malformed uploads).
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// PDF generation error.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// HTML template rendering error.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for filebox operations.
pub type Result<T> = std::result::Result<T, FileboxError>;
