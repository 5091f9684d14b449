//! Error types for document construction and parsing.

use thiserror::Error;

/// Errors that can occur when building or parsing XML documents.
#[derive(Debug, Error)]
pub enum Error {
    /// An element was constructed with an empty tag name.
    #[error("element name must not be empty")]
    InvalidName,

    /// XML parsing error.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, Error>;
