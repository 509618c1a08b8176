//! # Error Types
//!
//! Errors raised by the concrete collaborators around the interpreter
//! (configuration, font loading, page output). Malformed printer data is
//! never an error: the interpreters absorb and log it.

use thiserror::Error;

/// Main error type for dotprint operations
#[derive(Debug, Error)]
pub enum DotprintError {
    /// Unknown page size name or invalid geometry
    #[error("Invalid page size: {0}")]
    PageSize(String),

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Font file could not be loaded or parsed
    #[error("Font error: {0}")]
    Font(String),

    /// Page image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for DotprintError {
    fn from(e: serde_json::Error) -> Self {
        DotprintError::Config(e.to_string())
    }
}

impl From<image::ImageError> for DotprintError {
    fn from(e: image::ImageError) -> Self {
        DotprintError::Image(e.to_string())
    }
}
