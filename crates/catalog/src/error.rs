//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while loading the subject catalog or building
/// schema objects.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error occurred while reading a catalog file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a catalog file couldn't be parsed
    ///
    /// This variant stores context about where the error occurred
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// Catalog or schema validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
