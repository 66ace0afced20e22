//! Error types shared across specbridge crates.

use thiserror::Error;

/// Trait for backend-specific errors that provides a consistent interface.
///
/// Every backend error enum implements this so callers batching many
/// materials can report failures uniformly without matching on each
/// backend's concrete type.
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "TEXTURE_001" or "SHADING_002".
    /// These codes are stable and can be used for programmatic handling.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    ///
    /// Returns a category like "document", "texture" or "shading".
    fn category(&self) -> &'static str;
}

/// Errors from reading glTF document records.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The JSON text could not be deserialized into the expected record.
    #[error("Failed to parse glTF JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BackendError for DocumentError {
    fn code(&self) -> &'static str {
        match self {
            DocumentError::Parse(_) => "SPEC_001",
        }
    }

    fn category(&self) -> &'static str {
        "document"
    }
}
