//! Error types for the shading backend.

use specbridge_backend_texture::TextureError;
use specbridge_spec::BackendError;
use thiserror::Error;

/// Result type for shading backend operations.
pub type ShadingResult<T> = Result<T, ShadingError>;

/// Errors that can occur while importing into the shading graph.
#[derive(Debug, Error)]
pub enum ShadingError {
    /// Compositing, packing or image validation failed.
    #[error("Texture backend error: {0}")]
    Texture(#[from] TextureError),

    /// A socket reference does not resolve in the node tree.
    #[error("Unknown socket '{socket}' on node {node}")]
    UnknownSocket { node: usize, socket: String },

    /// IO error while writing packed images.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Import settings could not be parsed or are inconsistent.
    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },
}

impl ShadingError {
    /// Creates a new unknown socket error.
    pub fn unknown_socket(node: usize, socket: impl Into<String>) -> Self {
        Self::UnknownSocket {
            node,
            socket: socket.into(),
        }
    }

    /// Creates a new invalid settings error.
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            message: message.into(),
        }
    }
}

impl BackendError for ShadingError {
    fn code(&self) -> &'static str {
        match self {
            ShadingError::Texture(_) => "SHADING_001",
            ShadingError::UnknownSocket { .. } => "SHADING_002",
            ShadingError::Io(_) => "SHADING_003",
            ShadingError::InvalidSettings { .. } => "SHADING_004",
        }
    }

    fn category(&self) -> &'static str {
        "shading"
    }
}
