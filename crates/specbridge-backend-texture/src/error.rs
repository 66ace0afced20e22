//! Error types for the texture backend.

use specbridge_spec::BackendError;
use thiserror::Error;

use crate::png::PngError;

/// Errors from texture compositing and packing.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("PNG error: {0}")]
    Png(#[from] PngError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image '{name}': {message}")]
    InvalidImage { name: String, message: String },
}

impl BackendError for TextureError {
    fn code(&self) -> &'static str {
        match self {
            TextureError::Png(_) => "TEXTURE_001",
            TextureError::Io(_) => "TEXTURE_002",
            TextureError::InvalidImage { .. } => "TEXTURE_003",
        }
    }

    fn category(&self) -> &'static str {
        "texture"
    }
}
