//! Deterministic PNG packing.
//!
//! Generated images are packed as 8-bit RGBA PNG bytes with fixed
//! compression settings, so the same buffer always packs to the same bytes
//! and the same BLAKE3 hash.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::TextureBuffer;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Named compression presets, selectable from settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PngPreset {
    Fast,
    #[default]
    Default,
    Best,
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Create config optimized for file size (slower, but deterministic).
    pub fn best_compression() -> Self {
        Self {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        }
    }

    /// Create config optimized for speed (faster, but larger files).
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            filter: FilterType::NoFilter,
        }
    }

    pub fn from_preset(preset: PngPreset) -> Self {
        match preset {
            PngPreset::Fast => Self::fast(),
            PngPreset::Default => Self::default(),
            PngPreset::Best => Self::best_compression(),
        }
    }
}

/// PNG bytes of a packed image together with their hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedFile {
    pub data: Vec<u8>,
    /// BLAKE3 hex digest of `data`.
    pub hash: String,
}

/// Encode a buffer as PNG bytes and hash them.
///
/// Values outside [0, 1] are clamped by the 8-bit encoding; the unclamped
/// floats stay available on the image itself.
pub fn pack_rgba(buffer: &TextureBuffer, config: &PngConfig) -> Result<PackedFile, PngError> {
    let mut data = Vec::new();
    write_rgba_to_writer(buffer, &mut data, config)?;
    let hash = blake3::hash(&data).to_hex().to_string();
    Ok(PackedFile { data, hash })
}

/// Write an RGBA texture buffer to any writer.
pub fn write_rgba_to_writer<W: Write>(
    buffer: &TextureBuffer,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    if buffer.width == 0 || buffer.height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "cannot encode {}x{} image",
            buffer.width, buffer.height
        )));
    }

    let mut encoder = Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    // The png crate writes no timestamps or other variable metadata.
    let mut png_writer = encoder.write_header()?;

    let data = buffer.to_rgba8();
    png_writer.write_image_data(&data)?;
    png_writer.finish()?;

    Ok(())
}

/// Write already-encoded PNG bytes to a file.
pub fn write_packed(packed: &PackedFile, path: &Path) -> Result<(), PngError> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    writer.write_all(&packed.data)?;
    writer.flush()?;
    Ok(())
}
