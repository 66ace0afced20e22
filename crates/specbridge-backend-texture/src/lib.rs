//! specbridge Texture Backend
//!
//! This crate turns resolved `KHR_materials_specular` inputs into the
//! single-valued "Specular" and "Specular Tint" parameters of a principled
//! shader, either as two scalars or as two full-resolution images.
//!
//! # Pipeline
//!
//! - **Scalar path** ([`convert`]): every input is constant, so the
//!   conversion is one closed-form evaluation.
//! - **Texture path** ([`compositor`] then [`pixel_math`]): source images are
//!   brought to one canonical resolution, multiplied by their factors, and the
//!   same formula is evaluated per pixel.
//! - **Packing** ([`png`]): output buffers are encoded as deterministic PNG
//!   bytes with a BLAKE3 hash.
//!
//! # Example
//!
//! ```
//! use specbridge_backend_texture::convert::convert_scalar;
//!
//! let result = convert_scalar(1.5, [1.0, 1.0, 1.0], 0.0, [1.0, 1.0, 1.0]);
//! assert!((result.specular - 0.5).abs() < 1e-12);
//! assert_eq!(result.tint, 0.0);
//! ```
//!
//! # Determinism
//!
//! Identical inputs give bit-identical buffers and PNG bytes. Nothing in the
//! pipeline keeps state between calls.

pub mod buffer;
pub mod color;
pub mod compositor;
pub mod convert;
pub mod error;
pub mod image;
pub mod pixel_math;
pub mod png;
pub mod resample;

// Re-export main types for convenience
pub use buffer::{TextureBuffer, TextureLayer};
pub use color::{luminance, normalize, Color, Rgb};
pub use compositor::{
    canonical_resolution, composite, uses_texture_path, working_set_bytes, CompositeSources,
    CompositedLayers,
};
pub use convert::{convert_inputs, convert_scalar, f0_from_ior, ConversionResult, ScalarSpecular};
pub use error::TextureError;
pub use image::SourceImage;
pub use pixel_math::{evaluate, SpecularMaps};
pub use crate::png::{PackedFile, PngConfig, PngError, PngPreset};
pub use resample::{ResampleFilter, TempImageGuard};
