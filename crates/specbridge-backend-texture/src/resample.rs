//! Resampling of source images to the canonical resolution.
//!
//! A source image that does not match the canonical size is never scaled in
//! place. Instead a [`TempImageGuard`] takes a private copy, scales the copy,
//! and releases it when the guard goes out of scope, whichever way the
//! enclosing function exits.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::buffer::TextureBuffer;
use crate::color::Color;
use crate::image::SourceImage;

/// Interpolation used when scaling a temporary copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Bilinear interpolation with corner-aligned sample positions.
    #[default]
    Bilinear,
    /// Nearest source pixel.
    Nearest,
}

impl ResampleFilter {
    pub fn name(&self) -> &'static str {
        match self {
            ResampleFilter::Bilinear => "bilinear",
            ResampleFilter::Nearest => "nearest",
        }
    }
}

/// A scoped temporary copy of a source image.
///
/// The copy lives exactly as long as the guard.
#[derive(Debug)]
pub struct TempImageGuard {
    source_name: String,
    image: TextureBuffer,
}

impl TempImageGuard {
    /// Take a temporary copy of `source`.
    pub fn copy_of(source: &SourceImage) -> Self {
        trace!(image = %source.name, "acquired temporary image copy");
        Self {
            source_name: source.name.clone(),
            image: source.to_buffer(),
        }
    }

    /// Scale the temporary copy to `width` x `height`.
    pub fn scale(&mut self, width: u32, height: u32, filter: ResampleFilter) {
        if self.image.width == width && self.image.height == height {
            return;
        }
        trace!(
            image = %self.source_name,
            from_width = self.image.width,
            from_height = self.image.height,
            to_width = width,
            to_height = height,
            filter = filter.name(),
            "scaling temporary image copy"
        );
        self.image = resample(&self.image, width, height, filter);
    }

    /// Pixels of the temporary copy.
    pub fn pixels(&self) -> &TextureBuffer {
        &self.image
    }
}

impl Drop for TempImageGuard {
    fn drop(&mut self) {
        trace!(image = %self.source_name, "released temporary image copy");
    }
}

/// Resample a buffer to a new size.
pub fn resample(
    src: &TextureBuffer,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> TextureBuffer {
    let mut out = TextureBuffer::new(width, height, Color::black());
    if src.data.is_empty() {
        return out;
    }

    for y in 0..height {
        for x in 0..width {
            let color = match filter {
                ResampleFilter::Bilinear => {
                    src.sample_bilinear(unit_coord(x, width), unit_coord(y, height))
                }
                ResampleFilter::Nearest => src.get(
                    nearest_index(x, width, src.width),
                    nearest_index(y, height, src.height),
                ),
            };
            out.set(x, y, color);
        }
    }

    out
}

/// Map a destination pixel index onto [0, 1] with aligned corners.
fn unit_coord(i: u32, size: u32) -> f64 {
    if size <= 1 {
        0.5
    } else {
        i as f64 / (size - 1) as f64
    }
}

/// Source pixel whose footprint covers the center of destination pixel `i`.
fn nearest_index(i: u32, dst: u32, src: u32) -> u32 {
    let pos = (i as f64 + 0.5) * src as f64 / dst as f64;
    (pos.floor() as u32).min(src - 1)
}
