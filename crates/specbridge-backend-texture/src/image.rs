//! Source images read by the compositor.

use specbridge_spec::validation::validate_rgba_len;

use crate::buffer::TextureBuffer;
use crate::error::TextureError;

/// A materialized image: float RGBA pixels, row-major.
///
/// Source images belong to the caller's image library. The compositor only
/// borrows them and never writes to them.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub name: String,
    width: u32,
    height: u32,
    pixels: Vec<f32>,
}

impl SourceImage {
    /// Create an image, checking that `pixels` holds `width * height` RGBA
    /// values.
    pub fn new(
        name: impl Into<String>,
        width: u32,
        height: u32,
        pixels: Vec<f32>,
    ) -> Result<Self, TextureError> {
        let name = name.into();
        validate_rgba_len(width, height, pixels.len()).map_err(|e| {
            TextureError::InvalidImage {
                name: name.clone(),
                message: e.message,
            }
        })?;

        Ok(Self {
            name,
            width,
            height,
            pixels,
        })
    }

    /// An image holding one RGBA value at every pixel.
    pub fn filled(
        name: impl Into<String>,
        width: u32,
        height: u32,
        rgba: [f32; 4],
    ) -> Result<Self, TextureError> {
        let count = (width as usize) * (height as usize);
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self::new(name, width, height, pixels)
    }

    /// Image size as `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Interleaved RGBA pixels.
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    /// Copy the pixels into a texture buffer.
    pub fn to_buffer(&self) -> TextureBuffer {
        TextureBuffer::from_rgba_f32(self.width, self.height, &self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specbridge_spec::BackendError;

    #[test]
    fn test_new_checks_pixel_count() {
        assert!(SourceImage::new("ok", 2, 2, vec![0.0; 16]).is_ok());

        let err = SourceImage::new("short", 2, 2, vec![0.0; 12]).unwrap_err();
        assert_eq!(err.code(), "TEXTURE_003");
        assert!(err.to_string().contains("short"));
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(SourceImage::new("empty", 0, 4, Vec::new()).is_err());
    }

    #[test]
    fn test_filled_to_buffer() {
        let img = SourceImage::filled("gray", 3, 1, [0.5, 0.5, 0.5, 1.0]).unwrap();
        assert_eq!(img.size(), (3, 1));
        let buf = img.to_buffer();
        assert_eq!(buf.data.len(), 3);
        assert_eq!(buf.get(2, 0).r, 0.5);
    }
}
