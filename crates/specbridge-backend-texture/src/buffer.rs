//! Pixel buffers used during compositing.

use crate::color::{Color, Rgb};

/// A 2D RGBA texture buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (RGBA, row-major).
    pub data: Vec<Color>,
}

impl TextureBuffer {
    /// Create a new texture buffer filled with a color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    /// Build a buffer from interleaved f32 RGBA pixels.
    ///
    /// `pixels` must hold `width * height * 4` values.
    pub fn from_rgba_f32(width: u32, height: u32, pixels: &[f32]) -> Self {
        let data = pixels
            .chunks_exact(4)
            .map(|p| Color::from_rgba_f32([p[0], p[1], p[2], p[3]]))
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.data[idx]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.data[idx] = color;
    }

    /// Sample with bilinear interpolation using normalized [0, 1] coordinates.
    pub fn sample_bilinear(&self, u: f64, v: f64) -> Color {
        let x = u.clamp(0.0, 1.0) * (self.width - 1) as f64;
        let y = v.clamp(0.0, 1.0) * (self.height - 1) as f64;

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x - x.floor();
        let fy = y - y.floor();

        let c00 = self.get(x0, y0);
        let c10 = self.get(x1, y0);
        let c01 = self.get(x0, y1);
        let c11 = self.get(x1, y1);

        let c0 = c00.lerp(&c10, fx);
        let c1 = c01.lerp(&c11, fx);
        c0.lerp(&c1, fy)
    }

    /// Convert to interleaved f32 RGBA.
    pub fn to_rgba_f32(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.data.len() * 4);
        for color in &self.data {
            out.extend_from_slice(&color.to_rgba_f32());
        }
        out
    }

    /// Convert to 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }
}

/// An RGB layer at the canonical resolution, factors already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureLayer {
    pub width: u32,
    pub height: u32,
    /// Pixel data (RGB, row-major).
    pub data: Vec<Rgb>,
}

impl TextureLayer {
    /// A layer holding the same value at every pixel.
    pub fn constant(width: u32, height: u32, value: Rgb) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            data: vec![value; size],
        }
    }

    /// Map every pixel of an RGBA buffer into a layer.
    pub fn from_buffer(buffer: &TextureBuffer, f: impl Fn(Color) -> Rgb) -> Self {
        Self {
            width: buffer.width,
            height: buffer.height,
            data: buffer.data.iter().map(|&c| f(c)).collect(),
        }
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgb {
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }
}
