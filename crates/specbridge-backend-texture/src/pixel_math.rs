//! Per-pixel specular conversion over composited layers.
//!
//! Each output pixel is the scalar formula applied to the three input
//! pixels at the same position. The inner loop is straight-line
//! arithmetic: normalization is unguarded and the tint clamp is a
//! `max`/`min` pair, so the compiler is free to vectorize it.

use crate::buffer::TextureBuffer;
use crate::color::{clamp_unit, luminance, normalize_unguarded, Color, Rgb};
use crate::compositor::CompositedLayers;
use crate::convert::{f0_from_ior, SPECULAR_PER_F0};

/// Specular and tint images at the canonical resolution.
///
/// Both buffers are grayscale stored in RGB with alpha forced to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecularMaps {
    pub width: u32,
    pub height: u32,
    pub specular: TextureBuffer,
    pub tint: TextureBuffer,
}

/// Evaluate specular and tint for every pixel of `layers`.
pub fn evaluate(layers: &CompositedLayers, ior: f64) -> SpecularMaps {
    let f0 = f0_from_ior(ior);
    let count = layers.base_color.data.len();

    let mut specular = Vec::with_capacity(count);
    let mut tint = Vec::with_capacity(count);

    let pixels = layers
        .specular_color
        .data
        .iter()
        .zip(&layers.transmission.data)
        .zip(&layers.base_color.data);

    for ((&spec, &trans), &base) in pixels {
        let s = specular_pixel(spec, trans, f0);
        specular.push(Color::rgba(s[0], s[1], s[2], 1.0));

        let t = tint_pixel(spec, base);
        tint.push(Color::rgba(t, t, t, 1.0));
    }

    SpecularMaps {
        width: layers.width,
        height: layers.height,
        specular: TextureBuffer {
            width: layers.width,
            height: layers.height,
            data: specular,
        },
        tint: TextureBuffer {
            width: layers.width,
            height: layers.height,
            data: tint,
        },
    }
}

#[inline]
fn specular_pixel(spec: Rgb, trans: Rgb, f0: f64) -> Rgb {
    let lum = luminance(spec);
    [
        (lum - trans[0]) / (1.0 - trans[0]) * SPECULAR_PER_F0 * f0,
        (lum - trans[1]) / (1.0 - trans[1]) * SPECULAR_PER_F0 * f0,
        (lum - trans[2]) / (1.0 - trans[2]) * SPECULAR_PER_F0 * f0,
    ]
}

#[inline]
fn tint_pixel(spec: Rgb, base: Rgb) -> f64 {
    let s = normalize_unguarded(spec);
    let b = normalize_unguarded(base);
    let ratio = [
        (s[0] - 1.0) / (b[0] - 1.0),
        (s[1] - 1.0) / (b[1] - 1.0),
        (s[2] - 1.0) / (b[2] - 1.0),
    ];
    clamp_unit(luminance(ratio))
}
