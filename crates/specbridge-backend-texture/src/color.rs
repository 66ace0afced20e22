//! Color utilities for specular conversion.

/// Linear RGB triple.
pub type Rgb = [f64; 3];

/// Luminance of an RGB triple with the conversion's 0.3/0.6/0.1 weights.
///
/// Written as offsets from the red channel so that a gray `(v, v, v)` has
/// luminance exactly `v`. Normalizing a gray then gives exactly 1.0 per
/// channel, which the tint formula relies on.
#[inline]
pub fn luminance(c: Rgb) -> f64 {
    c[0] + 0.6 * (c[1] - c[0]) + 0.1 * (c[2] - c[0])
}

/// Divide a color by its luminance.
///
/// A color with zero luminance is returned unchanged.
#[inline]
pub fn normalize(c: Rgb) -> Rgb {
    let l = luminance(c);
    if l == 0.0 {
        return c;
    }
    [c[0] / l, c[1] / l, c[2] / l]
}

/// Divide a color by its luminance without guarding against zero.
///
/// Used by the per-pixel path, which evaluates straight-line arithmetic.
#[inline]
pub fn normalize_unguarded(c: Rgb) -> Rgb {
    let l = luminance(c);
    [c[0] / l, c[1] / l, c[2] / l]
}

/// Clamp to [0, 1]. NaN maps to 0.
#[inline]
pub fn clamp_unit(v: f64) -> f64 {
    v.max(0.0).min(1.0)
}

/// RGBA color with f64 components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Create a new color with alpha = 1.0.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a new color with alpha.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create a grayscale color.
    pub const fn gray(value: f64) -> Self {
        Self::rgb(value, value, value)
    }

    /// Create black.
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Linearly interpolate between two colors.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Clamp all components to [0.0, 1.0].
    pub fn clamp(&self) -> Color {
        Color {
            r: clamp_unit(self.r),
            g: clamp_unit(self.g),
            b: clamp_unit(self.b),
            a: clamp_unit(self.a),
        }
    }

    /// Convert to 8-bit RGBA.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }

    /// Create from an f32 RGBA quadruple.
    pub fn from_rgba_f32(p: [f32; 4]) -> Self {
        Self::rgba(p[0] as f64, p[1] as f64, p[2] as f64, p[3] as f64)
    }

    /// Convert to an f32 RGBA quadruple.
    pub fn to_rgba_f32(&self) -> [f32; 4] {
        [self.r as f32, self.g as f32, self.b as f32, self.a as f32]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance([1.0, 1.0, 1.0]), 1.0);
        assert_eq!(luminance([0.5, 0.5, 0.5]), 0.5);
        assert!((luminance([1.0, 0.0, 0.0]) - 0.3).abs() < 1e-12);
        assert!((luminance([0.0, 1.0, 0.0]) - 0.6).abs() < 1e-12);
        assert!((luminance([0.0, 0.0, 1.0]) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_gray_luminance_is_exact() {
        for v in [0.1, 0.3, 0.6, 0.8, 0.9, 0.7, 1e-3, 2.5] {
            assert_eq!(luminance([v; 3]), v, "luminance of gray {}", v);
            assert_eq!(normalize([v; 3]), [1.0; 3]);
            assert_eq!(normalize_unguarded([v; 3]), [1.0; 3]);
        }
    }

    #[test]
    fn test_normalize_has_unit_luminance() {
        let n = normalize([0.8, 0.4, 0.2]);
        assert!((luminance(n) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_black_is_unchanged() {
        assert_eq!(normalize([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
        let n = normalize_unguarded([0.0, 0.0, 0.0]);
        assert!(n.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_clamp_unit_maps_nan_to_zero() {
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(-0.5), 0.0);
        assert_eq!(clamp_unit(1.5), 1.0);
        assert_eq!(clamp_unit(0.25), 0.25);
        assert_eq!(clamp_unit(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_rgba8_clamps_out_of_range() {
        assert_eq!(Color::rgba(1.5, -0.2, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
    }
}
