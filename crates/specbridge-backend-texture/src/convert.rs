//! Scalar specular conversion.
//!
//! glTF describes specular reflectance as a color and factor tied to an
//! index of refraction. A principled shader wants one "Specular" strength,
//! where 0.5 corresponds to an F0 of 4%, and one "Specular Tint" that
//! blends the reflection towards the base color.

use specbridge_spec::MaterialSpecularInputs;
use tracing::{debug, warn};

use crate::color::{clamp_unit, luminance, normalize, Rgb};
use crate::compositor::{composite, CompositeSources};
use crate::pixel_math::{evaluate, SpecularMaps};
use crate::resample::ResampleFilter;

/// Principled "Specular" value per unit of F0 (0.5 maps to F0 = 0.04).
pub const SPECULAR_PER_F0: f64 = 1.0 / 0.08;

/// Scalar outputs of the conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarSpecular {
    /// Unclamped: values above 1 are valid shader input.
    pub specular: f64,
    /// Clamped to [0, 1].
    pub tint: f64,
}

/// Outcome of converting one material: constants or a pair of images.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionResult {
    Scalar(ScalarSpecular),
    Texture(SpecularMaps),
}

/// Normal-incidence reflectance for a dielectric with the given IOR.
#[inline]
pub fn f0_from_ior(ior: f64) -> f64 {
    let r = (ior - 1.0) / (ior + 1.0);
    r * r
}

/// Convert constant glTF inputs into principled specular and tint.
///
/// `transmission_factor == 1` divides by zero and produces a non-finite
/// specular; this is passed through rather than replaced.
pub fn convert_scalar(
    ior: f64,
    specular_color_factor: Rgb,
    transmission_factor: f64,
    base_color_factor: Rgb,
) -> ScalarSpecular {
    let f0 = f0_from_ior(ior);
    let lum_specular_color = luminance(specular_color_factor);
    let specular = (lum_specular_color - transmission_factor) / (1.0 - transmission_factor)
        * SPECULAR_PER_F0
        * f0;

    if !specular.is_finite() {
        warn!(
            transmission_factor,
            "specular is not finite; transmission factor of 1 has no defined conversion"
        );
    }

    let s = normalize(specular_color_factor);
    let b = normalize(base_color_factor);
    let ratio = [
        (s[0] - 1.0) / (b[0] - 1.0),
        (s[1] - 1.0) / (b[1] - 1.0),
        (s[2] - 1.0) / (b[2] - 1.0),
    ];
    let tint = clamp_unit(luminance(ratio));

    ScalarSpecular { specular, tint }
}

/// Convert one material, choosing the scalar or texture path.
pub fn convert_inputs(
    inputs: &MaterialSpecularInputs,
    sources: &CompositeSources<'_>,
    filter: ResampleFilter,
) -> ConversionResult {
    match composite(inputs, sources, filter) {
        Some(layers) => {
            debug!(width = layers.width, height = layers.height, "specular texture path");
            ConversionResult::Texture(evaluate(&layers, inputs.ior))
        }
        None => {
            let scalar = convert_scalar(
                inputs.ior,
                inputs.specular_color_factor,
                inputs.transmission_factor,
                inputs.base_color_factor,
            );
            debug!(specular = scalar.specular, tint = scalar.tint, "specular scalar path");
            ConversionResult::Scalar(scalar)
        }
    }
}
