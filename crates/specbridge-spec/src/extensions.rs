//! Material extension records read by the specular conversion.
//!
//! Each record mirrors its Khronos extension schema. Every scalar or color
//! field has the default the schema documents, so an empty JSON object
//! deserializes to the neutral material.

use serde::{Deserialize, Deserializer, Serialize};

use crate::document::TextureInfo;

/// Index of refraction glTF assumes when `KHR_materials_ior` is absent.
pub const GLTF_IOR: f64 = 1.5;

fn one() -> f64 {
    1.0
}

fn white() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

fn default_ior() -> f64 {
    GLTF_IOR
}

/// Read an RGB factor from an array of any length: extra components are
/// ignored and missing ones stay white.
fn rgb_prefix<'de, D>(deserializer: D) -> Result<[f64; 3], D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<f64>::deserialize(deserializer)?;
    let mut rgb = white();
    for (slot, value) in rgb.iter_mut().zip(values) {
        *slot = value;
    }
    Ok(rgb)
}

/// `KHR_materials_specular`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KhrMaterialsSpecular {
    /// Strength of the specular reflection.
    #[serde(default = "one")]
    pub specular_factor: f64,
    /// Texture whose alpha channel modulates `specular_factor`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specular_texture: Option<TextureInfo>,
    /// F0 color of the specular reflection (linear RGB).
    #[serde(default = "white", deserialize_with = "rgb_prefix")]
    pub specular_color_factor: [f64; 3],
    /// Texture whose RGB channels modulate `specular_color_factor`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specular_color_texture: Option<TextureInfo>,
}

impl Default for KhrMaterialsSpecular {
    fn default() -> Self {
        Self {
            specular_factor: one(),
            specular_texture: None,
            specular_color_factor: white(),
            specular_color_texture: None,
        }
    }
}

/// `KHR_materials_transmission`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KhrMaterialsTransmission {
    /// Fraction of light transmitted through the surface.
    #[serde(default)]
    pub transmission_factor: f64,
    /// Texture whose red channel modulates `transmission_factor`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission_texture: Option<TextureInfo>,
}

/// `KHR_materials_ior`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KhrMaterialsIor {
    #[serde(default = "default_ior")]
    pub ior: f64,
}

impl Default for KhrMaterialsIor {
    fn default() -> Self {
        Self { ior: GLTF_IOR }
    }
}
