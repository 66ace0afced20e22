//! glTF document records.
//!
//! Only the parts of a glTF 2.0 document that the specular conversion reads
//! are modelled. Unknown fields are ignored so full documents deserialize.

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;
use crate::extensions::{KhrMaterialsIor, KhrMaterialsSpecular, KhrMaterialsTransmission};

/// `REPEAT` wrap mode.
pub const WRAP_REPEAT: u32 = 10497;
/// `CLAMP_TO_EDGE` wrap mode.
pub const WRAP_CLAMP_TO_EDGE: u32 = 33071;
/// `MIRRORED_REPEAT` wrap mode.
pub const WRAP_MIRRORED_REPEAT: u32 = 33648;
/// `NEAREST` filter.
pub const FILTER_NEAREST: u32 = 9728;

fn default_wrap() -> u32 {
    WRAP_REPEAT
}

fn default_scale() -> [f64; 2] {
    [1.0, 1.0]
}

fn default_base_color() -> [f64; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

/// Top-level document tables used when resolving texture references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub textures: Vec<Texture>,
    #[serde(default)]
    pub samplers: Vec<Sampler>,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl Document {
    /// Parse a document from glTF JSON text.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up a texture by index.
    pub fn texture(&self, index: usize) -> Option<&Texture> {
        self.textures.get(index)
    }

    /// Sampler used by a texture, if it declares one that exists.
    pub fn sampler_for(&self, texture: &Texture) -> Option<&Sampler> {
        texture.sampler.and_then(|i| self.samplers.get(i))
    }
}

/// A reference from a material to a texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureInfo {
    /// Index into [`Document::textures`].
    pub index: usize,
    /// Which `TEXCOORD_n` attribute to sample with.
    #[serde(default)]
    pub tex_coord: u32,
    #[serde(default)]
    pub extensions: TextureInfoExtensions,
}

impl TextureInfo {
    /// Reference a texture with texCoord 0 and no transform.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            tex_coord: 0,
            extensions: TextureInfoExtensions::default(),
        }
    }

    /// The texture transform, if any.
    pub fn transform(&self) -> Option<&TextureTransform> {
        self.extensions.khr_texture_transform.as_ref()
    }

    /// The UV set to sample. A texture transform may override `texCoord`.
    pub fn effective_tex_coord(&self) -> u32 {
        self.transform()
            .and_then(|t| t.tex_coord)
            .unwrap_or(self.tex_coord)
    }
}

/// Extensions on a texture info.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureInfoExtensions {
    #[serde(
        rename = "KHR_texture_transform",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub khr_texture_transform: Option<TextureTransform>,
}

/// `KHR_texture_transform`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureTransform {
    #[serde(default)]
    pub offset: [f64; 2],
    /// Rotation in radians, counter-clockwise.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_scale")]
    pub scale: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tex_coord: Option<u32>,
}

impl Default for TextureTransform {
    fn default() -> Self {
        Self {
            offset: [0.0, 0.0],
            rotation: 0.0,
            scale: default_scale(),
            tex_coord: None,
        }
    }
}

/// A texture: an image source plus an optional sampler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    /// Index into [`Document::images`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampler: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Texture sampler state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sampler {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mag_filter: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_filter: Option<u32>,
    #[serde(default = "default_wrap")]
    pub wrap_s: u32,
    #[serde(default = "default_wrap")]
    pub wrap_t: u32,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            mag_filter: None,
            min_filter: None,
            wrap_s: WRAP_REPEAT,
            wrap_t: WRAP_REPEAT,
        }
    }
}

/// Image metadata. Pixel data is decoded by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// The metallic-roughness block of a material. Only base color is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    #[serde(default = "default_base_color")]
    pub base_color_factor: [f64; 4],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_color_texture: Option<TextureInfo>,
}

impl Default for PbrMetallicRoughness {
    fn default() -> Self {
        Self {
            base_color_factor: default_base_color(),
            base_color_texture: None,
        }
    }
}

/// A glTF material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
    #[serde(default)]
    pub extensions: MaterialExtensions,
}

impl Material {
    /// Parse a single material from glTF JSON text.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Material extensions the conversion reads. Others are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialExtensions {
    #[serde(
        rename = "KHR_materials_specular",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub specular: Option<KhrMaterialsSpecular>,
    #[serde(
        rename = "KHR_materials_transmission",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transmission: Option<KhrMaterialsTransmission>,
    #[serde(
        rename = "KHR_materials_ior",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ior: Option<KhrMaterialsIor>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_texture_info_defaults() {
        let info: TextureInfo = serde_json::from_str(r#"{ "index": 4 }"#).unwrap();
        assert_eq!(info, TextureInfo::new(4));
        assert_eq!(info.effective_tex_coord(), 0);
        assert!(info.transform().is_none());
    }

    #[test]
    fn test_texture_transform_overrides_tex_coord() {
        let info: TextureInfo = serde_json::from_str(
            r#"{
                "index": 0,
                "texCoord": 1,
                "extensions": {
                    "KHR_texture_transform": { "offset": [0.5, 0.0], "texCoord": 2 }
                }
            }"#,
        )
        .unwrap();
        let transform = info.transform().unwrap();
        assert_eq!(transform.offset, [0.5, 0.0]);
        assert_eq!(transform.scale, [1.0, 1.0]);
        assert_eq!(transform.rotation, 0.0);
        assert_eq!(info.effective_tex_coord(), 2);
    }

    #[test]
    fn test_sampler_defaults_to_repeat() {
        let sampler: Sampler = serde_json::from_str("{}").unwrap();
        assert_eq!(sampler.wrap_s, WRAP_REPEAT);
        assert_eq!(sampler.wrap_t, WRAP_REPEAT);
        assert_eq!(sampler.mag_filter, None);
    }

    #[test]
    fn test_document_ignores_unknown_fields() {
        let doc = Document::from_json(
            r#"{
                "asset": { "version": "2.0" },
                "textures": [ { "source": 0, "sampler": 0 } ],
                "samplers": [ { "magFilter": 9728 } ],
                "images": [ { "uri": "spec.png" } ]
            }"#,
        )
        .unwrap();
        let texture = doc.texture(0).unwrap();
        assert_eq!(texture.source, Some(0));
        assert_eq!(
            doc.sampler_for(texture).and_then(|s| s.mag_filter),
            Some(FILTER_NEAREST)
        );
        assert!(doc.texture(1).is_none());
    }

    #[test]
    fn test_material_without_extensions() {
        let mat = Material::from_json(r#"{ "name": "plain" }"#).unwrap();
        assert_eq!(mat.name.as_deref(), Some("plain"));
        assert!(mat.extensions.specular.is_none());
        assert!(mat.pbr_metallic_roughness.is_none());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(Document::from_json("not json").is_err());
    }
}
