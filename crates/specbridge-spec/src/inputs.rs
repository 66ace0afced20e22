//! Resolved inputs for the specular conversion.

use crate::document::{Material, TextureInfo};
use crate::extensions::{KhrMaterialsIor, KhrMaterialsTransmission};

/// Every value the specular conversion reads from a material, with the
/// extension defaults already applied.
///
/// Built once per material by [`MaterialSpecularInputs::from_material`].
/// Texture fields are references into the document's texture table; the
/// conversion never owns the images behind them.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSpecularInputs {
    /// `KHR_materials_specular.specularFactor`, default 1.0.
    pub specular_factor: f64,
    /// `KHR_materials_specular.specularColorFactor`, default (1, 1, 1).
    pub specular_color_factor: [f64; 3],
    pub specular_texture: Option<TextureInfo>,
    pub specular_color_texture: Option<TextureInfo>,
    /// RGB of `pbrMetallicRoughness.baseColorFactor`, default (1, 1, 1).
    pub base_color_factor: [f64; 3],
    pub base_color_texture: Option<TextureInfo>,
    /// `KHR_materials_transmission.transmissionFactor`, default 0.0.
    pub transmission_factor: f64,
    pub transmission_texture: Option<TextureInfo>,
    /// `KHR_materials_ior.ior`, default [`crate::GLTF_IOR`].
    pub ior: f64,
}

impl MaterialSpecularInputs {
    /// Resolve inputs from a material.
    ///
    /// Returns `None` when the material has no `KHR_materials_specular`
    /// extension, in which case there is nothing to convert.
    pub fn from_material(material: &Material) -> Option<Self> {
        let specular = material.extensions.specular.as_ref()?;
        let transmission = material
            .extensions
            .transmission
            .clone()
            .unwrap_or_else(KhrMaterialsTransmission::default);
        let ior = material
            .extensions
            .ior
            .as_ref()
            .map(|ext| ext.ior)
            .unwrap_or(KhrMaterialsIor::default().ior);

        let (base_color_factor, base_color_texture) = match &material.pbr_metallic_roughness {
            Some(pbr) => {
                let [r, g, b, _] = pbr.base_color_factor;
                ([r, g, b], pbr.base_color_texture.clone())
            }
            None => ([1.0, 1.0, 1.0], None),
        };

        Some(Self {
            specular_factor: specular.specular_factor,
            specular_color_factor: specular.specular_color_factor,
            specular_texture: specular.specular_texture.clone(),
            specular_color_texture: specular.specular_color_texture.clone(),
            base_color_factor,
            base_color_texture,
            transmission_factor: transmission.transmission_factor,
            transmission_texture: transmission.transmission_texture,
            ior,
        })
    }

    /// The texture reference whose UV set and transform the generated
    /// specular and tint texture nodes reuse.
    ///
    /// Priority: specular, specular color, transmission, base color.
    pub fn template_texture(&self) -> Option<&TextureInfo> {
        self.specular_texture
            .as_ref()
            .or(self.specular_color_texture.as_ref())
            .or(self.transmission_texture.as_ref())
            .or(self.base_color_texture.as_ref())
    }
}
