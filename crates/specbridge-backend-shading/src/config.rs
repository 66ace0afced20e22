//! Import settings.

use serde::{Deserialize, Serialize};
use specbridge_backend_texture::{PngConfig, PngPreset, ResampleFilter};

use crate::error::ShadingError;

/// Settings for the specular import.
///
/// Every field has a default, so `{}` is a valid settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Filter used when an input image is brought to the canonical size.
    pub resample_filter: ResampleFilter,
    /// Encode generated images as PNG bytes.
    pub pack_images: bool,
    /// Compression preset for packed images.
    pub png: PngPreset,
    /// Base name of the generated specular image.
    pub specular_image_name: String,
    /// Base name of the generated specular tint image.
    pub specular_tint_image_name: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            resample_filter: ResampleFilter::default(),
            pack_images: true,
            png: PngPreset::default(),
            specular_image_name: "Specular".to_string(),
            specular_tint_image_name: "Specular Tint".to_string(),
        }
    }
}

impl ImportSettings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, ShadingError> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| ShadingError::invalid_settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings can be used for an import.
    ///
    /// Image names become file names when packed images are written, so
    /// they must be non-blank and free of path separators.
    pub fn validate(&self) -> Result<(), ShadingError> {
        validate_image_name("specular_image_name", &self.specular_image_name)?;
        validate_image_name("specular_tint_image_name", &self.specular_tint_image_name)
    }

    /// PNG encoder configuration for the selected preset.
    pub fn png_config(&self) -> PngConfig {
        PngConfig::from_preset(self.png)
    }
}

fn validate_image_name(field: &str, name: &str) -> Result<(), ShadingError> {
    if name.trim().is_empty() {
        return Err(ShadingError::invalid_settings(format!("{} must not be empty", field)));
    }
    if name.contains(&['/', '\\'][..]) || name.contains("..") {
        return Err(ShadingError::invalid_settings(format!(
            "{} must not contain path separators or '..', got {:?}",
            field, name
        )));
    }
    Ok(())
}
