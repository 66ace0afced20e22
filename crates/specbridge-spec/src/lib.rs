//! specbridge material records
//!
//! This crate holds the typed side of the specular conversion: the subset of
//! the glTF 2.0 document that the conversion reads, the three material
//! extensions it depends on, and [`MaterialSpecularInputs`], the flattened
//! and fully defaulted view that the texture and shading backends consume.
//!
//! # Example
//!
//! ```
//! use specbridge_spec::{Material, MaterialSpecularInputs};
//!
//! let material: Material = serde_json::from_str(r#"{
//!     "extensions": {
//!         "KHR_materials_specular": { "specularColorFactor": [1.0, 0.5, 0.5] },
//!         "KHR_materials_ior": { "ior": 1.45 }
//!     }
//! }"#).unwrap();
//!
//! let inputs = MaterialSpecularInputs::from_material(&material).unwrap();
//! assert_eq!(inputs.specular_factor, 1.0);
//! assert_eq!(inputs.transmission_factor, 0.0);
//! assert_eq!(inputs.ior, 1.45);
//! ```
//!
//! # Modules
//!
//! - [`document`]: glTF document, material, texture and sampler records
//! - [`extensions`]: `KHR_materials_specular`, `KHR_materials_transmission`, `KHR_materials_ior`
//! - [`inputs`]: defaulted conversion inputs resolved from a material
//! - [`error`]: the `BackendError` trait and document errors
//! - [`validation`]: shared checks for image dimensions and pixel buffers

pub mod document;
pub mod error;
pub mod extensions;
pub mod inputs;
pub mod validation;

pub use document::{
    Document, Image, Material, MaterialExtensions, PbrMetallicRoughness, Sampler, Texture,
    TextureInfo, TextureInfoExtensions, TextureTransform,
};
pub use error::{BackendError, DocumentError};
pub use extensions::{KhrMaterialsIor, KhrMaterialsSpecular, KhrMaterialsTransmission, GLTF_IOR};
pub use inputs::MaterialSpecularInputs;
