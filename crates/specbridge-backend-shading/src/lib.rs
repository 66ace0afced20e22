//! specbridge Shading Backend
//!
//! This crate applies converted specular values to a shader node tree. It
//! owns the in-memory collaborators of an import: the image library, the
//! node tree and the import settings.
//!
//! # Example
//!
//! ```
//! use specbridge_backend_shading::{
//!     import_specular, ImageLibrary, ImportContext, ImportSettings, NodeKind, NodeTree,
//!     Placement, SocketRef, SpecularOutcome, SpecularRequest,
//! };
//! use specbridge_spec::{Document, Material};
//!
//! let material: Material = serde_json::from_str(
//!     r#"{"extensions": {"KHR_materials_specular": {}}}"#,
//! ).unwrap();
//!
//! let document = Document::default();
//! let settings = ImportSettings::default();
//! let mut images = ImageLibrary::new();
//! let mut tree = NodeTree::new();
//! let bsdf = tree.add_node(NodeKind::PrincipledBsdf, [0.0, 0.0]);
//!
//! let mut ctx = ImportContext {
//!     document: &document,
//!     images: &mut images,
//!     tree: &mut tree,
//!     settings: &settings,
//! };
//! let request = SpecularRequest {
//!     material: &material,
//!     specular_socket: Some(SocketRef::new(bsdf, "Specular")),
//!     specular_tint_socket: Some(SocketRef::new(bsdf, "Specular Tint")),
//!     base_color_image: None,
//!     transmission_image: None,
//!     placement: Placement::default(),
//! };
//!
//! let outcome = import_specular(&mut ctx, &request).unwrap();
//! assert!(matches!(outcome, SpecularOutcome::Scalar(_)));
//! ```
//!
//! # Modules
//!
//! - [`specular`]: the import entry point and path selection
//! - [`publish`]: generated images and their texture nodes
//! - [`texture_node`]: image texture, mapping and UV map node chains
//! - [`graph`]: the node tree
//! - [`images`]: the image library
//! - [`config`]: import settings

pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod images;
pub mod publish;
pub mod specular;
pub mod texture_node;

// Re-export main types for convenience
pub use config::ImportSettings;
pub use context::ImportContext;
pub use error::{ShadingError, ShadingResult};
pub use graph::{
    Extension, InputSocket, Interpolation, Link, Node, NodeId, NodeKind, NodeTree, SocketRef,
    SocketValue,
};
pub use images::{ImageLibrary, LibraryImage};
pub use publish::{publish, Placement, PublishedImages, SPECULAR_LABEL, SPECULAR_TINT_LABEL};
pub use specular::{import_specular, SkipReason, SpecularOutcome, SpecularRequest};
pub use texture_node::{add_texture_node, TextureNode};
