//! Image texture nodes and their coordinate chain.
//!
//! A generated image is sampled with the UV set and transform of a template
//! glTF texture reference:
//!
//! ```text
//! [UV Map] -> [Mapping] -> [Image Texture] -> destination socket
//! ```
//!
//! The mapping node exists only for `KHR_texture_transform`. The UV map
//! node exists when a non-default UV set is used or a mapping node needs an
//! explicit input.

use specbridge_spec::document::{
    FILTER_NEAREST, WRAP_CLAMP_TO_EDGE, WRAP_MIRRORED_REPEAT, WRAP_REPEAT,
};
use specbridge_spec::{Sampler, TextureInfo, TextureTransform};
use tracing::debug;

use crate::error::ShadingError;
use crate::graph::{Extension, Interpolation, NodeId, NodeKind, NodeTree, SocketRef};

/// Horizontal gap between chained nodes.
const NODE_SPACING: f64 = 240.0;

/// Description of one image texture node to insert.
#[derive(Debug, Clone, Copy)]
pub struct TextureNode<'a> {
    pub image: &'a str,
    pub label: &'a str,
    pub location: [f64; 2],
    /// Source of the UV set and texture transform.
    pub template: Option<&'a TextureInfo>,
    pub sampler: Option<&'a Sampler>,
}

/// Mapping node values equivalent to a glTF texture transform.
///
/// glTF rotates around the UV origin with V pointing down; the mapping node
/// works with V up, so the offset is moved to compensate.
pub fn mapping_from_transform(transform: &TextureTransform) -> ([f64; 2], f64, [f64; 2]) {
    let [offset_x, offset_y] = transform.offset;
    let [scale_x, scale_y] = transform.scale;
    let rotation = transform.rotation;

    let translation = [
        offset_x - scale_y * rotation.sin(),
        1.0 - offset_y - scale_y * rotation.cos(),
    ];
    (translation, rotation, [scale_x, scale_y])
}

/// Name of the UV map for a `TEXCOORD_n` index.
pub fn uv_map_name(tex_coord: u32) -> String {
    if tex_coord == 0 {
        "UVMap".to_string()
    } else {
        format!("UVMap.{:03}", tex_coord)
    }
}

pub fn interpolation_for(sampler: Option<&Sampler>) -> Interpolation {
    match sampler.and_then(|s| s.mag_filter) {
        Some(FILTER_NEAREST) => Interpolation::Closest,
        _ => Interpolation::Linear,
    }
}

/// Extension mode for a sampler. Wrap modes that differ between S and T
/// have no single equivalent and fall back to repeat.
pub fn extension_for(sampler: Option<&Sampler>) -> Extension {
    let Some(sampler) = sampler else {
        return Extension::Repeat;
    };
    match (sampler.wrap_s, sampler.wrap_t) {
        (WRAP_CLAMP_TO_EDGE, WRAP_CLAMP_TO_EDGE) => Extension::Extend,
        (WRAP_MIRRORED_REPEAT, WRAP_MIRRORED_REPEAT) => Extension::Mirror,
        (WRAP_REPEAT, WRAP_REPEAT) => Extension::Repeat,
        (s, t) => {
            debug!(wrap_s = s, wrap_t = t, "mixed wrap modes, using repeat");
            Extension::Repeat
        }
    }
}

/// Insert an image texture node feeding `dest`, with the UV map and mapping
/// nodes its template needs.
///
/// `dest` is checked before any node is added.
pub fn add_texture_node(
    tree: &mut NodeTree,
    spec: &TextureNode<'_>,
    dest: &SocketRef,
) -> Result<NodeId, ShadingError> {
    if !tree.has_input(dest) {
        return Err(ShadingError::unknown_socket(dest.node.0, &dest.socket));
    }

    let [x, y] = spec.location;
    let tex = tree.add_node(
        NodeKind::ImageTexture {
            image: spec.image.to_string(),
            interpolation: interpolation_for(spec.sampler),
            extension: extension_for(spec.sampler),
        },
        [x, y],
    );
    tree.set_label(tex, spec.label);

    let tex_coord = spec.template.map_or(0, TextureInfo::effective_tex_coord);
    let transform = spec.template.and_then(TextureInfo::transform);

    let mut vector_input = SocketRef::new(tex, "Vector");
    let mut next_x = x - NODE_SPACING;

    if let Some(transform) = transform {
        let (translation, rotation, scale) = mapping_from_transform(transform);
        let mapping = tree.add_node(
            NodeKind::Mapping {
                translation,
                rotation,
                scale,
            },
            [next_x, y],
        );
        tree.link(mapping, "Vector", &vector_input)?;
        vector_input = SocketRef::new(mapping, "Vector");
        next_x -= NODE_SPACING;
    }

    if tex_coord != 0 || transform.is_some() {
        let uv = tree.add_node(
            NodeKind::UvMap {
                uv_map: uv_map_name(tex_coord),
            },
            [next_x, y],
        );
        tree.link(uv, "UV", &vector_input)?;
    }

    tree.link(tex, "Color", dest)?;
    debug!(node = tex.0, image = spec.image, label = spec.label, "inserted image texture node");
    Ok(tex)
}
