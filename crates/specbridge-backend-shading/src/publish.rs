//! Publishing generated specular maps as images and texture nodes.

use specbridge_backend_texture::png::pack_rgba;
use specbridge_backend_texture::{
    PackedFile, SourceImage, SpecularMaps, TextureBuffer, TextureError,
};
use specbridge_spec::TextureInfo;
use tracing::debug;

use crate::context::ImportContext;
use crate::error::{ShadingError, ShadingResult};
use crate::graph::{NodeId, SocketRef};
use crate::texture_node::{add_texture_node, TextureNode};

pub const SPECULAR_LABEL: &str = "SPECULAR";
pub const SPECULAR_TINT_LABEL: &str = "SPECULAR TINT";

/// Editor positions for the two image texture nodes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub specular: [f64; 2],
    pub specular_tint: [f64; 2],
}

/// Images and nodes created by [`publish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedImages {
    pub specular_image: String,
    pub specular_tint_image: String,
    pub specular_node: NodeId,
    pub specular_tint_node: NodeId,
}

struct PreparedImage {
    image: SourceImage,
    packed: Option<PackedFile>,
}

fn prepare(
    ctx: &ImportContext<'_>,
    name: &str,
    buffer: &TextureBuffer,
) -> ShadingResult<PreparedImage> {
    let image = SourceImage::new(name, buffer.width, buffer.height, buffer.to_rgba_f32())?;
    let packed = if ctx.settings.pack_images {
        let packed = pack_rgba(buffer, &ctx.settings.png_config()).map_err(TextureError::from)?;
        debug!(image = name, bytes = packed.data.len(), hash = %packed.hash, "packed image");
        Some(packed)
    } else {
        None
    };
    Ok(PreparedImage { image, packed })
}

/// Store both maps as non-color images and wire them into the sockets.
///
/// Settings, socket checks and encoding happen before anything is added, so
/// a failure leaves the image library and the node tree unchanged.
pub fn publish(
    ctx: &mut ImportContext<'_>,
    maps: &SpecularMaps,
    template: Option<&TextureInfo>,
    sockets: (&SocketRef, &SocketRef),
    placement: &Placement,
) -> ShadingResult<PublishedImages> {
    ctx.settings.validate()?;
    let (specular_socket, tint_socket) = sockets;
    for socket in [specular_socket, tint_socket] {
        if !ctx.tree.has_input(socket) {
            return Err(ShadingError::unknown_socket(socket.node.0, &socket.socket));
        }
    }

    let specular = prepare(ctx, &ctx.settings.specular_image_name, &maps.specular)?;
    let tint = prepare(ctx, &ctx.settings.specular_tint_image_name, &maps.tint)?;

    let specular_image = ctx.images.insert(specular.image, true, specular.packed);
    let specular_tint_image = ctx.images.insert(tint.image, true, tint.packed);
    debug!(
        specular = %specular_image,
        tint = %specular_tint_image,
        width = maps.width,
        height = maps.height,
        "created specular images"
    );

    let document = ctx.document;
    let sampler = template
        .and_then(|info| document.texture(info.index))
        .and_then(|texture| document.sampler_for(texture));

    let specular_node = add_texture_node(
        ctx.tree,
        &TextureNode {
            image: &specular_image,
            label: SPECULAR_LABEL,
            location: placement.specular,
            template,
            sampler,
        },
        specular_socket,
    )?;
    let specular_tint_node = add_texture_node(
        ctx.tree,
        &TextureNode {
            image: &specular_tint_image,
            label: SPECULAR_TINT_LABEL,
            location: placement.specular_tint,
            template,
            sampler,
        },
        tint_socket,
    )?;

    Ok(PublishedImages {
        specular_image,
        specular_tint_image,
        specular_node,
        specular_tint_node,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImportSettings;
    use crate::graph::{NodeKind, NodeTree};
    use crate::images::ImageLibrary;
    use specbridge_backend_texture::Color;
    use specbridge_spec::Document;

    fn maps(w: u32, h: u32) -> SpecularMaps {
        SpecularMaps {
            width: w,
            height: h,
            specular: TextureBuffer::new(w, h, Color::gray(0.5)),
            tint: TextureBuffer::new(w, h, Color::gray(0.25)),
        }
    }

    #[test]
    fn test_publish_creates_non_color_images_and_links() {
        let document = Document::default();
        let settings = ImportSettings::default();
        let mut images = ImageLibrary::new();
        let mut tree = NodeTree::new();
        let bsdf = tree.add_node(NodeKind::PrincipledBsdf, [0.0, 0.0]);
        let spec_socket = SocketRef::new(bsdf, "Specular");
        let tint_socket = SocketRef::new(bsdf, "Specular Tint");

        let mut ctx = ImportContext {
            document: &document,
            images: &mut images,
            tree: &mut tree,
            settings: &settings,
        };
        let out = publish(
            &mut ctx,
            &maps(3, 2),
            None,
            (&spec_socket, &tint_socket),
            &Placement::default(),
        )
        .unwrap();

        assert_eq!(out.specular_image, "Specular");
        assert_eq!(out.specular_tint_image, "Specular Tint");

        let entry = images.entry("Specular").unwrap();
        assert!(entry.non_color);
        assert!(entry.packed.is_some());
        assert_eq!(entry.image.size(), (3, 2));
        assert!(images.entry("Specular Tint").unwrap().non_color);

        assert_eq!(tree.incoming(&spec_socket).unwrap().from.node, out.specular_node);
        assert_eq!(tree.incoming(&tint_socket).unwrap().from.node, out.specular_tint_node);
    }

    #[test]
    fn test_unknown_socket_leaves_everything_untouched() {
        let document = Document::default();
        let settings = ImportSettings::default();
        let mut images = ImageLibrary::new();
        let mut tree = NodeTree::new();
        let bsdf = tree.add_node(NodeKind::PrincipledBsdf, [0.0, 0.0]);

        let mut ctx = ImportContext {
            document: &document,
            images: &mut images,
            tree: &mut tree,
            settings: &settings,
        };
        let result = publish(
            &mut ctx,
            &maps(1, 1),
            None,
            (
                &SocketRef::new(bsdf, "Specular"),
                &SocketRef::new(bsdf, "Tint"),
            ),
            &Placement::default(),
        );

        assert!(result.is_err());
        assert!(images.is_empty());
        assert_eq!(tree.nodes().len(), 1);
    }

    #[test]
    fn test_invalid_image_name_leaves_everything_untouched() {
        let document = Document::default();
        let settings = ImportSettings {
            specular_image_name: "../Specular".to_string(),
            ..Default::default()
        };
        let mut images = ImageLibrary::new();
        let mut tree = NodeTree::new();
        let bsdf = tree.add_node(NodeKind::PrincipledBsdf, [0.0, 0.0]);

        let mut ctx = ImportContext {
            document: &document,
            images: &mut images,
            tree: &mut tree,
            settings: &settings,
        };
        let err = publish(
            &mut ctx,
            &maps(1, 1),
            None,
            (
                &SocketRef::new(bsdf, "Specular"),
                &SocketRef::new(bsdf, "Specular Tint"),
            ),
            &Placement::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ShadingError::InvalidSettings { .. }));
        assert!(images.is_empty());
        assert_eq!(tree.nodes().len(), 1);
    }

    #[test]
    fn test_unpacked_when_disabled() {
        let document = Document::default();
        let settings = ImportSettings {
            pack_images: false,
            ..Default::default()
        };
        let mut images = ImageLibrary::new();
        let mut tree = NodeTree::new();
        let bsdf = tree.add_node(NodeKind::PrincipledBsdf, [0.0, 0.0]);

        let mut ctx = ImportContext {
            document: &document,
            images: &mut images,
            tree: &mut tree,
            settings: &settings,
        };
        publish(
            &mut ctx,
            &maps(1, 1),
            None,
            (
                &SocketRef::new(bsdf, "Specular"),
                &SocketRef::new(bsdf, "Specular Tint"),
            ),
            &Placement::default(),
        )
        .unwrap();

        assert!(images.entry("Specular").unwrap().packed.is_none());
    }
}
