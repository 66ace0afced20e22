//! End-to-end specular import over a parsed glTF document.

use std::io::Cursor;

use pretty_assertions::assert_eq;
use specbridge_backend_shading::{
    import_specular, Extension, ImageLibrary, ImportContext, ImportSettings, Interpolation,
    NodeId, NodeKind, NodeTree, Placement, SocketRef, SpecularOutcome, SpecularRequest,
    SPECULAR_LABEL, SPECULAR_TINT_LABEL,
};
use specbridge_backend_texture::SourceImage;
use specbridge_spec::Document;

const DOCUMENT: &str = r#"{
    "materials": [
        {
            "name": "varnish",
            "extensions": {
                "KHR_materials_specular": {
                    "specularColorFactor": [1.0, 1.0, 1.0],
                    "specularColorTexture": {
                        "index": 0,
                        "texCoord": 1,
                        "extensions": {
                            "KHR_texture_transform": { "scale": [2.0, 2.0] }
                        }
                    }
                }
            }
        },
        {
            "name": "layered",
            "extensions": {
                "KHR_materials_specular": {
                    "specularTexture": { "index": 1 },
                    "specularColorTexture": { "index": 0, "texCoord": 1 }
                }
            }
        },
        {
            "name": "glass",
            "pbrMetallicRoughness": { "baseColorFactor": [0.8, 0.8, 0.8, 1.0] },
            "extensions": {
                "KHR_materials_specular": { "specularColorFactor": [0.9, 0.9, 0.9] },
                "KHR_materials_transmission": { "transmissionFactor": 0.5 },
                "KHR_materials_ior": { "ior": 1.5 }
            }
        },
        {
            "name": "broken",
            "extensions": {
                "KHR_materials_specular": { "specularTexture": { "index": 9 } }
            }
        }
    ],
    "textures": [
        { "source": 0, "sampler": 0 },
        { "source": 1 }
    ],
    "samplers": [
        { "magFilter": 9728, "wrapS": 33071, "wrapT": 33071 }
    ],
    "images": [
        { "uri": "specular_color.png" },
        { "uri": "specular.png" }
    ]
}"#;

struct Scene {
    document: Document,
    settings: ImportSettings,
    images: ImageLibrary,
    tree: NodeTree,
    bsdf: NodeId,
}

impl Scene {
    fn new() -> Self {
        let document = Document::from_json(DOCUMENT).unwrap();
        let mut images = ImageLibrary::new();
        images.insert_gltf_image(
            0,
            SourceImage::filled("specular_color.png", 4, 4, [1.0, 1.0, 1.0, 1.0]).unwrap(),
        );
        images.insert_gltf_image(
            1,
            SourceImage::filled("specular.png", 16, 16, [1.0, 1.0, 1.0, 1.0]).unwrap(),
        );
        let mut tree = NodeTree::new();
        let bsdf = tree.add_node(NodeKind::PrincipledBsdf, [0.0, 0.0]);
        Self {
            document,
            settings: ImportSettings::default(),
            images,
            tree,
            bsdf,
        }
    }

    fn import(&mut self, material: usize, base_color_image: Option<&str>) -> SpecularOutcome {
        let material = &self.document.materials[material];
        let request = SpecularRequest {
            material,
            specular_socket: Some(SocketRef::new(self.bsdf, "Specular")),
            specular_tint_socket: Some(SocketRef::new(self.bsdf, "Specular Tint")),
            base_color_image,
            transmission_image: None,
            placement: Placement {
                specular: [-400.0, 0.0],
                specular_tint: [-400.0, -300.0],
            },
        };
        let mut ctx = ImportContext {
            document: &self.document,
            images: &mut self.images,
            tree: &mut self.tree,
            settings: &self.settings,
        };
        import_specular(&mut ctx, &request).unwrap()
    }

    fn socket(&self, name: &str) -> SocketRef {
        SocketRef::new(self.bsdf, name)
    }

    /// Node kind feeding the given input of `node`.
    fn upstream(&self, node: NodeId, input: &str) -> Option<&NodeKind> {
        let link = self.tree.incoming(&SocketRef::new(node, input))?;
        Some(&self.tree.node(link.from.node)?.kind)
    }
}

fn decode(data: &[u8]) -> (u32, u32, Vec<u8>) {
    let decoder = png::Decoder::new(Cursor::new(data));
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    (info.width, info.height, buf[..info.buffer_size()].to_vec())
}

#[test]
fn test_scalar_material_from_document() {
    let mut scene = Scene::new();
    let outcome = scene.import(2, None);

    let SpecularOutcome::Scalar(scalar) = outcome else {
        panic!("expected scalar outcome");
    };
    // (0.9 - 0.5) / 0.5 * 12.5 * 0.04
    assert!((scalar.specular - 0.4).abs() < 1e-12);
    // Gray specular color over a gray base.
    assert_eq!(scalar.tint, 0.0);

    let spec = scene.tree.float_input(&scene.socket("Specular")).unwrap();
    assert!((spec - 0.4).abs() < 1e-12);
    assert_eq!(scene.tree.links().len(), 0);
    assert_eq!(scene.images.len(), 2);
}

#[test]
fn test_texture_path_creates_images_nodes_and_links() {
    let mut scene = Scene::new();
    let base = scene.images.insert(
        SourceImage::filled("base", 2, 8, [0.5, 0.5, 0.5, 1.0]).unwrap(),
        false,
        None,
    );

    let published = match scene.import(0, Some(base.as_str())) {
        SpecularOutcome::Texture(published) => published,
        other => panic!("expected texture outcome, got {:?}", other),
    };

    for name in [&published.specular_image, &published.specular_tint_image] {
        let entry = scene.images.entry(name).unwrap();
        assert!(entry.non_color);
        // Per-axis maximum of 4x4 and 2x8.
        assert_eq!(entry.image.size(), (4, 8));
        let (w, h, _) = decode(&entry.packed.as_ref().unwrap().data);
        assert_eq!((w, h), (4, 8));
    }

    // Principled + 2 x (image texture, mapping, UV map).
    assert_eq!(scene.tree.nodes().len(), 7);
    assert_eq!(scene.tree.links().len(), 6);

    let spec_link = scene.tree.incoming(&scene.socket("Specular")).unwrap();
    assert_eq!(spec_link.from.node, published.specular_node);
    let tint_link = scene.tree.incoming(&scene.socket("Specular Tint")).unwrap();
    assert_eq!(tint_link.from.node, published.specular_tint_node);

    let spec_node = scene.tree.node(published.specular_node).unwrap();
    assert_eq!(spec_node.label.as_deref(), Some(SPECULAR_LABEL));
    assert_eq!(spec_node.location, [-400.0, 0.0]);
    assert_eq!(
        spec_node.kind,
        NodeKind::ImageTexture {
            image: published.specular_image.clone(),
            interpolation: Interpolation::Closest,
            extension: Extension::Extend,
        }
    );
    let tint_node = scene.tree.node(published.specular_tint_node).unwrap();
    assert_eq!(tint_node.label.as_deref(), Some(SPECULAR_TINT_LABEL));

    for node in [published.specular_node, published.specular_tint_node] {
        let Some(NodeKind::Mapping { scale, .. }) = scene.upstream(node, "Vector") else {
            panic!("expected mapping node before image texture");
        };
        assert_eq!(*scale, [2.0, 2.0]);
        let mapping = scene.tree.incoming(&SocketRef::new(node, "Vector")).unwrap().from.node;
        assert_eq!(
            scene.upstream(mapping, "Vector"),
            Some(&NodeKind::UvMap {
                uv_map: "UVMap.001".to_string()
            })
        );
    }
}

#[test]
fn test_specular_texture_is_template_for_both_nodes() {
    let mut scene = Scene::new();
    let published = match scene.import(1, None) {
        SpecularOutcome::Texture(published) => published,
        other => panic!("expected texture outcome, got {:?}", other),
    };

    // Template is the specular texture: texCoord 0, no transform, no sampler.
    for node in [published.specular_node, published.specular_tint_node] {
        assert!(scene.upstream(node, "Vector").is_none());
        assert!(matches!(
            scene.tree.node(node).unwrap().kind,
            NodeKind::ImageTexture {
                interpolation: Interpolation::Linear,
                extension: Extension::Repeat,
                ..
            }
        ));
    }
    // Canonical size comes from the specular color image, not the specular one.
    let entry = scene.images.entry(&published.specular_image).unwrap();
    assert_eq!(entry.image.size(), (4, 4));
}

#[test]
fn test_packed_pixels_hold_converted_values() {
    let mut scene = Scene::new();
    let published = match scene.import(1, None) {
        SpecularOutcome::Texture(published) => published,
        other => panic!("expected texture outcome, got {:?}", other),
    };

    let spec = scene.images.entry(&published.specular_image).unwrap();
    let (_, _, pixels) = decode(&spec.packed.as_ref().unwrap().data);
    assert!(pixels.chunks_exact(4).all(|p| p == [128, 128, 128, 255]));

    let tint = scene.images.entry(&published.specular_tint_image).unwrap();
    let (_, _, pixels) = decode(&tint.packed.as_ref().unwrap().data);
    assert!(pixels.chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}

#[test]
fn test_repeated_import_gets_unique_names() {
    let mut scene = Scene::new();
    scene.import(1, None);
    let second = match scene.import(1, None) {
        SpecularOutcome::Texture(published) => published,
        other => panic!("expected texture outcome, got {:?}", other),
    };
    assert_eq!(second.specular_image, "Specular.001");
    assert_eq!(second.specular_tint_image, "Specular Tint.001");
    // The second import replaced the links into both sockets.
    assert_eq!(scene.tree.links().len(), 2);
}

#[test]
fn test_dangling_texture_uses_single_pixel() {
    let mut scene = Scene::new();
    let published = match scene.import(3, None) {
        SpecularOutcome::Texture(published) => published,
        other => panic!("expected texture outcome, got {:?}", other),
    };
    let entry = scene.images.entry(&published.specular_image).unwrap();
    assert_eq!(entry.image.size(), (1, 1));
    assert!((entry.image.pixels()[0] - 0.5).abs() < 1e-6);
}

#[test]
fn test_write_packed_images_to_directory() {
    let mut scene = Scene::new();
    scene.import(1, None);

    let dir = tempfile::tempdir().unwrap();
    let written = scene.images.write_packed_images(dir.path()).unwrap();
    assert_eq!(written.len(), 2);
    assert!(dir.path().join("Specular.png").exists());
    assert!(dir.path().join("Specular Tint.png").exists());

    let bytes = std::fs::read(dir.path().join("Specular.png")).unwrap();
    let entry = scene.images.entry("Specular").unwrap();
    assert_eq!(bytes, entry.packed.as_ref().unwrap().data);
}
