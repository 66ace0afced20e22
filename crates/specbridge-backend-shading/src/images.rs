//! The image library: named float images shared by every material.
//!
//! Callers materialize glTF images into the library and record which glTF
//! image index each library entry came from. The specular import reads
//! those entries and adds the two images it generates.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use specbridge_backend_texture::png::write_packed;
use specbridge_backend_texture::{PackedFile, SourceImage, TextureError};
use specbridge_spec::{Document, TextureInfo};
use tracing::{debug, warn};

use crate::error::ShadingError;

/// One image in the library.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryImage {
    pub image: SourceImage,
    /// Pixel values are data, not color (no color management applies).
    pub non_color: bool,
    /// Encoded PNG bytes, when the image was packed.
    pub packed: Option<PackedFile>,
}

/// Named images plus the glTF image index -> name map.
#[derive(Debug, Clone, Default)]
pub struct ImageLibrary {
    images: BTreeMap<String, LibraryImage>,
    gltf_sources: HashMap<usize, String>,
}

impl ImageLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Image names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&SourceImage> {
        self.images.get(name).map(|entry| &entry.image)
    }

    pub fn entry(&self, name: &str) -> Option<&LibraryImage> {
        self.images.get(name)
    }

    /// `base`, or `base.001`, `base.002`, ... whichever is free first.
    pub fn unique_name(&self, base: &str) -> String {
        if !self.images.contains_key(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{}.{:03}", base, n))
            .find(|candidate| !self.images.contains_key(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// Add an image under a unique variant of its name. Returns the name
    /// actually used.
    pub fn insert(
        &mut self,
        mut image: SourceImage,
        non_color: bool,
        packed: Option<PackedFile>,
    ) -> String {
        let name = self.unique_name(&image.name);
        if name != image.name {
            debug!(requested = %image.name, name = %name, "image name taken, renamed");
        }
        image.name = name.clone();
        self.images.insert(
            name.clone(),
            LibraryImage {
                image,
                non_color,
                packed,
            },
        );
        name
    }

    /// Add a materialized glTF image as a color image and remember its
    /// source index.
    pub fn insert_gltf_image(&mut self, source: usize, image: SourceImage) -> String {
        let name = self.insert(image, false, None);
        self.gltf_sources.insert(source, name.clone());
        name
    }

    /// Library name of a materialized glTF image.
    pub fn gltf_image_name(&self, source: usize) -> Option<&str> {
        self.gltf_sources.get(&source).map(String::as_str)
    }

    /// Follow texture -> source -> library entry for a texture reference.
    ///
    /// Any missing link is treated as "no image" and logged.
    pub fn image_for_texture(
        &self,
        document: &Document,
        info: &TextureInfo,
    ) -> Option<&SourceImage> {
        let Some(texture) = document.texture(info.index) else {
            warn!(texture = info.index, "texture index out of range");
            return None;
        };
        let Some(source) = texture.source else {
            warn!(texture = info.index, "texture has no image source");
            return None;
        };
        let Some(name) = self.gltf_image_name(source) else {
            warn!(texture = info.index, source, "image source was not materialized");
            return None;
        };
        let image = self.get(name);
        if image.is_none() {
            warn!(texture = info.index, name, "materialized image is missing from the library");
        }
        image
    }

    /// Write every packed image to `<dir>/<name>.png`.
    ///
    /// Path separators in a name are written as `_`, so every file lands
    /// directly in `dir`.
    pub fn write_packed_images(&self, dir: &Path) -> Result<Vec<PathBuf>, ShadingError> {
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::new();
        for (name, entry) in &self.images {
            let Some(packed) = &entry.packed else {
                continue;
            };
            let path = dir.join(format!("{}.png", file_stem(name)));
            write_packed(packed, &path).map_err(TextureError::from)?;
            debug!(path = %path.display(), hash = %packed.hash, "wrote packed image");
            written.push(path);
        }
        Ok(written)
    }
}

fn file_stem(name: &str) -> String {
    name.replace(&['/', '\\'][..], "_")
}
