//! Assembly of the base color, transmission and specular color layers.
//!
//! The texture path runs when any input is image driven. Every present
//! image is brought to a single canonical resolution, multiplied by its
//! factor, and missing inputs are filled with their constant factor.
//!
//! Layers and outputs hold f64 components, so the working set is about
//! [`BYTES_PER_PIXEL`] bytes per canonical pixel: roughly 170 MB at 1024²
//! and 2.8 GB at 4096². The 16384² dimension limit is not practical in
//! memory; canvases above [`LARGE_WORKING_SET`] are logged.

use specbridge_spec::MaterialSpecularInputs;
use tracing::{debug, warn};

use crate::buffer::TextureLayer;
use crate::color::{Color, Rgb};
use crate::image::SourceImage;
use crate::resample::{ResampleFilter, TempImageGuard};

/// Peak bytes per canonical pixel: three RGB layers, two RGBA output
/// buffers and the f32 copies made when the outputs are published.
pub const BYTES_PER_PIXEL: u64 = 3 * 24 + 2 * 32 + 2 * 16;

/// Working sets above this size are logged at `warn`.
pub const LARGE_WORKING_SET: u64 = 4 << 30;

/// Estimated peak memory for converting at `width` x `height`.
pub fn working_set_bytes(width: u32, height: u32) -> u64 {
    u64::from(width) * u64::from(height) * BYTES_PER_PIXEL
}

/// Images resolved for one material. All borrowed, none mutated.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeSources<'a> {
    /// Image behind `specularTexture`. Supplies only a size.
    pub specular: Option<&'a SourceImage>,
    pub specular_color: Option<&'a SourceImage>,
    pub base_color: Option<&'a SourceImage>,
    pub transmission: Option<&'a SourceImage>,
}

/// The three RGB layers at canonical resolution, factors applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositedLayers {
    pub width: u32,
    pub height: u32,
    pub base_color: TextureLayer,
    pub transmission: TextureLayer,
    pub specular_color: TextureLayer,
}

/// Whether the conversion needs images rather than scalars.
///
/// True when the material declares a specular or specular color texture, or
/// when a base color or transmission image was materialized upstream.
pub fn uses_texture_path(inputs: &MaterialSpecularInputs, sources: &CompositeSources<'_>) -> bool {
    inputs.specular_texture.is_some()
        || inputs.specular_color_texture.is_some()
        || sources.transmission.is_some()
        || sources.base_color.is_some()
}

/// Per-axis maximum over the base color, transmission and specular color
/// images.
///
/// With none of those present, the specular image's size is used. With no
/// image at all (a declared texture that could not be materialized) the
/// result is 1x1.
pub fn canonical_resolution(sources: &CompositeSources<'_>) -> (u32, u32) {
    let sized = [sources.base_color, sources.transmission, sources.specular_color];
    let present = sized.iter().flatten().map(|img| img.size());

    let canonical = present.fold(None, |acc: Option<(u32, u32)>, (w, h)| match acc {
        Some((mw, mh)) => Some((mw.max(w), mh.max(h))),
        None => Some((w, h)),
    });

    canonical
        .or_else(|| sources.specular.map(|img| img.size()))
        .unwrap_or((1, 1))
}

/// Build the three layers, or `None` when no input is image driven.
pub fn composite(
    inputs: &MaterialSpecularInputs,
    sources: &CompositeSources<'_>,
    filter: ResampleFilter,
) -> Option<CompositedLayers> {
    if !uses_texture_path(inputs, sources) {
        return None;
    }

    let (width, height) = canonical_resolution(sources);
    let bytes = working_set_bytes(width, height);
    if bytes > LARGE_WORKING_SET {
        warn!(width, height, bytes, "large specular canvas");
    }
    debug!(width, height, bytes, "compositing specular layers");

    let t = inputs.transmission_factor;
    let transmission = match sources.transmission {
        Some(image) => read_layer(image, width, height, filter, |c| [c.r * t; 3]),
        None => TextureLayer::constant(width, height, [t; 3]),
    };

    let bc = inputs.base_color_factor;
    let base_color = match sources.base_color {
        Some(image) => read_layer(image, width, height, filter, |c| scale_rgb(c, bc)),
        None => TextureLayer::constant(width, height, bc),
    };

    let sc = inputs.specular_color_factor;
    let specular_color = match sources.specular_color {
        Some(image) => read_layer(image, width, height, filter, |c| scale_rgb(c, sc)),
        None => TextureLayer::constant(width, height, sc),
    };

    Some(CompositedLayers {
        width,
        height,
        base_color,
        transmission,
        specular_color,
    })
}

#[inline]
fn scale_rgb(c: Color, factor: Rgb) -> Rgb {
    [c.r * factor[0], c.g * factor[1], c.b * factor[2]]
}

/// Read an image as a layer at `width` x `height`, resampling a temporary
/// copy if the sizes differ.
fn read_layer(
    image: &SourceImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
    f: impl Fn(Color) -> Rgb,
) -> TextureLayer {
    if image.size() == (width, height) {
        let data = image
            .pixels()
            .chunks_exact(4)
            .map(|p| f(Color::from_rgba_f32([p[0], p[1], p[2], p[3]])))
            .collect();
        return TextureLayer {
            width,
            height,
            data,
        };
    }

    let mut guard = TempImageGuard::copy_of(image);
    guard.scale(width, height, filter);
    TextureLayer::from_buffer(guard.pixels(), f)
}
