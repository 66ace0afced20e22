//! `KHR_materials_specular` import into principled "Specular" and
//! "Specular Tint".
//!
//! With constant inputs the two socket default values are written. When any
//! input is driven by an image, two non-color images are generated and
//! linked into the sockets through image texture nodes.

use specbridge_backend_texture::{
    convert_inputs, CompositeSources, ConversionResult, ScalarSpecular, SourceImage,
};
use specbridge_spec::{Material, MaterialSpecularInputs};
use tracing::{debug, warn};

use crate::context::ImportContext;
use crate::error::{ShadingError, ShadingResult};
use crate::graph::SocketRef;
use crate::images::ImageLibrary;
use crate::publish::{publish, Placement, PublishedImages};

/// One material's specular import request.
#[derive(Debug, Clone)]
pub struct SpecularRequest<'a> {
    pub material: &'a Material,
    /// Destination "Specular" socket, if the shader has one.
    pub specular_socket: Option<SocketRef>,
    /// Destination "Specular Tint" socket, if the shader has one.
    pub specular_tint_socket: Option<SocketRef>,
    /// Library name of the already materialized base color image.
    pub base_color_image: Option<&'a str>,
    /// Library name of the already materialized transmission image.
    pub transmission_image: Option<&'a str>,
    pub placement: Placement,
}

/// Why nothing was done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingSpecularSocket,
    MissingSpecularTintSocket,
    NoSpecularExtension,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpecularOutcome {
    Skipped(SkipReason),
    Scalar(ScalarSpecular),
    Texture(PublishedImages),
}

/// Convert a material's specular description and apply it to the shader.
///
/// Missing sockets or a missing `KHR_materials_specular` extension are not
/// errors: nothing is changed and [`SpecularOutcome::Skipped`] is returned.
/// A socket reference that does not resolve in the tree is an error.
pub fn import_specular(
    ctx: &mut ImportContext<'_>,
    request: &SpecularRequest<'_>,
) -> ShadingResult<SpecularOutcome> {
    let Some(specular_socket) = &request.specular_socket else {
        debug!("no specular socket, skipping");
        return Ok(SpecularOutcome::Skipped(SkipReason::MissingSpecularSocket));
    };
    let Some(tint_socket) = &request.specular_tint_socket else {
        debug!("no specular tint socket, skipping");
        return Ok(SpecularOutcome::Skipped(SkipReason::MissingSpecularTintSocket));
    };
    let Some(inputs) = MaterialSpecularInputs::from_material(request.material) else {
        debug!(material = ?request.material.name, "no KHR_materials_specular, skipping");
        return Ok(SpecularOutcome::Skipped(SkipReason::NoSpecularExtension));
    };

    for socket in [specular_socket, tint_socket] {
        if !ctx.tree.has_input(socket) {
            return Err(ShadingError::unknown_socket(socket.node.0, &socket.socket));
        }
    }

    let result = {
        let images: &ImageLibrary = &*ctx.images;
        let document = ctx.document;
        let sources = CompositeSources {
            specular: inputs
                .specular_texture
                .as_ref()
                .and_then(|info| images.image_for_texture(document, info)),
            specular_color: inputs
                .specular_color_texture
                .as_ref()
                .and_then(|info| images.image_for_texture(document, info)),
            base_color: named_image(images, request.base_color_image, "base color"),
            transmission: named_image(images, request.transmission_image, "transmission"),
        };
        convert_inputs(&inputs, &sources, ctx.settings.resample_filter)
    };

    match result {
        ConversionResult::Scalar(scalar) => {
            for socket in [specular_socket, tint_socket] {
                if ctx.tree.float_input(socket).is_none() {
                    return Err(ShadingError::unknown_socket(socket.node.0, &socket.socket));
                }
            }
            ctx.tree.set_float(specular_socket, scalar.specular)?;
            ctx.tree.set_float(tint_socket, scalar.tint)?;
            Ok(SpecularOutcome::Scalar(scalar))
        }
        ConversionResult::Texture(maps) => {
            let published = publish(
                ctx,
                &maps,
                inputs.template_texture(),
                (specular_socket, tint_socket),
                &request.placement,
            )?;
            Ok(SpecularOutcome::Texture(published))
        }
    }
}

fn named_image<'a>(
    images: &'a ImageLibrary,
    name: Option<&str>,
    role: &'static str,
) -> Option<&'a SourceImage> {
    let name = name?;
    let image = images.get(name);
    if image.is_none() {
        warn!(image = name, role, "resolved image is missing from the library");
    }
    image
}
