//! Shared state borrowed by one import call.

use specbridge_spec::Document;

use crate::config::ImportSettings;
use crate::graph::NodeTree;
use crate::images::ImageLibrary;

/// Everything an import reads or writes besides the material itself.
///
/// The image library and node tree are borrowed mutably for the whole
/// call. Separate materials can be imported concurrently with separate
/// contexts.
#[derive(Debug)]
pub struct ImportContext<'a> {
    pub document: &'a Document,
    pub images: &'a mut ImageLibrary,
    pub tree: &'a mut NodeTree,
    pub settings: &'a ImportSettings,
}
