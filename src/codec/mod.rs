//! POML codec
//!
//! Converts between POML text and the typed [`Poml`] model in two stages: the
//! `xml` layer turns text into a generic, order-preserving tree, and the
//! modules here map that tree to the scene-graph model and back.
//!
//! # Module Structure
//!
//! - `attributes`: scalar and vector attribute grammars
//! - `geometry`: vertex and index grammars of `<line>`/`<polygon>`
//! - `tags`: tag vocabulary and deprecated aliases
//! - `parser`: generic tree → model
//! - `builder`: model → generic tree
//! - `document`: the `<poml>` envelope
//! - `json`: the model as JSON text

pub mod attributes;
pub mod builder;
pub mod document;
pub mod geometry;
pub mod json;
pub mod options;
pub mod parser;
pub mod tags;

pub use options::{BuildOptions, ParseOptions};

use crate::error::Result;
use crate::models::Poml;
use crate::xml;

/// Parse POML text with default options
///
/// Text without a `<poml>` element yields an empty document.
pub fn parse(text: &str) -> Result<Poml> {
    parse_with_options(text, &ParseOptions::default())
}

pub fn parse_with_options(text: &str, options: &ParseOptions) -> Result<Poml> {
    let nodes = xml::parse_document(text, options.max_depth)?;

    let poml = match document::find_poml_root(&nodes) {
        Some(root) => document::poml_from_root(root),
        None => {
            log::debug!("no <poml> element found, returning an empty document");
            Poml::default()
        }
    };

    log::trace!(
        "parsed POML: {} scene children, {} references, {} scripts",
        poml.scene.children.len(),
        poml.scene.coordinate_references.len(),
        poml.scene.script_elements.len()
    );
    Ok(poml)
}

/// Serialize a document to POML text
pub fn build(poml: &Poml, options: &BuildOptions) -> Result<String> {
    let nodes = document::build_document(poml, options);
    let text = xml::write_document(&nodes, options.indent_size)?;
    log::trace!("built POML: {} bytes", text.len());
    Ok(text)
}

/// Reusable parser/builder pair holding its configuration
#[derive(Debug, Clone, Default)]
pub struct PomlParser {
    parse_options: ParseOptions,
    build_options: BuildOptions,
}

impl PomlParser {
    pub fn new(parse_options: ParseOptions, build_options: BuildOptions) -> Self {
        Self {
            parse_options,
            build_options,
        }
    }

    pub fn parse(&self, text: &str) -> Result<Poml> {
        parse_with_options(text, &self.parse_options)
    }

    pub fn build(&self, poml: &Poml) -> Result<String> {
        build(poml, &self.build_options)
    }

    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    pub fn build_options(&self) -> &BuildOptions {
        &self.build_options
    }
}
