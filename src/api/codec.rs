//! Parse/build operations for the WASM API
//!
//! Two flavours of each call:
//! - `parsePoml` / `buildPoml` exchange plain JavaScript objects
//! - `parsePomlJson` / `buildPomlJson` exchange JSON text

use crate::api::helpers::{deserialize, deserialize_or_default, poml_error, serialize};
use crate::codec::{self, json, BuildOptions};
use crate::models::Poml;
use crate::{wasm_error, wasm_info, wasm_log};
use wasm_bindgen::prelude::*;

// ============================================================================
// Object API
// ============================================================================

/// Parse POML text into a document object
///
/// # Returns
/// `{ scene, meta }`; a document without a `<poml>` element gives an empty scene
#[wasm_bindgen(js_name = parsePoml)]
pub fn parse_poml(text: &str) -> Result<JsValue, JsValue> {
    wasm_info!("parsePoml called ({} bytes)", text.len());

    let poml = codec::parse(text).map_err(|e| poml_error("POML parse error", e))?;

    wasm_log!(
        "  Scene has {} children, {} references, {} scripts",
        poml.scene.children.len(),
        poml.scene.coordinate_references.len(),
        poml.scene.script_elements.len()
    );

    serialize(&poml, "Failed to serialize POML document")
}

/// Build POML text from a document object
///
/// # Parameters
/// * `poml` - document object as returned by `parsePoml`
/// * `options` - optional partial `{ ignoreCustomAttributes, writeFalseBooleans, indentSize }`
#[wasm_bindgen(js_name = buildPoml)]
pub fn build_poml(poml: JsValue, options: JsValue) -> Result<String, JsValue> {
    wasm_info!("buildPoml called");

    let poml: Poml = deserialize(poml, "Invalid POML document")?;
    let options: BuildOptions = deserialize_or_default(options, "Invalid build options")?;

    let text = codec::build(&poml, &options).map_err(|e| poml_error("POML build error", e))?;

    wasm_info!("  POML generated: {} bytes", text.len());
    Ok(text)
}

// ============================================================================
// JSON API
// ============================================================================

/// Parse POML text into the document model serialized as JSON
#[wasm_bindgen(js_name = parsePomlJson)]
pub fn parse_poml_json(text: &str) -> Result<String, JsValue> {
    wasm_info!("parsePomlJson called ({} bytes)", text.len());

    json::parse_to_json(text).map_err(|e| {
        wasm_error!("parsePomlJson failed");
        poml_error("POML parse error", e)
    })
}

/// Build POML text from a JSON document model
#[wasm_bindgen(js_name = buildPomlJson)]
pub fn build_poml_json(json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    wasm_info!("buildPomlJson called ({} bytes)", json.len());

    json::build_from_json(json, options_json.as_deref()).map_err(|e| {
        wasm_error!("buildPomlJson failed");
        poml_error("POML build error", e)
    })
}
