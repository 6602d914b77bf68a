//! JSON bridge for hosts that exchange the document model as text

use crate::codec::options::BuildOptions;
use crate::codec::{build, parse};
use crate::error::Result;
use crate::models::Poml;

/// Parse POML text and serialize the document model as JSON
pub fn parse_to_json(text: &str) -> Result<String> {
    let poml = parse(text)?;
    Ok(serde_json::to_string(&poml)?)
}

/// Build POML text from a JSON document model
///
/// `options_json` may be a partial `BuildOptions` object; `None` or an empty
/// string uses the defaults.
pub fn build_from_json(json: &str, options_json: Option<&str>) -> Result<String> {
    let poml: Poml = serde_json::from_str(json)?;
    let options = match options_json.map(str::trim) {
        Some(text) if !text.is_empty() => serde_json::from_str::<BuildOptions>(text)?,
        _ => BuildOptions::default(),
    };
    build(&poml, &options)
}
