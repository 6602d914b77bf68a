//! Parse and build configuration
//!
//! Both option types deserialize from partial objects (`#[serde(default)]`),
//! so JavaScript callers only pass the fields they want to change.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Maximum element nesting accepted from the input (`None` = unbounded)
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildOptions {
    /// Leave `_`-prefixed custom attributes out of the output
    pub ignore_custom_attributes: bool,

    /// Write `scale-by-distance="false"` instead of omitting it
    pub write_false_booleans: bool,

    /// Spaces per nesting level; 0 writes compact single-line output
    pub indent_size: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            ignore_custom_attributes: false,
            write_false_booleans: false,
            indent_size: 2,
        }
    }
}
