//! POML WASM API
//!
//! The JavaScript-facing surface of the codec.
//!
//! # Module Structure
//!
//! - `helpers`: console logging and `JsValue` conversions
//! - `codec`: parse/build entry points

pub mod codec;
pub mod helpers;

pub use codec::{build_poml, build_poml_json, parse_poml, parse_poml_json};
