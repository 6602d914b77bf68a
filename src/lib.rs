//! POML codec WASM Module
//!
//! Parses POML scene markup into a typed scene-graph model and builds it back
//! into markup, keeping unknown tags, comments and unrecognized attributes
//! intact across a round trip.

pub mod api;
pub mod codec;
pub mod error;
pub mod models;
pub mod xml;

// Re-export commonly used types
pub use codec::{build, parse, parse_with_options, BuildOptions, ParseOptions, PomlParser};
pub use error::{PomlError, Result};
pub use models::*;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        log::warn!("console logger not installed: {}", err);
    }

    log::info!("POML codec WASM module initialized");
}
