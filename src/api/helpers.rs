//! Shared helpers for the WASM API
//!
//! Console logging macros plus the conversions between Rust values and
//! `JsValue` used by every exported function.

use crate::error::PomlError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [POML] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [POML] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log an error message with [POML] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

pub fn log_debug(msg: &str) {
    log(&format!("[POML] {}", msg));
}

pub fn log_info(msg: &str) {
    info(&format!("[POML] {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[POML] ❌ {}", msg));
}

// ============================================================================
// Conversion Helpers
// ============================================================================

/// Deserialize a value from JavaScript, logging failures
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| js_error(&format!("{}: {}", error_context, e)))
}

/// Like [`deserialize`], but `undefined`/`null` yield `T::default()`
pub fn deserialize_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        deserialize(value, error_context)
    }
}

/// Serialize a value to a plain JavaScript object
///
/// Attribute maps become ordinary objects (not `Map`s), so the result has the
/// same shape as the JSON produced by `parsePomlJson`.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| js_error(&format!("{}: {}", error_context, e)))
}

/// Convert a codec error into a thrown JavaScript `Error`
pub fn poml_error(context: &str, err: PomlError) -> JsValue {
    js_error(&format!("{}: {}", context, err))
}

fn js_error(msg: &str) -> JsValue {
    log_error(msg);
    js_sys::Error::new(msg).into()
}
