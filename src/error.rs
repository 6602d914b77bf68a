//! Error types for POML parsing and building
//!
//! Attribute-level problems are never errors: malformed values simply leave the
//! typed field unset. The variants here cover the XML layer and the JSON bridge.

use thiserror::Error;

/// Errors produced by the POML codec
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PomlError {
    /// Input is not well-formed XML
    #[error("Invalid XML at position {position}: {message}")]
    InvalidXml { position: usize, message: String },

    /// Input ended while an element was still open
    #[error("Unclosed element: <{0}>")]
    UnclosedElement(String),

    /// Element nesting exceeded the configured `max_depth`
    #[error("Element nesting exceeds the depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// The XML writer failed
    #[error("XML serialization failed: {0}")]
    Serialize(String),

    /// JSON (de)serialization of the document model failed
    #[error("JSON conversion failed: {0}")]
    Json(String),
}

impl From<serde_json::Error> for PomlError {
    fn from(err: serde_json::Error) -> Self {
        PomlError::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PomlError>;
