//! Typed POML document model
//!
//! Values are built once per parse or build call and never mutated
//! afterwards. Attribute maps keep insertion order, which is what makes
//! attribute text round-trip stable.

pub mod document;
pub mod elements;
pub mod geometry;
pub mod types;

// Re-export commonly used types
pub use document::*;
pub use elements::*;
pub use geometry::*;
pub use types::*;
pub use crate::xml::AttributeMap;
