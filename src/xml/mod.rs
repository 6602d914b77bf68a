//! Generic XML tree
//!
//! This is the order-preserving tree the codec maps to and from. It keeps
//! attributes in source order, comments as their literal text, and drops only
//! whitespace between tags, declarations and processing instructions.
//!
//! ```text
//! POML text
//!   ↓ [parser::parse_document, quick-xml Reader]
//! Vec<XmlNode>
//!   ↓ [codec]
//! Poml
//! ```

pub mod emitter;
pub mod parser;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use emitter::write_document;
pub use parser::parse_document;

/// Ordered attribute map (insertion order is the wire order)
pub type AttributeMap = IndexMap<String, String>;

/// One node of the generic tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum XmlNode {
    Element(XmlElement),
    Text { text: String },
    Comment { text: String },
    #[serde(rename = "cdata")]
    CData { text: String },
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// A tag with its attributes and ordered children
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct XmlElement {
    pub name: String,
    #[serde(default)]
    pub attributes: AttributeMap,
    #[serde(default)]
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: AttributeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: AttributeMap) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_children(mut self, children: Vec<XmlNode>) -> Self {
        self.children = children;
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Concatenated text of the direct text/CDATA children
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .children
            .iter()
            .filter_map(|child| match child {
                XmlNode::Text { text } | XmlNode::CData { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First direct child element with the given tag name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children
            .iter()
            .filter_map(XmlNode::as_element)
            .find(|child| child.name == name)
    }
}

impl From<XmlElement> for XmlNode {
    fn from(element: XmlElement) -> Self {
        XmlNode::Element(element)
    }
}
