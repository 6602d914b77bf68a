//! Document root, metadata and scene

use crate::models::elements::{CoordinateReference, PomlNode, ScriptElement};
use crate::xml::AttributeMap;
use serde::{Deserialize, Serialize};

/// A parsed POML document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Poml {
    pub scene: Scene,
    pub meta: Option<Meta>,
}

impl Poml {
    pub fn new(scene: Scene) -> Self {
        Self { scene, meta: None }
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub title: Option<String>,
}

/// The single top-level container
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scene {
    pub children: Vec<PomlNode>,
    pub coordinate_references: Vec<CoordinateReference>,
    pub script_elements: Vec<ScriptElement>,
    pub ws_recv_url: Option<String>,
    pub custom_attributes: AttributeMap,
    pub original_attrs: AttributeMap,
}

impl Scene {
    pub fn new(children: Vec<PomlNode>) -> Self {
        Self {
            children,
            ..Default::default()
        }
    }

    pub fn with_coordinate_references(mut self, references: Vec<CoordinateReference>) -> Self {
        self.coordinate_references = references;
        self
    }

    pub fn with_script_elements(mut self, scripts: Vec<ScriptElement>) -> Self {
        self.script_elements = scripts;
        self
    }

    pub fn with_ws_recv_url(mut self, url: impl Into<String>) -> Self {
        self.ws_recv_url = Some(url.into());
        self
    }

    pub fn with_custom_attributes(mut self, custom_attributes: AttributeMap) -> Self {
        self.custom_attributes = custom_attributes;
        self
    }
}
