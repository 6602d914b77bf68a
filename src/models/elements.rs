//! Scene-graph element types
//!
//! Every known element shares [`CommonAttributes`] and the three structural
//! collections (children, coordinate references, scripts). What differs per
//! tag lives in [`ElementKind`].

use crate::models::geometry::Geometry;
use crate::models::types::{ArDisplay, BackfaceMode, Display, Quaternion, RotationMode, Scale, ScaleByDistance, Vector3};
use crate::xml::{AttributeMap, XmlNode};
use serde::{Deserialize, Serialize};

/// Attributes understood on every element tag
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommonAttributes {
    pub rotation_mode: Option<RotationMode>,
    pub position: Option<Vector3>,
    pub scale: Option<Scale>,
    pub rotation: Option<Quaternion>,
    pub scale_by_distance: Option<ScaleByDistance>,
    pub min_scale: Option<Scale>,
    pub max_scale: Option<Scale>,
    pub display: Option<Display>,
    pub ar_display: Option<ArDisplay>,
    pub id: Option<String>,
    pub web_link: Option<String>,
    pub ws_recv_url: Option<String>,

    /// `_`-prefixed attributes, keyed without the prefix
    pub custom_attributes: AttributeMap,

    /// Every attribute present on the source tag, in source order
    pub original_attrs: AttributeMap,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextAttributes {
    pub text: Option<String>,
    pub font_size: Option<String>,
    pub font_color: Option<String>,
    pub background_color: Option<String>,
}

/// `model` and `cesium3dtiles`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceAttributes {
    pub src: Option<String>,
    pub filename: Option<String>,
}

/// `image` and `video`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaAttributes {
    pub src: Option<String>,
    pub filename: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub backface_mode: Option<BackfaceMode>,
    pub backface_color: Option<String>,
}

/// Tag-specific part of an element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ElementKind {
    #[default]
    #[serde(rename = "element")]
    Empty,
    Text(TextAttributes),
    Model(ResourceAttributes),
    Image(MediaAttributes),
    Video(MediaAttributes),
    Geometry {
        #[serde(default)]
        geometries: Vec<Geometry>,
    },
    #[serde(rename = "cesium3dtiles")]
    Cesium3dTiles(ResourceAttributes),
    ScreenSpace,
}

impl ElementKind {
    /// Tag name this kind is written as
    pub fn tag_name(&self) -> &'static str {
        match self {
            ElementKind::Empty => "element",
            ElementKind::Text(_) => "text",
            ElementKind::Model(_) => "model",
            ElementKind::Image(_) => "image",
            ElementKind::Video(_) => "video",
            ElementKind::Geometry { .. } => "geometry",
            ElementKind::Cesium3dTiles(_) => "cesium3dtiles",
            ElementKind::ScreenSpace => "screen-space",
        }
    }
}

/// A known scene-graph element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PomlElement {
    pub kind: ElementKind,
    pub common: CommonAttributes,
    pub children: Vec<PomlNode>,
    pub coordinate_references: Vec<CoordinateReference>,
    pub script_elements: Vec<ScriptElement>,
}

impl PomlElement {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn with_common(mut self, common: CommonAttributes) -> Self {
        self.common = common;
        self
    }

    pub fn with_children(mut self, children: Vec<PomlNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_coordinate_references(mut self, references: Vec<CoordinateReference>) -> Self {
        self.coordinate_references = references;
        self
    }

    pub fn with_script_elements(mut self, scripts: Vec<ScriptElement>) -> Self {
        self.script_elements = scripts;
        self
    }

    pub fn tag_name(&self) -> &'static str {
        self.kind.tag_name()
    }

    pub fn id(&self) -> Option<&str> {
        self.common.id.as_deref()
    }
}

/// Subtree the codec does not understand, kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PomlUnknown {
    pub original: XmlNode,
}

impl PomlUnknown {
    pub fn new(original: XmlNode) -> Self {
        Self { original }
    }
}

/// A child slot: either a known element or an opaque passthrough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum PomlNode {
    Element(PomlElement),
    Unknown(PomlUnknown),
}

impl PomlNode {
    pub fn as_element(&self) -> Option<&PomlElement> {
        match self {
            PomlNode::Element(element) => Some(element),
            PomlNode::Unknown(_) => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, PomlNode::Unknown(_))
    }
}

impl From<PomlElement> for PomlNode {
    fn from(element: PomlElement) -> Self {
        PomlNode::Element(element)
    }
}

impl From<PomlUnknown> for PomlNode {
    fn from(unknown: PomlUnknown) -> Self {
        PomlNode::Unknown(unknown)
    }
}

/// Anchors its parent to an external space
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpaceReference {
    pub id: Option<String>,
    pub space_type: Option<String>,
    pub space_id: Option<String>,
    pub position: Option<Vector3>,
    pub rotation: Option<Quaternion>,
    pub original_attrs: AttributeMap,
}

/// Anchors its parent to a geodetic location
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeoReference {
    pub id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ellipsoidal_height: Option<f64>,
    pub enu_rotation: Option<Quaternion>,
    pub original_attrs: AttributeMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CoordinateReference {
    SpaceReference(SpaceReference),
    GeoReference(GeoReference),
}

impl CoordinateReference {
    pub fn tag_name(&self) -> &'static str {
        match self {
            CoordinateReference::SpaceReference(_) => "space-reference",
            CoordinateReference::GeoReference(_) => "geo-reference",
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            CoordinateReference::SpaceReference(reference) => reference.id.as_deref(),
            CoordinateReference::GeoReference(reference) => reference.id.as_deref(),
        }
    }
}

/// Reference to executable content; never executed by the codec
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScriptElement {
    pub id: Option<String>,
    pub src: Option<String>,
    pub filename: Option<String>,
    pub args: Vec<String>,
    pub original_attrs: AttributeMap,
}
