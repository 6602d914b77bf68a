//! Geometry primitives owned by a `geometry` element

use crate::models::types::{GeodeticPosition, Vector3};
use crate::xml::AttributeMap;
use serde::{Deserialize, Serialize};

/// Vertex list of a line or polygon
///
/// `Raw` holds text the codec could not interpret; it is written back as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "positions", rename_all = "camelCase")]
pub enum GeometryPositions {
    Raw(String),
    Relative(Vec<Vector3>),
    Geodetic(Vec<GeodeticPosition>),
}

/// Triangle index list of a polygon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeometryIndices {
    Raw(String),
    List(Vec<u32>),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineGeometry {
    pub vertices: Option<GeometryPositions>,
    pub color: Option<String>,
    pub original_attrs: AttributeMap,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolygonGeometry {
    pub vertices: Option<GeometryPositions>,
    pub indices: Option<GeometryIndices>,
    pub color: Option<String>,
    pub original_attrs: AttributeMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Geometry {
    Line(LineGeometry),
    Polygon(PolygonGeometry),
}

impl Geometry {
    pub fn tag_name(&self) -> &'static str {
        match self {
            Geometry::Line(_) => "line",
            Geometry::Polygon(_) => "polygon",
        }
    }

    pub fn vertices(&self) -> Option<&GeometryPositions> {
        match self {
            Geometry::Line(line) => line.vertices.as_ref(),
            Geometry::Polygon(polygon) => polygon.vertices.as_ref(),
        }
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            Geometry::Line(line) => line.color.as_deref(),
            Geometry::Polygon(polygon) => polygon.color.as_deref(),
        }
    }
}
