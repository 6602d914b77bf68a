//! Tag vocabulary
//!
//! The complete set of tag names the codec interprets. Anything not listed
//! here is kept as an unknown node.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// What a tag name is classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Empty,
    Text,
    Model,
    Image,
    Video,
    Geometry,
    Cesium3dTiles,
    ScreenSpace,
    SpaceReference,
    GeoReference,
    Script,
}

/// Tag → kind, including deprecated aliases
static TAG_TABLE: Lazy<HashMap<&'static str, TagKind>> = Lazy::new(|| {
    HashMap::from([
        ("element", TagKind::Empty),
        ("text", TagKind::Text),
        ("model", TagKind::Model),
        ("image", TagKind::Image),
        ("video", TagKind::Video),
        ("geometry", TagKind::Geometry),
        ("cesium3dtiles", TagKind::Cesium3dTiles),
        ("screen-space", TagKind::ScreenSpace),
        ("space-reference", TagKind::SpaceReference),
        ("space-placement", TagKind::SpaceReference), // deprecated
        ("geo-reference", TagKind::GeoReference),
        ("geo-placement", TagKind::GeoReference), // deprecated
        ("script", TagKind::Script),
    ])
});

pub fn classify_tag(name: &str) -> Option<TagKind> {
    TAG_TABLE.get(name).copied()
}

/// Primitive tags recognized only as direct children of `<geometry>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryTag {
    Line,
    Polygon,
}

pub fn classify_geometry_tag(name: &str) -> Option<GeometryTag> {
    match name {
        "line" => Some(GeometryTag::Line),
        "polygon" => Some(GeometryTag::Polygon),
        _ => None,
    }
}
