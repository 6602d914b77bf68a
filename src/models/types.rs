//! Scalar and vector attribute value types
//!
//! Enumerations map one-to-one onto their wire literals via `parse`/`as_str`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

/// Point in geodetic coordinates
///
/// Wire triples are written `longitude,latitude,ellipsoidal-height`, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeodeticPosition {
    pub longitude: f64,
    pub latitude: f64,
    pub ellipsoidal_height: f64,
}

impl GeodeticPosition {
    pub fn new(longitude: f64, latitude: f64, ellipsoidal_height: f64) -> Self {
        Self {
            longitude,
            latitude,
            ellipsoidal_height,
        }
    }
}

/// `scale`, `min-scale` and `max-scale`: a uniform factor or per-axis factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scale {
    Uniform(f64),
    Vector(Vector3),
}

/// `scale-by-distance`: `true` or a numeric factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleByDistance {
    Enabled(bool),
    Factor(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationMode {
    VerticalBillboard,
    Billboard,
}

impl RotationMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "vertical-billboard" => Some(RotationMode::VerticalBillboard),
            "billboard" => Some(RotationMode::Billboard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RotationMode::VerticalBillboard => "vertical-billboard",
            RotationMode::Billboard => "billboard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    Visible,
    None,
    Occlusion,
}

impl Display {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "visible" => Some(Display::Visible),
            "none" => Some(Display::None),
            "occlusion" => Some(Display::Occlusion),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Display::Visible => "visible",
            Display::None => "none",
            Display::Occlusion => "occlusion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArDisplay {
    Visible,
    None,
    Occlusion,
    SameAsDisplay,
}

impl ArDisplay {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "visible" => Some(ArDisplay::Visible),
            "none" => Some(ArDisplay::None),
            "occlusion" => Some(ArDisplay::Occlusion),
            "same-as-display" => Some(ArDisplay::SameAsDisplay),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArDisplay::Visible => "visible",
            ArDisplay::None => "none",
            ArDisplay::Occlusion => "occlusion",
            ArDisplay::SameAsDisplay => "same-as-display",
        }
    }
}

/// How the back face of an image or video plane is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackfaceMode {
    None,
    Solid,
    Visible,
    Flipped,
}

impl BackfaceMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(BackfaceMode::None),
            "solid" => Some(BackfaceMode::Solid),
            "visible" => Some(BackfaceMode::Visible),
            "flipped" => Some(BackfaceMode::Flipped),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackfaceMode::None => "none",
            BackfaceMode::Solid => "solid",
            BackfaceMode::Visible => "visible",
            BackfaceMode::Flipped => "flipped",
        }
    }
}
