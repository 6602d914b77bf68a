//! Generic tree → typed model
//!
//! Each node is classified by tag *before* any recursion, into exactly one of
//! child element, coordinate reference or script. Unknown tags stop the
//! descent: their whole subtree is stored as-is, so known tag names nested
//! inside them never reach the reference or script collections.

use crate::codec::attributes::{
    parse_boolean_or_number, parse_custom_attributes, parse_number, parse_quaternion, parse_scale,
    parse_string_list, parse_vector3,
};
use crate::codec::geometry::{parse_geometry_indices, parse_geometry_positions};
use crate::codec::tags::{classify_geometry_tag, classify_tag, GeometryTag, TagKind};
use crate::models::{
    ArDisplay, BackfaceMode, CommonAttributes, CoordinateReference, Display, ElementKind,
    GeoReference, Geometry, GeometryIndices, GeometryPositions, LineGeometry, MediaAttributes,
    PolygonGeometry, PomlElement, PomlNode, PomlUnknown, ResourceAttributes, RotationMode,
    ScriptElement, SpaceReference, TextAttributes,
};
use crate::xml::{AttributeMap, XmlElement, XmlNode};

/// Result of classifying one generic node
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Node(PomlNode),
    CoordinateReference(CoordinateReference),
    Script(ScriptElement),
}

/// Children of one element, split three ways
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedChildren {
    pub children: Vec<PomlNode>,
    pub coordinate_references: Vec<CoordinateReference>,
    pub script_elements: Vec<ScriptElement>,
}

/// Classify every node and partition the results
pub fn parse_children<'a>(nodes: impl IntoIterator<Item = &'a XmlNode>) -> ParsedChildren {
    let mut parsed = ParsedChildren::default();
    for node in nodes {
        match parse_node(node) {
            Classified::Node(child) => parsed.children.push(child),
            Classified::CoordinateReference(reference) => {
                parsed.coordinate_references.push(reference)
            }
            Classified::Script(script) => parsed.script_elements.push(script),
        }
    }
    parsed
}

/// Classify one node by its tag and map it into the typed model
pub fn parse_node(node: &XmlNode) -> Classified {
    let element = match node {
        XmlNode::Element(element) => element,
        // text, comments and CDATA are carried through untouched
        _ => return unknown(node),
    };

    let Some(tag) = classify_tag(&element.name) else {
        log::debug!("keeping unknown tag <{}> verbatim", element.name);
        return unknown(node);
    };

    let attrs = &element.attributes;
    match tag {
        TagKind::SpaceReference => Classified::CoordinateReference(
            CoordinateReference::SpaceReference(parse_space_reference(attrs)),
        ),
        TagKind::GeoReference => Classified::CoordinateReference(
            CoordinateReference::GeoReference(parse_geo_reference(attrs)),
        ),
        TagKind::Script => Classified::Script(parse_script(attrs)),
        TagKind::Geometry => {
            let (geometries, rest) = partition_geometry_children(&element.children);
            element_node(element, ElementKind::Geometry { geometries }, rest)
        }
        TagKind::Empty => element_node(element, ElementKind::Empty, &element.children),
        TagKind::Text => element_node(
            element,
            ElementKind::Text(parse_text_attributes(attrs)),
            &element.children,
        ),
        TagKind::Model => element_node(
            element,
            ElementKind::Model(parse_resource_attributes(attrs)),
            &element.children,
        ),
        TagKind::Cesium3dTiles => element_node(
            element,
            ElementKind::Cesium3dTiles(parse_resource_attributes(attrs)),
            &element.children,
        ),
        TagKind::Image => element_node(
            element,
            ElementKind::Image(parse_media_attributes(attrs)),
            &element.children,
        ),
        TagKind::Video => element_node(
            element,
            ElementKind::Video(parse_media_attributes(attrs)),
            &element.children,
        ),
        TagKind::ScreenSpace => element_node(element, ElementKind::ScreenSpace, &element.children),
    }
}

fn unknown(node: &XmlNode) -> Classified {
    Classified::Node(PomlUnknown::new(node.clone()).into())
}

fn element_node<'a>(
    element: &XmlElement,
    kind: ElementKind,
    children: impl IntoIterator<Item = &'a XmlNode>,
) -> Classified {
    let parsed = parse_children(children);
    let element = PomlElement::new(kind)
        .with_common(parse_common_attributes(&element.attributes))
        .with_children(parsed.children)
        .with_coordinate_references(parsed.coordinate_references)
        .with_script_elements(parsed.script_elements);
    Classified::Node(element.into())
}

// ============================================================================
// ATTRIBUTE EXTRACTION
// ============================================================================

/// Typed value of `key`, or `None` if absent or unparseable
fn typed<T>(attrs: &AttributeMap, key: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let text = attrs.get(key)?;
    let value = parse(text);
    if value.is_none() {
        log::debug!("ignoring unparseable {}=\"{}\"", key, text);
    }
    value
}

fn string(attrs: &AttributeMap, key: &str) -> Option<String> {
    attrs.get(key).cloned()
}

pub fn parse_common_attributes(attrs: &AttributeMap) -> CommonAttributes {
    CommonAttributes {
        rotation_mode: typed(attrs, "rotation-mode", RotationMode::parse),
        position: typed(attrs, "position", parse_vector3),
        scale: typed(attrs, "scale", parse_scale),
        rotation: typed(attrs, "rotation", parse_quaternion),
        scale_by_distance: typed(attrs, "scale-by-distance", parse_boolean_or_number),
        min_scale: typed(attrs, "min-scale", parse_scale),
        max_scale: typed(attrs, "max-scale", parse_scale),
        display: typed(attrs, "display", Display::parse),
        ar_display: typed(attrs, "ar-display", ArDisplay::parse),
        id: string(attrs, "id"),
        web_link: string(attrs, "web-link"),
        ws_recv_url: string(attrs, "ws-recv-url"),
        custom_attributes: parse_custom_attributes(attrs),
        original_attrs: attrs.clone(),
    }
}

fn parse_text_attributes(attrs: &AttributeMap) -> TextAttributes {
    TextAttributes {
        text: string(attrs, "text"),
        font_size: string(attrs, "font-size"),
        font_color: string(attrs, "font-color"),
        background_color: string(attrs, "background-color"),
    }
}

fn parse_resource_attributes(attrs: &AttributeMap) -> ResourceAttributes {
    ResourceAttributes {
        src: string(attrs, "src"),
        filename: string(attrs, "filename"),
    }
}

fn parse_media_attributes(attrs: &AttributeMap) -> MediaAttributes {
    MediaAttributes {
        src: string(attrs, "src"),
        filename: string(attrs, "filename"),
        width: typed(attrs, "width", parse_number),
        height: typed(attrs, "height", parse_number),
        backface_mode: typed(attrs, "backface-mode", BackfaceMode::parse),
        backface_color: string(attrs, "backface-color"),
    }
}

fn parse_space_reference(attrs: &AttributeMap) -> SpaceReference {
    SpaceReference {
        id: string(attrs, "id"),
        space_type: string(attrs, "space-type"),
        space_id: string(attrs, "space-id"),
        position: typed(attrs, "position", parse_vector3),
        rotation: typed(attrs, "rotation", parse_quaternion),
        original_attrs: attrs.clone(),
    }
}

fn parse_geo_reference(attrs: &AttributeMap) -> GeoReference {
    GeoReference {
        id: string(attrs, "id"),
        latitude: typed(attrs, "latitude", parse_number),
        longitude: typed(attrs, "longitude", parse_number),
        ellipsoidal_height: typed(attrs, "ellipsoidal-height", parse_number),
        enu_rotation: typed(attrs, "enu-rotation", parse_quaternion),
        original_attrs: attrs.clone(),
    }
}

fn parse_script(attrs: &AttributeMap) -> ScriptElement {
    ScriptElement {
        id: string(attrs, "id"),
        src: string(attrs, "src"),
        filename: string(attrs, "filename"),
        args: attrs
            .get("args")
            .map(|args| parse_string_list(args))
            .unwrap_or_default(),
        original_attrs: attrs.clone(),
    }
}

// ============================================================================
// GEOMETRY PRIMITIVES
// ============================================================================

/// Split `<geometry>` children into primitives and ordinary nodes
fn partition_geometry_children(children: &[XmlNode]) -> (Vec<Geometry>, Vec<&XmlNode>) {
    let mut geometries = Vec::new();
    let mut rest = Vec::new();

    for child in children {
        let primitive = child
            .as_element()
            .and_then(|element| classify_geometry_tag(&element.name).map(|tag| (tag, element)));

        match primitive {
            Some((GeometryTag::Line, element)) => {
                geometries.push(Geometry::Line(parse_line(&element.attributes)))
            }
            Some((GeometryTag::Polygon, element)) => {
                geometries.push(Geometry::Polygon(parse_polygon(&element.attributes)))
            }
            None => rest.push(child),
        }
    }

    (geometries, rest)
}

/// Typed vertices when the grammar accepts them, the raw text otherwise
fn parse_vertices(attrs: &AttributeMap) -> Option<GeometryPositions> {
    let text = attrs.get("vertices")?;
    Some(parse_geometry_positions(text).unwrap_or_else(|| {
        log::debug!("keeping uninterpreted vertices=\"{}\"", text);
        GeometryPositions::Raw(text.clone())
    }))
}

fn parse_line(attrs: &AttributeMap) -> LineGeometry {
    LineGeometry {
        vertices: parse_vertices(attrs),
        color: string(attrs, "color"),
        original_attrs: attrs.clone(),
    }
}

fn parse_polygon(attrs: &AttributeMap) -> PolygonGeometry {
    PolygonGeometry {
        vertices: parse_vertices(attrs),
        indices: typed(attrs, "indices", parse_geometry_indices).map(GeometryIndices::List),
        color: string(attrs, "color"),
        original_attrs: attrs.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Quaternion, Scale, ScaleByDistance, Vector3};
    use crate::xml::parse_document;

    fn parse_fragment(xml: &str) -> ParsedChildren {
        let nodes = parse_document(xml, None).unwrap();
        parse_children(&nodes)
    }

    fn element(parsed: &ParsedChildren, index: usize) -> &PomlElement {
        parsed.children[index]
            .as_element()
            .expect("expected a known element")
    }

    #[test]
    fn test_common_attributes() {
        let parsed = parse_fragment(
            r#"<element position="1,2,3" scale="1" rotation="0.1 -0.2 -0.3 0.4"
                        scale-by-distance="true" min-scale="2 3 4" display="none"
                        ar-display="same-as-display" rotation-mode="billboard" id="a"
                        web-link="https://example.com" ws-recv-url="ws://localhost:8000"/>"#,
        );
        let common = &element(&parsed, 0).common;
        assert_eq!(common.position, Some(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(common.scale, Some(Scale::Uniform(1.0)));
        assert_eq!(common.rotation, Some(Quaternion::new(0.1, -0.2, -0.3, 0.4)));
        assert_eq!(common.scale_by_distance, Some(ScaleByDistance::Enabled(true)));
        assert_eq!(common.min_scale, Some(Scale::Vector(Vector3::new(2.0, 3.0, 4.0))));
        assert_eq!(common.max_scale, None);
        assert_eq!(common.display, Some(Display::None));
        assert_eq!(common.ar_display, Some(ArDisplay::SameAsDisplay));
        assert_eq!(common.rotation_mode, Some(RotationMode::Billboard));
        assert_eq!(common.id.as_deref(), Some("a"));
        assert_eq!(common.web_link.as_deref(), Some("https://example.com"));
        assert_eq!(common.ws_recv_url.as_deref(), Some("ws://localhost:8000"));
        assert_eq!(common.original_attrs.len(), 11);
    }

    #[test]
    fn test_malformed_values_are_unset_but_preserved() {
        let parsed = parse_fragment(r#"<element position="1,2" display="hidden"/>"#);
        let common = &element(&parsed, 0).common;
        assert_eq!(common.position, None);
        assert_eq!(common.display, None);
        assert_eq!(common.original_attrs.get("position").map(String::as_str), Some("1,2"));
        assert_eq!(common.original_attrs.get("display").map(String::as_str), Some("hidden"));
    }

    #[test]
    fn test_id_values_are_literal() {
        let parsed = parse_fragment(r#"<element id="null"/><element id=""/><element/>"#);
        assert_eq!(element(&parsed, 0).id(), Some("null"));
        assert_eq!(element(&parsed, 1).id(), Some(""));
        assert_eq!(element(&parsed, 2).id(), None);
    }

    #[test]
    fn test_variant_attributes() {
        let parsed = parse_fragment(
            r##"<text text="text1" font-size="1m" font-color="blue" background-color="red"/>
               <image src="image1" width="2" height="1.5" backface-mode="flipped" backface-color="#fff"/>
               <cesium3dtiles src="tileset"/>"##,
        );
        match &element(&parsed, 0).kind {
            ElementKind::Text(text) => {
                assert_eq!(text.text.as_deref(), Some("text1"));
                assert_eq!(text.font_size.as_deref(), Some("1m"));
                assert_eq!(text.font_color.as_deref(), Some("blue"));
                assert_eq!(text.background_color.as_deref(), Some("red"));
            }
            other => panic!("Expected text, got {:?}", other),
        }
        match &element(&parsed, 1).kind {
            ElementKind::Image(image) => {
                assert_eq!(image.src.as_deref(), Some("image1"));
                assert_eq!(image.width, Some(2.0));
                assert_eq!(image.height, Some(1.5));
                assert_eq!(image.backface_mode, Some(BackfaceMode::Flipped));
                assert_eq!(image.backface_color.as_deref(), Some("#fff"));
            }
            other => panic!("Expected image, got {:?}", other),
        }
        assert_eq!(element(&parsed, 2).tag_name(), "cesium3dtiles");
    }

    #[test]
    fn test_geometry_partition_is_disjoint() {
        let parsed = parse_fragment(
            r#"<geometry>
                 <geo-reference latitude="1" longitude="2" ellipsoidal-height="3"/>
                 <line vertices="1,2,3 4,5,6" color="red"/>
                 <element/>
               </geometry>"#,
        );
        let geometry = element(&parsed, 0);
        assert_eq!(geometry.coordinate_references.len(), 1);
        assert_eq!(geometry.children.len(), 1);
        assert!(geometry.script_elements.is_empty());
        match &geometry.kind {
            ElementKind::Geometry { geometries } => {
                assert_eq!(geometries.len(), 1);
                assert_eq!(geometries[0].color(), Some("red"));
            }
            other => panic!("Expected geometry, got {:?}", other),
        }
    }

    #[test]
    fn test_polygon_primitive() {
        let parsed = parse_fragment(
            r#"<geometry><polygon vertices="geodetic: 1,2,3 4,5,6 7,8,9" indices="0 1 2" color="green"/></geometry>"#,
        );
        let ElementKind::Geometry { geometries } = &element(&parsed, 0).kind else {
            panic!("Expected geometry");
        };
        match &geometries[0] {
            Geometry::Polygon(polygon) => {
                assert!(matches!(
                    polygon.vertices,
                    Some(GeometryPositions::Geodetic(ref points)) if points.len() == 3
                ));
                assert_eq!(polygon.indices, Some(GeometryIndices::List(vec![0, 1, 2])));
            }
            other => panic!("Expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_uninterpreted_vertices_stay_raw() {
        let parsed = parse_fragment(r#"<geometry><line vertices="polar: 1 2 3"/></geometry>"#);
        let ElementKind::Geometry { geometries } = &element(&parsed, 0).kind else {
            panic!("Expected geometry");
        };
        assert_eq!(
            geometries[0].vertices(),
            Some(&GeometryPositions::Raw("polar: 1 2 3".to_string()))
        );
    }

    #[test]
    fn test_line_outside_geometry_is_unknown() {
        let parsed = parse_fragment(r#"<element><line vertices="1,2,3"/></element>"#);
        assert!(element(&parsed, 0).children[0].is_unknown());
    }

    #[test]
    fn test_references_and_scripts() {
        let parsed = parse_fragment(
            r#"<element>
                 <space-placement id="s" space-type="geospatial" space-id="abc" position="1 2 3"/>
                 <geo-placement id="g" latitude="35.6" longitude="139.7" ellipsoidal-height="10" enu-rotation="0 0 0 1"/>
                 <script src="test.wasm" args="arg 0.1"/>
               </element>"#,
        );
        let parent = element(&parsed, 0);
        assert!(parent.children.is_empty());
        assert_eq!(parent.coordinate_references.len(), 2);
        match &parent.coordinate_references[0] {
            CoordinateReference::SpaceReference(space) => {
                assert_eq!(space.id.as_deref(), Some("s"));
                assert_eq!(space.space_type.as_deref(), Some("geospatial"));
                assert_eq!(space.space_id.as_deref(), Some("abc"));
                assert_eq!(space.position, Some(Vector3::new(1.0, 2.0, 3.0)));
            }
            other => panic!("Expected space reference, got {:?}", other),
        }
        match &parent.coordinate_references[1] {
            CoordinateReference::GeoReference(geo) => {
                assert_eq!(geo.latitude, Some(35.6));
                assert_eq!(geo.longitude, Some(139.7));
                assert_eq!(geo.ellipsoidal_height, Some(10.0));
                assert_eq!(geo.enu_rotation, Some(Quaternion::new(0.0, 0.0, 0.0, 1.0)));
            }
            other => panic!("Expected geo reference, got {:?}", other),
        }
        assert_eq!(parent.script_elements.len(), 1);
        assert_eq!(parent.script_elements[0].args, vec!["arg", "0.1"]);
    }

    #[test]
    fn test_unknown_subtree_hides_known_tags() {
        let parsed = parse_fragment(
            r#"<foo><geo-reference latitude="1"/><script src="x"/><model src="test"/></foo>"#,
        );
        assert!(parsed.coordinate_references.is_empty());
        assert!(parsed.script_elements.is_empty());
        assert_eq!(parsed.children.len(), 1);

        let PomlNode::Unknown(unknown) = &parsed.children[0] else {
            panic!("Expected unknown node");
        };
        let original = unknown.original.as_element().unwrap();
        assert_eq!(original.name, "foo");
        assert_eq!(original.children.len(), 3);
        assert_eq!(
            original.children[2].as_element().unwrap().attribute("src"),
            Some("test")
        );
    }

    #[test]
    fn test_comment_becomes_unknown() {
        let parsed = parse_fragment("<element><!-- comment --></element>");
        let parent = element(&parsed, 0);
        assert!(parent.coordinate_references.is_empty());
        assert_eq!(
            parent.children[0],
            PomlNode::Unknown(PomlUnknown::new(XmlNode::Comment {
                text: " comment ".to_string()
            }))
        );
    }

    #[test]
    fn test_custom_attributes() {
        let parsed = parse_fragment(r#"<element _custom-attr="custom element data" id="x"/>"#);
        let common = &element(&parsed, 0).common;
        assert_eq!(
            common.custom_attributes.get("custom-attr").map(String::as_str),
            Some("custom element data")
        );
        assert!(common.original_attrs.contains_key("_custom-attr"));
    }
}
