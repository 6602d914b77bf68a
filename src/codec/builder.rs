//! Typed model → generic tree
//!
//! Attribute order: the preserved original map first, then the common
//! attributes, then the tag-specific ones. Re-setting a key that came from the
//! original map updates its value in place, so untouched attributes keep both
//! their text and their position.
//!
//! Child order is fixed: coordinate references, children, scripts, and for
//! `<geometry>` the primitives last.

use crate::codec::attributes::{
    build_boolean_or_number, build_number, build_quaternion, build_scale, build_string_list,
    build_vector3, custom_attribute_key, is_custom_attribute_key,
};
use crate::codec::geometry::{build_geometry_indices, build_geometry_positions};
use crate::codec::options::BuildOptions;
use crate::models::{
    CommonAttributes, CoordinateReference, ElementKind, GeoReference, Geometry, MediaAttributes,
    PomlElement, PomlNode, ResourceAttributes, ScriptElement, SpaceReference, TextAttributes,
};
use crate::xml::{AttributeMap, XmlElement, XmlNode};

pub fn build_node(node: &PomlNode, options: &BuildOptions) -> XmlNode {
    match node {
        PomlNode::Element(element) => build_element(element, options).into(),
        PomlNode::Unknown(unknown) => unknown.original.clone(),
    }
}

pub fn build_element(element: &PomlElement, options: &BuildOptions) -> XmlElement {
    let mut attrs = original_attributes(&element.common.original_attrs, options);
    write_common_attributes(&mut attrs, &element.common, options);

    match &element.kind {
        ElementKind::Text(text) => write_text_attributes(&mut attrs, text),
        ElementKind::Model(resource) | ElementKind::Cesium3dTiles(resource) => {
            write_resource_attributes(&mut attrs, resource)
        }
        ElementKind::Image(media) | ElementKind::Video(media) => {
            write_media_attributes(&mut attrs, media)
        }
        ElementKind::Empty | ElementKind::Geometry { .. } | ElementKind::ScreenSpace => {}
    }

    let mut children = build_children(
        &element.coordinate_references,
        &element.children,
        &element.script_elements,
        options,
    );
    if let ElementKind::Geometry { geometries } = &element.kind {
        children.extend(geometries.iter().map(|g| build_geometry(g, options)));
    }

    XmlElement::new(element.tag_name())
        .with_attributes(attrs)
        .with_children(children)
}

/// Structural children in the canonical order
pub fn build_children(
    coordinate_references: &[CoordinateReference],
    children: &[PomlNode],
    script_elements: &[ScriptElement],
    options: &BuildOptions,
) -> Vec<XmlNode> {
    coordinate_references
        .iter()
        .map(|r| XmlNode::from(build_coordinate_reference(r, options)))
        .chain(children.iter().map(|c| build_node(c, options)))
        .chain(script_elements.iter().map(|s| XmlNode::from(build_script(s, options))))
        .collect()
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

fn set(attrs: &mut AttributeMap, key: &str, value: Option<String>) {
    if let Some(value) = value {
        attrs.insert(key.to_string(), value);
    }
}

/// Starting attribute map; drops preserved custom attributes when they are ignored
pub fn original_attributes(original: &AttributeMap, options: &BuildOptions) -> AttributeMap {
    if !options.ignore_custom_attributes {
        return original.clone();
    }
    original
        .iter()
        .filter(|(key, _)| !is_custom_attribute_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

pub fn write_custom_attributes(attrs: &mut AttributeMap, custom: &AttributeMap, options: &BuildOptions) {
    if options.ignore_custom_attributes {
        return;
    }
    for (name, value) in custom {
        attrs.insert(custom_attribute_key(name), value.clone());
    }
}

fn write_common_attributes(attrs: &mut AttributeMap, common: &CommonAttributes, options: &BuildOptions) {
    set(attrs, "rotation-mode", common.rotation_mode.map(|m| m.as_str().to_string()));
    set(attrs, "position", common.position.as_ref().map(build_vector3));
    set(attrs, "scale", common.scale.as_ref().map(build_scale));
    set(attrs, "rotation", common.rotation.as_ref().map(build_quaternion));
    set(
        attrs,
        "scale-by-distance",
        common
            .scale_by_distance
            .as_ref()
            .and_then(|s| build_boolean_or_number(s, options.write_false_booleans)),
    );
    set(attrs, "min-scale", common.min_scale.as_ref().map(build_scale));
    set(attrs, "max-scale", common.max_scale.as_ref().map(build_scale));
    set(attrs, "display", common.display.map(|d| d.as_str().to_string()));
    set(attrs, "ar-display", common.ar_display.map(|d| d.as_str().to_string()));
    set(attrs, "id", common.id.clone());
    set(attrs, "web-link", common.web_link.clone());
    set(attrs, "ws-recv-url", common.ws_recv_url.clone());
    write_custom_attributes(attrs, &common.custom_attributes, options);
}

fn write_text_attributes(attrs: &mut AttributeMap, text: &TextAttributes) {
    set(attrs, "text", text.text.clone());
    set(attrs, "font-size", text.font_size.clone());
    set(attrs, "font-color", text.font_color.clone());
    set(attrs, "background-color", text.background_color.clone());
}

fn write_resource_attributes(attrs: &mut AttributeMap, resource: &ResourceAttributes) {
    set(attrs, "src", resource.src.clone());
    set(attrs, "filename", resource.filename.clone());
}

fn write_media_attributes(attrs: &mut AttributeMap, media: &MediaAttributes) {
    set(attrs, "src", media.src.clone());
    set(attrs, "filename", media.filename.clone());
    set(attrs, "width", media.width.map(build_number));
    set(attrs, "height", media.height.map(build_number));
    set(attrs, "backface-mode", media.backface_mode.map(|m| m.as_str().to_string()));
    set(attrs, "backface-color", media.backface_color.clone());
}

// ============================================================================
// NON-ELEMENT NODES
// ============================================================================

fn build_coordinate_reference(reference: &CoordinateReference, options: &BuildOptions) -> XmlElement {
    let attrs = match reference {
        CoordinateReference::SpaceReference(space) => space_reference_attributes(space, options),
        CoordinateReference::GeoReference(geo) => geo_reference_attributes(geo, options),
    };
    XmlElement::new(reference.tag_name()).with_attributes(attrs)
}

fn space_reference_attributes(space: &SpaceReference, options: &BuildOptions) -> AttributeMap {
    let mut attrs = original_attributes(&space.original_attrs, options);
    set(&mut attrs, "id", space.id.clone());
    set(&mut attrs, "space-id", space.space_id.clone());
    set(&mut attrs, "space-type", space.space_type.clone());
    set(&mut attrs, "position", space.position.as_ref().map(build_vector3));
    set(&mut attrs, "rotation", space.rotation.as_ref().map(build_quaternion));
    attrs
}

fn geo_reference_attributes(geo: &GeoReference, options: &BuildOptions) -> AttributeMap {
    let mut attrs = original_attributes(&geo.original_attrs, options);
    set(&mut attrs, "id", geo.id.clone());
    set(&mut attrs, "latitude", geo.latitude.map(build_number));
    set(&mut attrs, "longitude", geo.longitude.map(build_number));
    set(&mut attrs, "ellipsoidal-height", geo.ellipsoidal_height.map(build_number));
    set(&mut attrs, "enu-rotation", geo.enu_rotation.as_ref().map(build_quaternion));
    attrs
}

fn build_script(script: &ScriptElement, options: &BuildOptions) -> XmlElement {
    let mut attrs = original_attributes(&script.original_attrs, options);
    set(&mut attrs, "id", script.id.clone());
    set(&mut attrs, "src", script.src.clone());
    set(&mut attrs, "filename", script.filename.clone());
    set(&mut attrs, "args", build_string_list(&script.args));
    XmlElement::new("script").with_attributes(attrs)
}

fn build_geometry(geometry: &Geometry, options: &BuildOptions) -> XmlNode {
    let attrs = match geometry {
        Geometry::Line(line) => {
            let mut attrs = original_attributes(&line.original_attrs, options);
            set(&mut attrs, "vertices", line.vertices.as_ref().map(build_geometry_positions));
            set(&mut attrs, "color", line.color.clone());
            attrs
        }
        Geometry::Polygon(polygon) => {
            let mut attrs = original_attributes(&polygon.original_attrs, options);
            set(&mut attrs, "vertices", polygon.vertices.as_ref().map(build_geometry_positions));
            set(&mut attrs, "indices", polygon.indices.as_ref().map(build_geometry_indices));
            set(&mut attrs, "color", polygon.color.clone());
            attrs
        }
    };
    XmlElement::new(geometry.tag_name()).with_attributes(attrs).into()
}
