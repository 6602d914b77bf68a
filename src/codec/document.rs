//! Document envelope: `<poml>`, `<meta>` and `<scene>`

use crate::codec::attributes::parse_custom_attributes;
use crate::codec::builder::{build_children, original_attributes, write_custom_attributes};
use crate::codec::options::BuildOptions;
use crate::codec::parser::parse_children;
use crate::models::{Meta, Poml, Scene};
use crate::xml::{XmlElement, XmlNode};

/// First `<poml>` element in document order, searched depth-first
///
/// The root may be wrapped in other markup (e.g. embedded in an HTML page).
pub fn find_poml_root(nodes: &[XmlNode]) -> Option<&XmlElement> {
    nodes.iter().filter_map(XmlNode::as_element).find_map(|element| {
        if element.name == "poml" {
            Some(element)
        } else {
            find_poml_root(&element.children)
        }
    })
}

pub fn poml_from_root(root: &XmlElement) -> Poml {
    let scene = match root.child("scene") {
        Some(scene) => parse_scene(scene),
        None => {
            log::debug!("<poml> has no <scene>, using an empty scene");
            Scene::default()
        }
    };

    Poml {
        scene,
        meta: root.child("meta").map(parse_meta),
    }
}

fn parse_meta(meta: &XmlElement) -> Meta {
    Meta {
        title: meta.child("title").and_then(XmlElement::text),
    }
}

fn parse_scene(scene: &XmlElement) -> Scene {
    let parsed = parse_children(&scene.children);
    Scene {
        children: parsed.children,
        coordinate_references: parsed.coordinate_references,
        script_elements: parsed.script_elements,
        ws_recv_url: scene.attribute("ws-recv-url").map(str::to_string),
        custom_attributes: parse_custom_attributes(&scene.attributes),
        original_attrs: scene.attributes.clone(),
    }
}

/// Generic tree for a whole document, rooted at `<poml>`
pub fn build_document(poml: &Poml, options: &BuildOptions) -> Vec<XmlNode> {
    let mut children = Vec::new();
    if let Some(meta) = &poml.meta {
        children.push(build_meta(meta).into());
    }
    children.push(build_scene(&poml.scene, options).into());

    vec![XmlElement::new("poml").with_children(children).into()]
}

fn build_meta(meta: &Meta) -> XmlElement {
    let children = match &meta.title {
        Some(title) => vec![XmlElement::new("title")
            .with_children(vec![XmlNode::Text {
                text: title.clone(),
            }])
            .into()],
        None => Vec::new(),
    };
    XmlElement::new("meta").with_children(children)
}

fn build_scene(scene: &Scene, options: &BuildOptions) -> XmlElement {
    let mut attrs = original_attributes(&scene.original_attrs, options);
    if let Some(url) = &scene.ws_recv_url {
        attrs.insert("ws-recv-url".to_string(), url.clone());
    }
    write_custom_attributes(&mut attrs, &scene.custom_attributes, options);

    let children = build_children(
        &scene.coordinate_references,
        &scene.children,
        &scene.script_elements,
        options,
    );
    XmlElement::new("scene")
        .with_attributes(attrs)
        .with_children(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    fn parse(xml: &str) -> Option<Poml> {
        let nodes = parse_document(xml, None).unwrap();
        find_poml_root(&nodes).map(poml_from_root)
    }

    #[test]
    fn test_root_embedded_in_html() {
        let poml = parse(
            r#"<html><body><!-- x --><div><poml><scene><model src="a"/></scene></poml></div></body></html>"#,
        )
        .unwrap();
        assert_eq!(poml.scene.children.len(), 1);
    }

    #[test]
    fn test_first_root_wins() {
        let poml = parse(
            r#"<poml><scene ws-recv-url="first"/></poml><poml><scene ws-recv-url="second"/></poml>"#,
        )
        .unwrap();
        assert_eq!(poml.scene.ws_recv_url.as_deref(), Some("first"));
    }

    #[test]
    fn test_missing_root() {
        assert_eq!(parse("<html><body/></html>"), None);
        assert_eq!(parse("<!-- poml -->"), None);
    }

    #[test]
    fn test_meta_title() {
        let poml = parse("<poml><meta><title>test title</title></meta><scene/></poml>").unwrap();
        assert_eq!(poml.meta.unwrap().title.as_deref(), Some("test title"));

        let empty = parse("<poml><meta/><scene/></poml>").unwrap();
        assert_eq!(empty.meta, Some(Meta { title: None }));

        let absent = parse("<poml><scene/></poml>").unwrap();
        assert_eq!(absent.meta, None);
    }

    #[test]
    fn test_scene_attributes() {
        let poml = parse(
            r#"<poml><scene ws-recv-url="ws://localhost:8000" _custom-attr="scene data" other="1"/></poml>"#,
        )
        .unwrap();
        assert_eq!(poml.scene.ws_recv_url.as_deref(), Some("ws://localhost:8000"));
        assert_eq!(
            poml.scene.custom_attributes.get("custom-attr").map(String::as_str),
            Some("scene data")
        );

        let nodes = build_document(&poml, &BuildOptions::default());
        let scene = nodes[0].as_element().unwrap().child("scene").unwrap();
        let keys: Vec<&str> = scene.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ws-recv-url", "_custom-attr", "other"]);
    }

    #[test]
    fn test_build_envelope() {
        let poml = Poml::new(Scene::default()).with_meta(Meta {
            title: Some("t".to_string()),
        });
        let nodes = build_document(&poml, &BuildOptions::default());
        assert_eq!(nodes.len(), 1);

        let root = nodes[0].as_element().unwrap();
        let names: Vec<&str> = root
            .children
            .iter()
            .filter_map(XmlNode::as_element)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["meta", "scene"]);
        assert_eq!(
            root.child("meta").and_then(|m| m.child("title")).and_then(XmlElement::text),
            Some("t".to_string())
        );
    }
}
