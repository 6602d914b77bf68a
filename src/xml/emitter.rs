//! Generic tree → text, backed by quick-xml's Writer
//!
//! Elements without children are written self-closing. Escaping is minimal:
//! text escapes `&`, `<` and `>`, attribute values (always double-quoted)
//! escape `&`, `<` and `"`. Apostrophes and quotes in text are written as-is,
//! so markup the codec does not interpret comes back unchanged. Comments are
//! written back exactly as they were read.

use crate::error::{PomlError, Result};
use crate::xml::XmlNode;
use quick_xml::escape::partial_escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::Write;

/// Serialize a forest of nodes; `indent_size == 0` writes everything on one line
pub fn write_document(nodes: &[XmlNode], indent_size: usize) -> Result<String> {
    let mut writer = if indent_size > 0 {
        Writer::new_with_indent(Vec::new(), b' ', indent_size)
    } else {
        Writer::new(Vec::new())
    };

    for node in nodes {
        write_node(&mut writer, node)?;
    }

    let xml = String::from_utf8(writer.into_inner())
        .map_err(|e| PomlError::Serialize(e.to_string()))?;
    Ok(xml.trim_end().to_string())
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &XmlNode) -> Result<()> {
    match node {
        XmlNode::Element(element) => {
            let mut start = BytesStart::new(element.name.as_str());
            for (key, value) in &element.attributes {
                let value = escape_attribute(value);
                start.push_attribute(Attribute::from((key.as_bytes(), value.as_bytes())));
            }

            if element.children.is_empty() {
                return write_event(writer, Event::Empty(start));
            }

            write_event(writer, Event::Start(start))?;
            for child in &element.children {
                write_node(writer, child)?;
            }
            write_event(writer, Event::End(BytesEnd::new(element.name.as_str())))
        }
        XmlNode::Text { text } => write_event(
            writer,
            Event::Text(BytesText::from_escaped(partial_escape(text))),
        ),
        XmlNode::Comment { text } => write_event(
            writer,
            Event::Comment(BytesText::from_escaped(text.as_str())),
        ),
        XmlNode::CData { text } => write_event(writer, Event::CData(BytesCData::new(text.as_str()))),
    }
}

/// Escape an attribute value for a double-quoted literal
fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '"']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| PomlError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{parse_document, XmlElement};

    #[test]
    fn test_nested_output_is_indented() {
        let tree = vec![XmlNode::from(
            XmlElement::new("poml").with_children(vec![XmlElement::new("scene").into()]),
        )];
        let xml = write_document(&tree, 2).unwrap();
        assert_eq!(xml, "<poml>\n  <scene/>\n</poml>");
    }

    #[test]
    fn test_compact_output() {
        let tree = vec![XmlNode::from(
            XmlElement::new("a").with_children(vec![XmlElement::new("b").into()]),
        )];
        assert_eq!(write_document(&tree, 0).unwrap(), "<a><b/></a>");
    }

    #[test]
    fn test_text_stays_inline() {
        let tree = vec![XmlNode::from(XmlElement::new("title").with_children(vec![
            XmlNode::Text {
                text: "a & b".to_string(),
            },
        ]))];
        assert_eq!(write_document(&tree, 2).unwrap(), "<title>a &amp; b</title>");
    }

    #[test]
    fn test_quotes_and_apostrophes_survive() {
        let xml = r#"<foo a="it's" b="say &quot;hi&quot; &amp; &lt;go>">don't "quote" &gt; ok</foo>"#;
        let tree = parse_document(xml, None).unwrap();
        assert_eq!(
            tree[0].as_element().unwrap().attribute("b"),
            Some(r#"say "hi" & <go>"#)
        );
        assert_eq!(write_document(&tree, 0).unwrap(), xml);
    }

    #[test]
    fn test_single_quoted_attribute_is_normalized() {
        let tree = parse_document("<foo b='x \"y\"'/>", None).unwrap();
        assert_eq!(write_document(&tree, 0).unwrap(), r#"<foo b="x &quot;y&quot;"/>"#);
    }

    #[test]
    fn test_reparse_is_stable() {
        let xml = "<poml>\n  <scene>\n    <!-- keep me -->\n    <foo b=\"2\" a=\"1\">\n      <bar/>\n    </foo>\n  </scene>\n</poml>";
        let tree = parse_document(xml, None).unwrap();
        assert_eq!(write_document(&tree, 2).unwrap(), xml);
    }
}
