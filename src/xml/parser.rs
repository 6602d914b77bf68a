//! Text → generic tree, backed by quick-xml
//!
//! Whitespace-only text between tags is dropped and the remaining text is
//! trimmed, so the pretty-printed output of the emitter parses back to the
//! same tree.
//!
//! Entity references XML does not define (`&nbsp;` from a surrounding HTML
//! page, say) are kept as literal text instead of failing the parse.

use crate::error::{PomlError, Result};
use crate::xml::{AttributeMap, XmlElement, XmlNode};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

/// Parse XML text into an ordered forest of generic nodes
///
/// `max_depth` bounds element nesting. `None` means unbounded.
pub fn parse_document(xml: &str, max_depth: Option<usize>) -> Result<Vec<XmlNode>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut roots: Vec<XmlNode> = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| invalid_xml(&reader, e.to_string()))?;

        match event {
            Event::Start(ref e) => {
                check_depth(stack.len(), max_depth)?;
                stack.push(element_from_start(&reader, e)?);
            }
            Event::Empty(ref e) => {
                check_depth(stack.len(), max_depth)?;
                let element = element_from_start(&reader, e)?;
                push_node(&mut stack, &mut roots, element.into());
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| invalid_xml(&reader, "unexpected closing tag".to_string()))?;
                push_node(&mut stack, &mut roots, element.into());
            }
            Event::Text(ref e) => {
                let raw = utf8(&reader, e)?;
                let text = unescape_lenient(&raw);
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    push_node(
                        &mut stack,
                        &mut roots,
                        XmlNode::Text {
                            text: trimmed.to_string(),
                        },
                    );
                }
            }
            Event::CData(ref e) => {
                let text = utf8(&reader, e)?;
                push_node(&mut stack, &mut roots, XmlNode::CData { text });
            }
            Event::Comment(ref e) => {
                let text = utf8(&reader, e)?;
                push_node(&mut stack, &mut roots, XmlNode::Comment { text });
            }
            // Tokenizer metadata, not part of the tree
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.pop() {
        return Err(PomlError::UnclosedElement(open.name));
    }

    log::trace!("parsed {} top-level XML nodes", roots.len());
    Ok(roots)
}

fn check_depth(open_elements: usize, max_depth: Option<usize>) -> Result<()> {
    match max_depth {
        Some(limit) if open_elements >= limit => Err(PomlError::DepthLimitExceeded { limit }),
        _ => Ok(()),
    }
}

fn push_node(stack: &mut [XmlElement], roots: &mut Vec<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn element_from_start(reader: &Reader<&[u8]>, start: &BytesStart) -> Result<XmlElement> {
    let name = utf8(reader, start.name().as_ref())?;

    let mut attributes = AttributeMap::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| invalid_xml(reader, e.to_string()))?;
        let key = utf8(reader, attr.key.as_ref())?;
        let raw = utf8(reader, &attr.value)?;
        attributes.insert(key, unescape_lenient(&raw).into_owned());
    }

    Ok(XmlElement::new(name).with_attributes(attributes))
}

/// Resolve entity and character references, keeping unknown ones verbatim
fn unescape_lenient(raw: &str) -> Cow<'_, str> {
    if let Ok(text) = unescape(raw) {
        return text;
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let end = tail[1..]
            .find(|c: char| c == ';' || c == '&' || c.is_whitespace())
            .map(|i| i + 1)
            .filter(|&i| tail.as_bytes()[i] == b';');

        match end {
            Some(end) => {
                let reference = &tail[..=end];
                match unescape(reference) {
                    Ok(resolved) => out.push_str(&resolved),
                    Err(_) => out.push_str(reference),
                }
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn utf8(reader: &Reader<&[u8]>, bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| invalid_xml(reader, e.to_string()))
}

fn invalid_xml(reader: &Reader<&[u8]>, message: String) -> PomlError {
    PomlError::InvalidXml {
        position: reader.buffer_position() as usize,
        message,
    }
}
