//! Rendering [`Node`] trees to XML and parsing them back.
//!
//! Documents get a declaration and two-space indentation; fragments (used
//! for confidential subtrees) are rendered bare so their byte form is
//! stable.

use std::io::{BufRead, Write};
use std::str;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::Error;
use crate::node::Node;

// -----------------------------------------------------------------------------
// Writing

/// Renders `node` as a complete document into `sink`.
pub fn write_document<W: Write>(node: &Node, sink: W) -> Result<(), Error> {
    let mut writer = Writer::new_with_indent(sink, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write_node(&mut writer, node)
}

/// Renders `node` as a bare fragment, without declaration or indentation.
pub fn node_to_fragment(node: &Node) -> Result<String, Error> {
    let mut writer = Writer::new(Vec::new());
    write_node(&mut writer, node)?;
    String::from_utf8(writer.into_inner())
        .map_err(|_| Error::Malformed("fragment is not valid UTF-8".into()))
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> Result<(), Error> {
    let mut start = BytesStart::new(node.name());
    for (name, value) in node.attrs() {
        start.push_attribute((name, value));
    }

    if node.is_vacant() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = node.text() {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in node.children() {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(node.name())))?;
    Ok(())
}

// -----------------------------------------------------------------------------
// Parsing

/// Parses one document from `source` and returns its root.
///
/// Declarations, comments, processing instructions and doctypes are skipped.
/// Whitespace-only text inside an element that also has element children is
/// treated as formatting and dropped.
pub fn parse_document<R: BufRead>(source: R) -> Result<Node, Error> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut stack: Vec<Node> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                stack.push(node_from_start(&start)?);
            }
            Event::Empty(start) => {
                let node = node_from_start(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.push_child(node),
                    None => return Ok(node),
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    append_text(current, &text.unescape()?);
                }
            }
            Event::CData(cdata) => {
                if let Some(current) = stack.last_mut() {
                    let raw = cdata.into_inner();
                    let piece = str::from_utf8(&raw)
                        .map_err(|_| Error::Malformed("CDATA content is not valid UTF-8".into()))?;
                    append_text(current, piece);
                }
            }
            Event::End(_) => {
                let mut node = stack
                    .pop()
                    .ok_or_else(|| Error::Malformed("unbalanced end tag".into()))?;
                if !node.children().is_empty()
                    && node.text().is_some_and(|t| t.trim().is_empty())
                {
                    node.clear_text();
                }
                match stack.last_mut() {
                    Some(parent) => parent.push_child(node),
                    None => return Ok(node),
                }
            }
            Event::Eof => {
                return Err(Error::Malformed("document has no root element".into()));
            }
            _ => {}
        }
        buf.clear();
    }
}

/// Parses a bare fragment produced by [`node_to_fragment`].
pub fn parse_fragment(text: &str) -> Result<Node, Error> {
    parse_document(text.as_bytes())
}

fn node_from_start(start: &BytesStart<'_>) -> Result<Node, Error> {
    let qname = start.name();
    let name = str::from_utf8(qname.as_ref())
        .map_err(|_| Error::Malformed("element name is not valid UTF-8".into()))?;
    let mut node = Node::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::InvalidAttr)?;
        let key = str::from_utf8(attr.key.as_ref())
            .map_err(|_| Error::Malformed("attribute name is not valid UTF-8".into()))?;
        node.push_attr(key, attr.unescape_value()?);
    }
    Ok(node)
}

fn append_text(node: &mut Node, piece: &str) {
    match node.text() {
        Some(existing) => {
            let mut merged = existing.to_owned();
            merged.push_str(piece);
            node.set_text(merged);
        }
        None => node.set_text(piece),
    }
}
