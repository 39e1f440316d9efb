//! XML codec.
//!
//! Decoding drives a quick-xml event reader through a frame stack.
//! Attributes flatten into the element's mapping ahead of child-derived
//! entries (a child element of the same name wins); repeated child names
//! collapse into a sequence in document order while a single occurrence
//! stays scalar; the first non-whitespace text run turns the whole element
//! into a string. Encoding is hand-rolled string assembly with entity
//! escaping and the trailing-`s` pluralization heuristic for sequences.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ParseError;
use crate::value::{scalar_text, Value};
use crate::Format;

/// One element being decoded.
struct Frame {
    name: String,
    entries: Vec<(String, Value)>,
    /// Keys inserted from attributes; a child element of the same name
    /// replaces these instead of collapsing into a sequence.
    attr_keys: Vec<String>,
    text: Option<String>,
}

/// Parse XML text into a [`Value`].
pub fn decode(text: &str) -> Result<Value, ParseError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(err_at(text, position, "multiple root elements"));
                }
                stack.push(open_frame(&start).map_err(|m| err_at(text, position, m))?);
            }
            Ok(Event::Empty(start)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(err_at(text, position, "multiple root elements"));
                }
                let frame = open_frame(&start).map_err(|m| err_at(text, position, m))?;
                let (name, value) = finish(frame);
                match stack.last_mut() {
                    Some(parent) => attach(parent, name, value),
                    None => root = Some(value),
                }
            }
            Ok(Event::End(_)) => {
                // quick-xml has already verified the tag matches.
                if let Some(frame) = stack.pop() {
                    let (name, value) = finish(frame);
                    match stack.last_mut() {
                        Some(parent) => attach(parent, name, value),
                        None => root = Some(value),
                    }
                }
            }
            Ok(Event::Text(t)) => {
                let content = t
                    .unescape()
                    .map_err(|e| err_at(text, position, e.to_string()))?;
                match stack.last_mut() {
                    Some(frame) => {
                        if frame.text.is_none() && !content.is_empty() {
                            frame.text = Some(content.into_owned());
                        }
                    }
                    None => {
                        return Err(err_at(text, position, "text outside the root element"))
                    }
                }
            }
            Ok(Event::CData(data)) => {
                let content = String::from_utf8_lossy(&data).into_owned();
                if let Some(frame) = stack.last_mut() {
                    if frame.text.is_none() && !content.is_empty() {
                        frame.text = Some(content);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // declaration, comments, processing instructions, doctype
            Err(e) => return Err(err_at(text, position, e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(ParseError::new(Format::Xml, "unclosed element"));
    }
    root.ok_or_else(|| ParseError::new(Format::Xml, "no root element"))
}

fn open_frame(start: &BytesStart) -> Result<Frame, String> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut entries = Vec::new();
    let mut attr_keys = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| e.to_string())?
            .into_owned();
        if !entries.iter().any(|(k, _): &(String, Value)| *k == key) {
            attr_keys.push(key.clone());
            entries.push((key, Value::String(value)));
        }
    }
    Ok(Frame {
        name,
        entries,
        attr_keys,
        text: None,
    })
}

/// Close a frame: text content wins over everything, otherwise the element
/// is a mapping of its attributes and children (possibly empty).
fn finish(frame: Frame) -> (String, Value) {
    let value = match frame.text {
        Some(text) => Value::String(text),
        None => Value::Mapping(frame.entries),
    };
    (frame.name, value)
}

/// Attach a decoded child to its parent frame.
///
/// A repeated child name collapses into a sequence in document order; a
/// name already present from an attribute is replaced (child wins).
fn attach(parent: &mut Frame, name: String, value: Value) {
    let Some(idx) = parent.entries.iter().position(|(k, _)| *k == name) else {
        parent.entries.push((name, value));
        return;
    };

    if let Some(attr_idx) = parent.attr_keys.iter().position(|k| *k == name) {
        parent.attr_keys.remove(attr_idx);
        parent.entries[idx].1 = value;
        return;
    }

    let slot = &mut parent.entries[idx].1;
    if let Value::Sequence(items) = slot {
        items.push(value);
    } else {
        let first = std::mem::replace(slot, Value::Sequence(Vec::new()));
        if let Value::Sequence(items) = slot {
            items.push(first);
            items.push(value);
        }
    }
}

fn err_at(text: &str, byte_position: u64, message: impl Into<String>) -> ParseError {
    let upto = (byte_position as usize).min(text.len());
    let line = text.as_bytes()[..upto].iter().filter(|b| **b == b'\n').count() as u64 + 1;
    ParseError::at_line(Format::Xml, line, message)
}

/// Render a [`Value`] as an XML document under `root`.
pub fn encode(value: &Value, root: &str) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    render(value, root, &mut out);
    out
}

fn render(value: &Value, tag: &str, out: &mut String) {
    match value {
        Value::Sequence(items) => {
            // Pluralization heuristic: items of "skills" render as "skill".
            let stripped = tag.strip_suffix('s').unwrap_or(tag);
            let item_tag = if stripped.is_empty() { tag } else { stripped };
            for item in items {
                render(item, item_tag, out);
            }
        }
        Value::Mapping(entries) => {
            out.push('<');
            out.push_str(tag);
            out.push('>');
            for (key, child) in entries {
                render(child, key, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        scalar => {
            out.push('<');
            out.push_str(tag);
            out.push('>');
            escape_into(&scalar_text(scalar), out);
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

/// Entity-escape `& < > " '` into `out`.
fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
}
