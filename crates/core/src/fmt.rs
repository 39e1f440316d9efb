//! Best-effort reformatting: beautify and minify.
//!
//! Both return a `Result` so the fallback-to-original contract stays a
//! caller decision: a surface that never wants to block an in-progress
//! edit simply discards the error and keeps the input text.
//!
//! JSON reformatting decodes and re-encodes; XML reformatting is a textual
//! pass (split or collapse inter-tag whitespace) that never fails; YAML
//! and CSV pass through unchanged.

use crate::error::ParseError;
use crate::{json, Format};

/// Reformat `text` with indentation.
pub fn beautify(text: &str, format: Format) -> Result<String, ParseError> {
    match format {
        Format::Json => {
            let value = json::decode(text)?;
            json::encode(&value, true)
                .map_err(|e| ParseError::new(Format::Json, e.to_string()))
        }
        Format::Xml => Ok(beautify_xml(text)),
        Format::Yaml | Format::Csv => Ok(text.to_string()),
    }
}

/// Reformat `text` without inter-element whitespace.
pub fn minify(text: &str, format: Format) -> Result<String, ParseError> {
    match format {
        Format::Json => {
            let value = json::decode(text)?;
            json::encode(&value, false)
                .map_err(|e| ParseError::new(Format::Json, e.to_string()))
        }
        Format::Xml => Ok(minify_xml(text)),
        Format::Yaml | Format::Csv => Ok(text.to_string()),
    }
}

/// Drop whitespace runs between a `>` and the following `<`.
fn minify_xml(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0usize;
    while pos < chars.len() {
        let c = chars[pos];
        out.push(c);
        pos += 1;
        if c == '>' {
            let mut next = pos;
            while next < chars.len() && chars[next].is_whitespace() {
                next += 1;
            }
            if next < chars.len() && chars[next] == '<' {
                pos = next;
            }
        }
    }
    out.trim().to_string()
}

/// One tag per line, indented two spaces per nesting level. Purely
/// textual: scalar elements like `<name>Ada</name>` stay on one line.
fn beautify_xml(text: &str) -> String {
    let compact = minify_xml(text).replace("><", ">\n<");
    let mut out = String::new();
    let mut depth = 0usize;
    for line in compact.lines() {
        if line.starts_with("</") {
            depth = depth.saturating_sub(1);
        }
        out.push_str(&"  ".repeat(depth));
        out.push_str(line);
        out.push('\n');
        let self_contained = line.contains("</")
            || line.ends_with("/>")
            || line.starts_with("<?")
            || line.starts_with("<!")
            || !line.starts_with('<');
        if line.starts_with('<') && !line.starts_with("</") && !self_contained {
            depth += 1;
        }
    }
    if out.ends_with('\n') {
        out.pop();
    }
    out
}
