//! YAML codec (reduced block-style dialect).
//!
//! The decoder is a line-oriented recursive parser over an indentation
//! cursor: a child block is indented strictly deeper than its parent, `- `
//! at the block indent is a sequence item (scalar, `- key: value` inline
//! mapping item, or a lone `-` opening a nested block), `key:` with an
//! empty remainder opens a nested block, `key: value` is a scalar entry,
//! `key: |` opens a literal block scalar, and `#`/blank lines are ignored.
//! Plain scalars type as null/bool/number per standard conventions; quoted
//! scalars stay strings. Anchors, references, flow syntax (beyond empty
//! `[]`/`{}`), and multi-document streams are out of scope.
//!
//! The encoder emits block style with 2-space indentation, literal block
//! scalars for multiline strings, and quotes any scalar that would re-type
//! on decode.

use crate::error::ParseError;
use crate::value::{insert_entry, number_text, Value};
use crate::Format;

// ── Decode ──────────────────────────────────────────────────────────

struct Cursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Cursor {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    /// Advance past blank and comment lines, then return the next
    /// significant line as (1-based number, indent, trimmed content).
    fn peek(&mut self) -> Option<(u64, usize, &'a str)> {
        while self.pos < self.lines.len() {
            let trimmed = self.lines[self.pos].trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                self.pos += 1;
            } else {
                break;
            }
        }
        let raw = self.lines.get(self.pos)?;
        Some((self.pos as u64 + 1, indent_of(raw), raw.trim()))
    }

    fn consume(&mut self) {
        self.pos += 1;
    }
}

fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

fn is_item(trimmed: &str) -> bool {
    trimmed == "-" || trimmed.starts_with("- ")
}

/// Position of the key/value separator: the first `:` followed by a space
/// or end of line.
fn key_colon(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b':' && (i + 1 == bytes.len() || bytes[i + 1] == b' ') {
            return Some(i);
        }
    }
    None
}

fn err(line: u64, message: impl Into<String>) -> ParseError {
    ParseError::at_line(Format::Yaml, line, message)
}

/// Parse YAML text into a [`Value`]. Empty input decodes to `Null`.
pub fn decode(text: &str) -> Result<Value, ParseError> {
    let mut cur = Cursor::new(text);
    let Some((_, indent, _)) = cur.peek() else {
        return Ok(Value::Null);
    };
    let value = parse_block(&mut cur, indent)?;
    if let Some((line_no, _, _)) = cur.peek() {
        return Err(err(line_no, "unexpected content after the top-level block"));
    }
    Ok(value)
}

/// Parse the block starting at the cursor, whose first line sits at
/// `indent`. The first line decides the shape: sequence, mapping, or a
/// single scalar line.
fn parse_block(cur: &mut Cursor, indent: usize) -> Result<Value, ParseError> {
    let Some((_, _, trimmed)) = cur.peek() else {
        return Ok(Value::Null);
    };
    if is_item(trimmed) {
        parse_sequence(cur, indent)
    } else if key_colon(trimmed).is_some() {
        parse_mapping(cur, indent, None)
    } else {
        cur.consume();
        Ok(parse_scalar(trimmed))
    }
}

fn parse_sequence(cur: &mut Cursor, indent: usize) -> Result<Value, ParseError> {
    let mut items = Vec::new();
    while let Some((line_no, ind, trimmed)) = cur.peek() {
        if ind < indent {
            break;
        }
        if ind > indent {
            return Err(err(line_no, "bad indentation"));
        }
        if !is_item(trimmed) {
            return Err(err(line_no, "expected '- ' sequence item"));
        }
        cur.consume();

        let rest = trimmed[1..].trim_start();
        if rest.is_empty() {
            // A lone `-` opens a nested block, or stands for null.
            match cur.peek() {
                Some((_, deeper, _)) if deeper > indent => {
                    items.push(parse_block(cur, deeper)?)
                }
                _ => items.push(Value::Null),
            }
        } else if rest == "|" {
            items.push(Value::String(read_block_scalar(cur, indent)));
        } else if key_colon(rest).is_some() {
            // Inline mapping item: the remainder is the first entry, with
            // continuation lines aligned two columns past the dash.
            items.push(parse_mapping(cur, indent + 2, Some((rest, line_no)))?);
        } else {
            items.push(parse_scalar(rest));
        }
    }
    Ok(Value::Sequence(items))
}

/// Parse mapping entries at exactly `indent`. `first` carries an entry line
/// already consumed by the sequence parser (`- key: value`).
fn parse_mapping(
    cur: &mut Cursor,
    indent: usize,
    first: Option<(&str, u64)>,
) -> Result<Value, ParseError> {
    let mut entries = Vec::new();

    if let Some((content, line_no)) = first {
        let (key, value) = parse_entry(cur, indent, content, line_no)?;
        insert_entry(&mut entries, key, value);
    }

    while let Some((line_no, ind, trimmed)) = cur.peek() {
        if ind < indent {
            break;
        }
        if ind > indent {
            return Err(err(line_no, "bad indentation"));
        }
        if is_item(trimmed) {
            return Err(err(line_no, "unexpected sequence item in mapping"));
        }
        cur.consume();
        let (key, value) = parse_entry(cur, indent, trimmed, line_no)?;
        insert_entry(&mut entries, key, value);
    }
    Ok(Value::Mapping(entries))
}

/// Parse one `key: ...` line (already consumed) plus whatever nested block
/// it opens.
fn parse_entry(
    cur: &mut Cursor,
    indent: usize,
    content: &str,
    line_no: u64,
) -> Result<(String, Value), ParseError> {
    let colon = key_colon(content).ok_or_else(|| err(line_no, "expected 'key: value'"))?;
    let key = unquote(content[..colon].trim());
    let rest = content[colon + 1..].trim();

    let value = if rest.is_empty() {
        match cur.peek() {
            Some((_, deeper, _)) if deeper > indent => parse_block(cur, deeper)?,
            _ => Value::Null,
        }
    } else if rest == "|" {
        Value::String(read_block_scalar(cur, indent))
    } else {
        parse_scalar(rest)
    };
    Ok((key, value))
}

/// Collect the raw lines of a literal block scalar: everything blank or
/// indented deeper than `indent`, dedented by the shallowest content line,
/// trailing blank lines dropped.
fn read_block_scalar(cur: &mut Cursor, indent: usize) -> String {
    let mut collected: Vec<&str> = Vec::new();
    while cur.pos < cur.lines.len() {
        let raw = cur.lines[cur.pos];
        if raw.trim().is_empty() {
            collected.push("");
            cur.pos += 1;
            continue;
        }
        if indent_of(raw) <= indent {
            break;
        }
        collected.push(raw);
        cur.pos += 1;
    }
    while matches!(collected.last(), Some(line) if line.is_empty()) {
        collected.pop();
    }
    let strip = collected
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| indent_of(line))
        .min()
        .unwrap_or(0);
    collected
        .iter()
        .map(|line| if line.is_empty() { "" } else { &line[strip..] })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_scalar(text: &str) -> Value {
    if text.len() >= 2 {
        if let Some(inner) = text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
            return Value::String(unescape_double(inner));
        }
        if let Some(inner) = text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
            return Value::String(inner.replace("''", "'"));
        }
    }
    match text {
        "null" | "~" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "[]" => return Value::Sequence(Vec::new()),
        "{}" => return Value::Mapping(Vec::new()),
        _ => {}
    }
    if matches!(text.chars().next(), Some(c) if c.is_ascii_digit() || c == '-') {
        if let Ok(n) = text.parse::<f64>() {
            if n.is_finite() {
                return Value::Number(n);
            }
        }
    }
    Value::String(text.to_string())
}

fn unquote(text: &str) -> String {
    match parse_scalar(text) {
        Value::String(s) => s,
        _ => text.to_string(),
    }
}

fn unescape_double(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

// ── Encode ──────────────────────────────────────────────────────────

/// Render a [`Value`] as block-style YAML with 2-space indentation.
pub fn encode(value: &Value) -> String {
    match value {
        Value::Sequence(items) if items.is_empty() => "[]".to_string(),
        Value::Mapping(entries) if entries.is_empty() => "{}".to_string(),
        Value::Sequence(_) | Value::Mapping(_) => {
            let mut out = String::new();
            write_block(value, 0, &mut out);
            if out.ends_with('\n') {
                out.pop();
            }
            out
        }
        scalar => scalar_line(scalar),
    }
}

fn pad(level: usize) -> String {
    "  ".repeat(level)
}

fn write_block(value: &Value, level: usize, out: &mut String) {
    match value {
        Value::Mapping(entries) => {
            for (key, child) in entries {
                out.push_str(&pad(level));
                write_entry(key, child, level, out);
            }
        }
        Value::Sequence(items) => {
            for item in items {
                write_item(item, level, out);
            }
        }
        _ => {}
    }
}

fn write_item(item: &Value, level: usize, out: &mut String) {
    match item {
        Value::Mapping(entries) if !entries.is_empty() => {
            for (i, (key, child)) in entries.iter().enumerate() {
                if i == 0 {
                    out.push_str(&pad(level));
                    out.push_str("- ");
                } else {
                    out.push_str(&pad(level + 1));
                }
                write_entry(key, child, level + 1, out);
            }
        }
        Value::Sequence(items) if !items.is_empty() => {
            out.push_str(&pad(level));
            out.push_str("-\n");
            write_block(item, level + 1, out);
        }
        Value::String(s) if s.contains('\n') => {
            out.push_str(&pad(level));
            out.push_str("- |\n");
            write_literal_block(s, level + 1, out);
        }
        scalar => {
            out.push_str(&pad(level));
            out.push_str("- ");
            out.push_str(&scalar_line(scalar));
            out.push('\n');
        }
    }
}

/// Write one mapping entry, the indent for the line itself already
/// emitted. `level` is the entry's own level; nested blocks go one deeper.
fn write_entry(key: &str, child: &Value, level: usize, out: &mut String) {
    out.push_str(&quoted_key(key));
    match child {
        Value::Null => out.push_str(":\n"),
        Value::String(s) if s.contains('\n') => {
            out.push_str(": |\n");
            write_literal_block(s, level + 1, out);
        }
        Value::Mapping(entries) if !entries.is_empty() => {
            out.push_str(":\n");
            write_block(child, level + 1, out);
        }
        Value::Sequence(items) if !items.is_empty() => {
            out.push_str(":\n");
            write_block(child, level + 1, out);
        }
        scalar => {
            out.push_str(": ");
            out.push_str(&scalar_line(scalar));
            out.push('\n');
        }
    }
}

fn write_literal_block(text: &str, level: usize, out: &mut String) {
    for line in text.split('\n') {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str(&pad(level));
            out.push_str(line);
            out.push('\n');
        }
    }
}

fn scalar_line(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(*n),
        Value::String(s) => quote_if_needed(s),
        Value::Sequence(items) if items.is_empty() => "[]".to_string(),
        Value::Mapping(entries) if entries.is_empty() => "{}".to_string(),
        Value::Sequence(_) | Value::Mapping(_) => String::new(),
    }
}

/// A plain rendering must decode back to the same string; anything that
/// would re-type, start a construct, or lose padding gets double quotes.
fn needs_quotes(text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    if !matches!(parse_scalar(text), Value::String(_)) {
        return true;
    }
    let first = text.chars().next().unwrap_or(' ');
    if matches!(first, '-' | '#' | '"' | '\'' | '|' | '>' | '&' | '*' | '%' | '@' | '`') {
        return true;
    }
    if text.starts_with(' ') || text.ends_with(' ') {
        return true;
    }
    key_colon(text).is_some()
}

fn quote_if_needed(text: &str) -> String {
    if needs_quotes(text) {
        quote_double(text)
    } else {
        text.to_string()
    }
}

fn quoted_key(key: &str) -> String {
    if needs_quotes(key) {
        quote_double(key)
    } else {
        key.to_string()
    }
}

fn quote_double(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
