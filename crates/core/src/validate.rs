//! Per-format well-formedness checks and the schema conformance check.
//!
//! Validators make a lightweight, independent pass over the raw text (not
//! the value model) and always return a structured result: any internal
//! failure folds into `{valid: false, message}`.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;

use crate::value::Value;
use crate::Format;

/// Outcome of a validation pass. Never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: String,
}

impl ValidationResult {
    fn ok(message: impl Into<String>) -> Self {
        ValidationResult {
            valid: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        ValidationResult {
            valid: false,
            message: message.into(),
        }
    }
}

/// Dispatch to the per-format validator.
pub fn validate(format: Format, text: &str) -> ValidationResult {
    match format {
        Format::Json => validate_json(text),
        Format::Xml => validate_xml(text),
        Format::Yaml => validate_yaml(text),
        Format::Csv => validate_csv(text),
    }
}

pub fn validate_json(text: &str) -> ValidationResult {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(_) => ValidationResult::ok("Valid JSON"),
        Err(e) => ValidationResult::fail(format!("JSON Error: {}", e)),
    }
}

/// Well-formedness scan: balanced tags and exactly one root element.
pub fn validate_xml(text: &str) -> ValidationResult {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut depth = 0usize;
    let mut roots = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    roots += 1;
                    if roots > 1 {
                        return ValidationResult::fail("XML Error: multiple root elements");
                    }
                }
                depth += 1;
            }
            Ok(Event::Empty(_)) => {
                if depth == 0 {
                    roots += 1;
                    if roots > 1 {
                        return ValidationResult::fail("XML Error: multiple root elements");
                    }
                }
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Text(_)) if depth == 0 => {
                return ValidationResult::fail("XML Error: text outside the root element")
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return ValidationResult::fail(format!("XML Error: {}", e)),
        }
    }
    if depth != 0 {
        return ValidationResult::fail("XML Error: unclosed element");
    }
    if roots == 0 {
        return ValidationResult::fail("XML Error: no root element");
    }
    ValidationResult::ok("Valid XML")
}

/// Indentation sanity check: a significant line may not be indented more
/// than two columns past the previous one.
pub fn validate_yaml(text: &str) -> ValidationResult {
    let mut last_indent = 0usize;
    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let indent = line.chars().take_while(|c| c.is_whitespace()).count();
        if indent > last_indent + 2 {
            return ValidationResult::fail(format!(
                "Invalid YAML indentation at line {}",
                i + 1
            ));
        }
        last_indent = indent;
    }
    ValidationResult::ok("Valid YAML")
}

/// Naive column-count check: a row's comma count may not deviate from the
/// header's by more than 2.
pub fn validate_csv(text: &str) -> ValidationResult {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return ValidationResult::fail("Empty CSV");
    }
    let header_count = lines[0].split(',').count();
    for (i, line) in lines.iter().enumerate().skip(1) {
        let count = line.split(',').count();
        if count.abs_diff(header_count) > 2 {
            return ValidationResult::fail(format!(
                "Row {} has inconsistent column count",
                i + 1
            ));
        }
    }
    ValidationResult::ok("Valid CSV")
}

/// Shallow type conformance of `data` against a schema description:
/// `object` checks declared properties recursively, `array` checks only the
/// first element, scalars check their type tag, anything else passes.
pub fn validate_schema(data: &Value, schema: &Value) -> ValidationResult {
    if conforms(data, schema) {
        ValidationResult::ok("Data matches schema")
    } else {
        ValidationResult::fail("Data does not match schema")
    }
}

fn conforms(data: &Value, schema: &Value) -> bool {
    match schema.get("type").and_then(Value::as_str) {
        Some("object") => {
            if data.as_mapping().is_none() {
                return false;
            }
            if let Some(Value::Mapping(properties)) = schema.get("properties") {
                for (key, property) in properties {
                    let field = data.get(key).unwrap_or(&Value::Null);
                    if !conforms(field, property) {
                        return false;
                    }
                }
            }
            true
        }
        Some("array") => match data.as_sequence() {
            None => false,
            Some(items) => match (schema.get("items"), items.first()) {
                (Some(item_schema), Some(first)) => conforms(first, item_schema),
                _ => true,
            },
        },
        Some("string") => matches!(data, Value::String(_)),
        Some("number") => matches!(data, Value::Number(_)),
        Some("boolean") => matches!(data, Value::Bool(_)),
        _ => true,
    }
}
