//! JSON codec.
//!
//! Decoding rides on serde_json (built with `preserve_order`, so object
//! keys keep their insertion order); encoding rides on the [`Value`]
//! `Serialize` impl with serde_json's pretty (2-space) or compact printer.

use crate::error::{EncodeError, ParseError};
use crate::value::Value;
use crate::Format;

/// Parse JSON text into a [`Value`].
pub fn decode(text: &str) -> Result<Value, ParseError> {
    let parsed: serde_json::Value = serde_json::from_str(text).map_err(|e| {
        // serde_json appends " at line L column C" to its own message;
        // strip it and carry the position in the structured fields.
        let message = e.to_string();
        let message = match message.rfind(" at line ") {
            Some(idx) => message[..idx].to_string(),
            None => message,
        };
        ParseError {
            format: Format::Json,
            message,
            line: Some(e.line() as u64),
            column: Some(e.column() as u64),
        }
    })?;
    Ok(from_serde(parsed))
}

fn from_serde(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(from_serde).collect())
        }
        serde_json::Value::Object(entries) => Value::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key, from_serde(value)))
                .collect(),
        ),
    }
}

/// Render a [`Value`] as JSON text, pretty-printed (2-space indent) or
/// compact.
pub fn encode(value: &Value, pretty: bool) -> Result<String, EncodeError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| EncodeError::Json(e.to_string()))
}
