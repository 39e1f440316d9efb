//! Deterministic mock-data synthesis from a schema description.
//!
//! The schema is itself a [`Value`] mapping (typically decoded from a JSON
//! document) with the recognized keys `type`, `properties`, `items`,
//! `minItems`, `enum`, `example`, `format`, and `minimum`. Generation is
//! best-effort and never fails; the only non-constant inputs are the
//! `date`/`date-time` canned values, so the clock is an explicit parameter
//! and real time enters at the caller's boundary.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::value::Value;

/// Generate an example value for `schema`.
///
/// Fully deterministic given the schema and `now`.
pub fn generate(schema: &Value, now: OffsetDateTime) -> Value {
    if schema.as_mapping().is_none() {
        return Value::Null;
    }

    let type_tag = match schema.get("type") {
        Some(Value::String(tag)) => tag.clone(),
        // A type list: the first element wins.
        Some(Value::Sequence(items)) => match items.first().and_then(Value::as_str) {
            Some(tag) => tag.to_string(),
            None => return Value::Null,
        },
        _ => return Value::Null,
    };

    match type_tag.as_str() {
        "object" => {
            let mut entries = Vec::new();
            if let Some(Value::Mapping(properties)) = schema.get("properties") {
                for (key, property) in properties {
                    entries.push((key.clone(), generate(property, now)));
                }
            }
            Value::Mapping(entries)
        }
        "array" => {
            let count = match schema.get("minItems").and_then(Value::as_f64) {
                Some(n) if n >= 0.0 => n as usize,
                Some(_) => 0,
                None => 3,
            };
            let default_items =
                Value::Mapping(vec![("type".to_string(), Value::String("string".to_string()))]);
            let items_schema = schema.get("items").unwrap_or(&default_items);
            Value::Sequence((0..count).map(|_| generate(items_schema, now)).collect())
        }
        "string" => {
            if let Some(first) = enum_head(schema) {
                return first;
            }
            if let Some(example) = schema.get("example") {
                return example.clone();
            }
            let text = match schema.get("format").and_then(Value::as_str) {
                Some("email") => "user@example.com".to_string(),
                Some("date") => now
                    .date()
                    .format(format_description!("[year]-[month]-[day]"))
                    .unwrap_or_default(),
                Some("date-time") => now.format(&Rfc3339).unwrap_or_default(),
                Some("uri") => "https://example.com".to_string(),
                _ => "sample text".to_string(),
            };
            Value::String(text)
        }
        "number" | "integer" => {
            if let Some(first) = enum_head(schema) {
                return first;
            }
            if let Some(example) = schema.get("example") {
                return example.clone();
            }
            if let Some(minimum) = schema.get("minimum").and_then(Value::as_f64) {
                return Value::Number(minimum);
            }
            if type_tag == "integer" {
                Value::Number(42.0)
            } else {
                Value::Number(3.14)
            }
        }
        "boolean" => Value::Bool(true),
        _ => Value::Null,
    }
}

fn enum_head(schema: &Value) -> Option<Value> {
    match schema.get("enum") {
        Some(Value::Sequence(items)) => items.first().cloned(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;
    use time::macros::datetime;

    fn val(text: &str) -> Value {
        json::decode(text).unwrap()
    }

    fn fixed_clock() -> OffsetDateTime {
        datetime!(2024-01-15 10:30:00 UTC)
    }

    #[test]
    fn object_with_declared_properties_in_order() {
        let schema = val(
            r#"{"type":"object","properties":{
                "n":{"type":"integer"},
                "s":{"type":"string","format":"email"}}}"#,
        );
        assert_eq!(
            generate(&schema, fixed_clock()),
            val(r#"{"n":42,"s":"user@example.com"}"#)
        );
    }

    #[test]
    fn generation_is_deterministic() {
        let schema = val(r#"{"type":"object","properties":{"id":{"type":"number"}}}"#);
        let a = generate(&schema, fixed_clock());
        let b = generate(&schema, fixed_clock());
        assert_eq!(a, b);
    }

    #[test]
    fn array_defaults_to_three_string_items() {
        let schema = val(r#"{"type":"array"}"#);
        assert_eq!(
            generate(&schema, fixed_clock()),
            val(r#"["sample text","sample text","sample text"]"#)
        );
    }

    #[test]
    fn array_honors_min_items() {
        let schema = val(r#"{"type":"array","minItems":2,"items":{"type":"integer"}}"#);
        assert_eq!(generate(&schema, fixed_clock()), val("[42,42]"));

        let empty = val(r#"{"type":"array","minItems":0}"#);
        assert_eq!(generate(&empty, fixed_clock()), val("[]"));
    }

    #[test]
    fn string_priority_enum_over_example_over_format() {
        let schema = val(r#"{"type":"string","enum":["first","second"],"example":"ex"}"#);
        assert_eq!(
            generate(&schema, fixed_clock()),
            Value::String("first".to_string())
        );

        let schema = val(r#"{"type":"string","example":"ex","format":"email"}"#);
        assert_eq!(
            generate(&schema, fixed_clock()),
            Value::String("ex".to_string())
        );
    }

    #[test]
    fn date_formats_use_the_injected_clock() {
        let schema = val(r#"{"type":"string","format":"date"}"#);
        assert_eq!(
            generate(&schema, fixed_clock()),
            Value::String("2024-01-15".to_string())
        );

        let schema = val(r#"{"type":"string","format":"date-time"}"#);
        assert_eq!(
            generate(&schema, fixed_clock()),
            Value::String("2024-01-15T10:30:00Z".to_string())
        );
    }

    #[test]
    fn uri_format_and_plain_string() {
        let schema = val(r#"{"type":"string","format":"uri"}"#);
        assert_eq!(
            generate(&schema, fixed_clock()),
            Value::String("https://example.com".to_string())
        );

        let schema = val(r#"{"type":"string"}"#);
        assert_eq!(
            generate(&schema, fixed_clock()),
            Value::String("sample text".to_string())
        );
    }

    #[test]
    fn number_priority_and_defaults() {
        let schema = val(r#"{"type":"number","minimum":7}"#);
        assert_eq!(generate(&schema, fixed_clock()), Value::Number(7.0));

        let schema = val(r#"{"type":"number"}"#);
        assert_eq!(generate(&schema, fixed_clock()), Value::Number(3.14));

        let schema = val(r#"{"type":"integer"}"#);
        assert_eq!(generate(&schema, fixed_clock()), Value::Number(42.0));
    }

    #[test]
    fn type_list_first_element_wins() {
        let schema = val(r#"{"type":["integer","string"]}"#);
        assert_eq!(generate(&schema, fixed_clock()), Value::Number(42.0));
    }

    #[test]
    fn boolean_null_and_unknown_types() {
        assert_eq!(
            generate(&val(r#"{"type":"boolean"}"#), fixed_clock()),
            Value::Bool(true)
        );
        assert_eq!(
            generate(&val(r#"{"type":"null"}"#), fixed_clock()),
            Value::Null
        );
        assert_eq!(
            generate(&val(r#"{"type":"mystery"}"#), fixed_clock()),
            Value::Null
        );
        assert_eq!(generate(&val("{}"), fixed_clock()), Value::Null);
        assert_eq!(generate(&Value::Null, fixed_clock()), Value::Null);
    }
}
