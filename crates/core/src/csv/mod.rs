//! CSV codec: header-keyed mappings over the quote-aware line codec.
//!
//! Decode turns the first non-blank record into headers and every later
//! record into a mapping keyed by them; all decoded cells are strings.
//! Encode expects a sequence of mappings and writes the union of all row
//! keys as headers, with the documented one-level unwrap of a nested
//! sequence-of-mappings field.

pub mod line;

use crate::error::EncodeError;
use crate::value::{insert_entry, scalar_text, Value};

/// Parse CSV text into a sequence of header-keyed mappings.
///
/// Missing trailing fields default to the empty string. Empty input decodes
/// to an empty sequence.
pub fn decode(text: &str) -> Value {
    let records: Vec<String> = line::split_records(text)
        .into_iter()
        .filter(|r| !r.trim().is_empty())
        .collect();

    let Some((header_record, row_records)) = records.split_first() else {
        return Value::Sequence(Vec::new());
    };
    let headers = line::parse_line(header_record);

    let rows = row_records
        .iter()
        .map(|record| {
            let fields = line::parse_line(record);
            let mut entries = Vec::with_capacity(headers.len());
            for (i, header) in headers.iter().enumerate() {
                let cell = fields.get(i).cloned().unwrap_or_default();
                insert_entry(&mut entries, header.clone(), Value::String(cell));
            }
            Value::Mapping(entries)
        })
        .collect();
    Value::Sequence(rows)
}

/// Render a sequence of mappings (or a single mapping, treated as one row)
/// as CSV text.
pub fn encode(value: &Value) -> Result<String, EncodeError> {
    encode_rows(value, true)
}

fn encode_rows(value: &Value, allow_unwrap: bool) -> Result<String, EncodeError> {
    let rows: Vec<&Value> = match value {
        Value::Sequence(items) => items.iter().collect(),
        Value::Mapping(_) => vec![value],
        other => {
            return Err(EncodeError::CsvNotACollection {
                found: other.type_name(),
            })
        }
    };
    if rows.is_empty() {
        return Ok(String::new());
    }

    let mut mappings: Vec<&[(String, Value)]> = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        match row {
            Value::Mapping(entries) => mappings.push(entries),
            other => {
                return Err(EncodeError::CsvRowShape {
                    index,
                    found: other.type_name(),
                })
            }
        }
    }

    // One-level unwrap: the first field (rows and entries scanned in
    // declaration order) holding a non-empty sequence of mappings becomes
    // the row set. The substituted rows may not unwrap again.
    if allow_unwrap {
        for entries in &mappings {
            for (_, value) in entries.iter() {
                if let Value::Sequence(items) = value {
                    if !items.is_empty() && items.iter().all(|it| matches!(it, Value::Mapping(_)))
                    {
                        return encode_rows(value, false);
                    }
                }
            }
        }
    }

    // Headers: union of all row keys, first-seen order.
    let mut headers: Vec<&str> = Vec::new();
    for entries in &mappings {
        for (key, _) in entries.iter() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }

    let mut out = String::new();
    out.push_str(
        &headers
            .iter()
            .map(|h| line::escape_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for entries in &mappings {
        let mut cells = Vec::with_capacity(headers.len());
        for header in &headers {
            let cell = entries.iter().find(|(k, _)| k == header).map(|(_, v)| v);
            match cell {
                None | Some(Value::Null) => cells.push(String::new()),
                Some(Value::Sequence(_)) | Some(Value::Mapping(_)) => {
                    return Err(EncodeError::CsvNestedValue {
                        header: header.to_string(),
                    })
                }
                Some(scalar) => cells.push(line::escape_field(&scalar_text(scalar))),
            }
        }
        out.push('\n');
        out.push_str(&cells.join(","));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;

    fn rows(text: &str) -> Value {
        json::decode(text).unwrap()
    }

    #[test]
    fn decode_keys_rows_by_header() {
        let value = decode("name,age\nAda,36\nAlan,41");
        assert_eq!(
            value,
            rows(r#"[{"name":"Ada","age":"36"},{"name":"Alan","age":"41"}]"#)
        );
    }

    #[test]
    fn decode_missing_trailing_fields_default_to_empty() {
        let value = decode("a,b,c\n1,2");
        assert_eq!(value, rows(r#"[{"a":"1","b":"2","c":""}]"#));
    }

    #[test]
    fn decode_skips_blank_records() {
        let value = decode("\na,b\n\n1,2\n");
        assert_eq!(value, rows(r#"[{"a":"1","b":"2"}]"#));
    }

    #[test]
    fn decode_empty_input_is_empty_sequence() {
        assert_eq!(decode(""), Value::Sequence(Vec::new()));
    }

    #[test]
    fn decode_quoted_newline_stays_in_one_row() {
        let value = decode("a,b\n\"x\ny\",z");
        assert_eq!(value, rows(r#"[{"a":"x\ny","b":"z"}]"#));
    }

    #[test]
    fn encode_union_headers_across_rows() {
        let value = rows(r#"[{"a":1,"b":2},{"b":3,"c":4}]"#);
        assert_eq!(encode(&value).unwrap(), "a,b,c\n1,2,\n,3,4");
    }

    #[test]
    fn encode_single_mapping_as_one_row() {
        let value = rows(r#"{"x":"1","y":"2"}"#);
        assert_eq!(encode(&value).unwrap(), "x,y\n1,2");
    }

    #[test]
    fn encode_quotes_fields_that_need_it() {
        let value = rows(r#"[{"msg":"He said \"hi\", bye"}]"#);
        assert_eq!(
            encode(&value).unwrap(),
            "msg\n\"He said \"\"hi\"\", bye\""
        );
    }

    #[test]
    fn encode_unwraps_first_nested_sequence_of_mappings() {
        let value = rows(r#"[{"meta":"x","items":[{"id":1},{"id":2}]}]"#);
        assert_eq!(encode(&value).unwrap(), "id\n1\n2");
    }

    #[test]
    fn encode_rejects_non_collection() {
        let err = encode(&Value::Number(1.0)).unwrap_err();
        assert_eq!(err, EncodeError::CsvNotACollection { found: "number" });
    }

    #[test]
    fn encode_rejects_non_mapping_row() {
        let value = rows(r#"[{"a":1}, 2]"#);
        assert!(matches!(
            encode(&value).unwrap_err(),
            EncodeError::CsvRowShape { index: 1, .. }
        ));
    }

    #[test]
    fn encode_rejects_nested_cell() {
        let value = rows(r#"[{"a":{"deep":1}}]"#);
        assert!(matches!(
            encode(&value).unwrap_err(),
            EncodeError::CsvNestedValue { .. }
        ));
    }

    #[test]
    fn null_cells_render_empty() {
        let value = rows(r#"[{"a":null,"b":"x"}]"#);
        assert_eq!(encode(&value).unwrap(), "a,b\n,x");
    }

    #[test]
    fn csv_json_csv_reproduces_rows() {
        let original = rows(r#"[{"a":1,"b":2}]"#);
        let text = encode(&original).unwrap();
        let decoded = decode(&text);
        assert_eq!(decoded, rows(r#"[{"a":"1","b":"2"}]"#));
        assert_eq!(encode(&decoded).unwrap(), text);
    }
}
