//! Go tagged-struct emission: capitalized field names with the original
//! lowercase key attached as a `json:"key"` tag.

use morph_core::Value;

use crate::capitalize;

pub fn emit(value: &Value, name: &str) -> String {
    let Value::Mapping(entries) = value else {
        return String::new();
    };
    let fields = entries
        .iter()
        .map(|(key, child)| {
            format!(
                "  {} {} `json:\"{}\"`",
                capitalize(key),
                field_type(key, child),
                key
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("type {} struct {{\n{}\n}}", name, fields)
}

fn field_type(key: &str, value: &Value) -> String {
    match value {
        Value::Mapping(_) => capitalize(key),
        Value::Sequence(items) => match items.first() {
            None => "[]interface{}".to_string(),
            Some(Value::Mapping(_)) => format!("[]{}", capitalize(key)),
            Some(first) => format!("[]{}", element_type(first)),
        },
        scalar => element_type(scalar),
    }
}

fn element_type(value: &Value) -> String {
    match value {
        Value::Null => "interface{}".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Number(_) => {
            if value.is_integer() {
                "int".to_string()
            } else {
                "float64".to_string()
            }
        }
        Value::String(_) => "string".to_string(),
        Value::Mapping(_) => "map[string]interface{}".to_string(),
        Value::Sequence(items) => match items.first() {
            None => "[]interface{}".to_string(),
            Some(first) => format!("[]{}", element_type(first)),
        },
    }
}
