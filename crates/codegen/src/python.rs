//! Python annotated-class emission.

use morph_core::Value;

use crate::capitalize;

pub fn emit(value: &Value, name: &str) -> String {
    let Value::Mapping(entries) = value else {
        return String::new();
    };
    let fields = entries
        .iter()
        .map(|(key, child)| format!("    {}: {}", key, field_type(key, child)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("class {}:\n{}\n    pass", name, fields)
}

fn field_type(key: &str, value: &Value) -> String {
    match value {
        Value::Mapping(_) => capitalize(key),
        Value::Sequence(items) => match items.first() {
            None => "list".to_string(),
            Some(Value::Mapping(_)) => format!("list[{}]", capitalize(key)),
            Some(first) => format!("list[{}]", element_type(first)),
        },
        scalar => element_type(scalar),
    }
}

fn element_type(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Number(_) => {
            if value.is_integer() {
                "int".to_string()
            } else {
                "float".to_string()
            }
        }
        Value::String(_) => "str".to_string(),
        Value::Mapping(_) => "dict".to_string(),
        Value::Sequence(items) => match items.first() {
            None => "list".to_string(),
            Some(first) => format!("list[{}]", element_type(first)),
        },
    }
}
