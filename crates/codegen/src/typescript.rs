//! TypeScript interface emission.
//!
//! The only target that also emits nested declarations: nested mappings
//! and the first element of a sequence-of-mappings become their own
//! `interface` blocks, printed ahead of the declaration that references
//! them. A visited set keyed on the structural fingerprint of each mapping
//! (its compact JSON) guards against emitting the same shape twice.

use std::collections::HashSet;

use morph_core::{json, Value};

use crate::capitalize;

pub fn emit(value: &Value, name: &str) -> String {
    if value.as_mapping().is_none() {
        return String::new();
    }
    let mut visited = HashSet::new();
    emit_interface(value, name, &mut visited)
}

fn emit_interface(value: &Value, name: &str, visited: &mut HashSet<String>) -> String {
    let Value::Mapping(entries) = value else {
        return String::new();
    };
    if !visited.insert(fingerprint(value)) {
        return String::new();
    }

    let mut nested = String::new();
    for (key, child) in entries {
        let inner = match child {
            Value::Mapping(_) => emit_interface(child, &capitalize(key), visited),
            Value::Sequence(items) => match items.first() {
                Some(first @ Value::Mapping(_)) => {
                    emit_interface(first, &capitalize(key), visited)
                }
                _ => String::new(),
            },
            _ => String::new(),
        };
        if !inner.is_empty() {
            nested.push_str(&inner);
            nested.push_str("\n\n");
        }
    }

    let props = entries
        .iter()
        .map(|(key, child)| format!("  {}: {};", key, field_type(key, child)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}interface {} {{\n{}\n}}", nested, name, props)
}

fn field_type(key: &str, value: &Value) -> String {
    match value {
        Value::Mapping(_) => capitalize(key),
        Value::Sequence(items) => match items.first() {
            None => "any[]".to_string(),
            Some(Value::Mapping(_)) => format!("{}[]", capitalize(key)),
            Some(first) => format!("{}[]", element_type(first)),
        },
        scalar => element_type(scalar),
    }
}

fn element_type(value: &Value) -> String {
    match value {
        Value::Null => "any".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Mapping(_) => "object".to_string(),
        Value::Sequence(items) => match items.first() {
            None => "any[]".to_string(),
            Some(first) => format!("{}[]", element_type(first)),
        },
    }
}

/// Structural identity of a mapping, independent of where it sits in the
/// tree.
fn fingerprint(value: &Value) -> String {
    json::encode(value, false).unwrap_or_default()
}
