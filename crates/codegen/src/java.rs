//! Java accessor-class emission: private fields plus getter/setter pairs
//! with first-letter-capitalized method names.

use morph_core::Value;

use crate::capitalize;

pub fn emit(value: &Value, name: &str) -> String {
    let Value::Mapping(entries) = value else {
        return String::new();
    };

    let fields = entries
        .iter()
        .map(|(key, child)| format!("  private {} {};", field_type(key, child), key))
        .collect::<Vec<_>>()
        .join("\n");

    let getters = entries
        .iter()
        .map(|(key, child)| {
            format!(
                "  public {} get{}() {{ return {}; }}",
                field_type(key, child),
                capitalize(key),
                key
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let setters = entries
        .iter()
        .map(|(key, child)| {
            format!(
                "  public void set{}({} {}) {{ this.{} = {}; }}",
                capitalize(key),
                field_type(key, child),
                key,
                key,
                key
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "public class {} {{\n{}\n\n{}\n\n{}\n}}",
        name, fields, getters, setters
    )
}

fn field_type(key: &str, value: &Value) -> String {
    match value {
        Value::Null => "Object".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => {
            if value.is_integer() {
                "int".to_string()
            } else {
                "double".to_string()
            }
        }
        Value::String(_) => "String".to_string(),
        Value::Mapping(_) => capitalize(key),
        Value::Sequence(items) => match items.first() {
            None => "List".to_string(),
            Some(Value::Mapping(_)) => format!("List<{}>", capitalize(key)),
            Some(first) => format!("List<{}>", element_type(first)),
        },
    }
}

/// Boxed element types for generics.
fn element_type(value: &Value) -> String {
    match value {
        Value::Null => "Object".to_string(),
        Value::Bool(_) => "Boolean".to_string(),
        Value::Number(_) => {
            if value.is_integer() {
                "Integer".to_string()
            } else {
                "Double".to_string()
            }
        }
        Value::String(_) => "String".to_string(),
        Value::Mapping(_) => "Map".to_string(),
        Value::Sequence(_) => "List".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_core::json;

    fn val(text: &str) -> Value {
        json::decode(text).unwrap()
    }

    #[test]
    fn fields_getters_and_setters() {
        let value = val(r#"{"name":"Ada","age":36}"#);
        assert_eq!(
            emit(&value, "Root"),
            "public class Root {\n\
             \x20 private String name;\n\
             \x20 private int age;\n\
             \n\
             \x20 public String getName() { return name; }\n\
             \x20 public int getAge() { return age; }\n\
             \n\
             \x20 public void setName(String name) { this.name = name; }\n\
             \x20 public void setAge(int age) { this.age = age; }\n\
             }"
        );
    }

    #[test]
    fn number_split_and_collections() {
        let value = val(r#"{"ratio":0.5,"tags":["x"],"users":[{"id":1}],"empty":[],"address":{"zip":"10001"}}"#);
        let code = emit(&value, "Root");
        assert!(code.contains("  private double ratio;"));
        assert!(code.contains("  private List<String> tags;"));
        assert!(code.contains("  private List<Users> users;"));
        assert!(code.contains("  private List empty;"));
        assert!(code.contains("  private Address address;"));
        assert!(code.contains("  public List<Users> getUsers() { return users; }"));
    }

    #[test]
    fn non_mapping_is_empty() {
        assert_eq!(emit(&Value::Number(1.0), "Root"), "");
    }
}
