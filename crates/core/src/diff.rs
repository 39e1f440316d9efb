//! Structural diff between two values.
//!
//! Recursive set-based comparison over mapping key unions. Only mappings
//! recurse; a changed sequence is reported as a single entry carrying both
//! whole values.

use serde::Serialize;

use crate::value::Value;

/// One unit of structural difference.
///
/// `path` is the dot-joined key sequence from the diffed roots. Serializes
/// as `{"type": "added", "path": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DiffEntry {
    Added { path: String, value: Value },
    Removed { path: String, value: Value },
    Changed { path: String, old: Value, new: Value },
}

impl DiffEntry {
    pub fn path(&self) -> &str {
        match self {
            DiffEntry::Added { path, .. }
            | DiffEntry::Removed { path, .. }
            | DiffEntry::Changed { path, .. } => path,
        }
    }
}

/// Compute the edit list between `left` and `right`.
///
/// For two mappings, entries follow the union of keys: left keys in order,
/// then right keys not in the left. A non-mapping pair yields either
/// nothing (equal) or one `Changed` with an empty path.
pub fn diff(left: &Value, right: &Value) -> Vec<DiffEntry> {
    let mut entries = Vec::new();
    match (left, right) {
        (Value::Mapping(l), Value::Mapping(r)) => diff_mappings(l, r, "", &mut entries),
        _ => {
            if left != right {
                entries.push(DiffEntry::Changed {
                    path: String::new(),
                    old: left.clone(),
                    new: right.clone(),
                });
            }
        }
    }
    entries
}

fn diff_mappings(
    left: &[(String, Value)],
    right: &[(String, Value)],
    path: &str,
    out: &mut Vec<DiffEntry>,
) {
    let mut keys: Vec<&String> = left.iter().map(|(k, _)| k).collect();
    for (key, _) in right {
        if !keys.iter().any(|existing| *existing == key) {
            keys.push(key);
        }
    }

    for key in keys {
        let full_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", path, key)
        };
        let left_value = left.iter().find(|(k, _)| k == key).map(|(_, v)| v);
        let right_value = right.iter().find(|(k, _)| k == key).map(|(_, v)| v);

        match (left_value, right_value) {
            (None, Some(value)) => out.push(DiffEntry::Added {
                path: full_path,
                value: value.clone(),
            }),
            (Some(value), None) => out.push(DiffEntry::Removed {
                path: full_path,
                value: value.clone(),
            }),
            (Some(old), Some(new)) if old != new => {
                if let (Value::Mapping(l), Value::Mapping(r)) = (old, new) {
                    diff_mappings(l, r, &full_path, out);
                } else {
                    out.push(DiffEntry::Changed {
                        path: full_path,
                        old: old.clone(),
                        new: new.clone(),
                    });
                }
            }
            _ => {}
        }
    }
}
