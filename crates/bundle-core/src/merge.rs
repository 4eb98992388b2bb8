//! Preset document merging
//!
//! A child document is layered over its group's base: objects merge key by
//! key, anything else (arrays included) is replaced by the child's value.
//! The child's `inherits` key names a system preset and is dropped before
//! merging, so the output only inherits what the base itself declares.

use std::path::Path;

use bundle_fs::{NormalizedPath, io};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Key naming a system preset; stripped from the child side.
pub const INHERITS_KEY: &str = "inherits";

/// Merge `child` over `base` and return the flattened document.
pub fn merge(base: &Value, child: &Value) -> Value {
    let mut child = child.clone();
    if let Value::Object(map) = &mut child {
        map.shift_remove(INHERITS_KEY);
    }

    let mut merged = base.clone();
    deep_merge_value(&mut merged, &child);
    merged
}

/// Deep merge two JSON values
///
/// If both values are objects, merge them recursively with `other` taking
/// precedence. Otherwise, `other` replaces `base`.
fn deep_merge_value(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            for (key, other_val) in other_map {
                if let Some(base_val) = base_map.get_mut(key) {
                    deep_merge_value(base_val, other_val);
                } else {
                    base_map.insert(key.clone(), other_val.clone());
                }
            }
        }
        (base, other) => {
            *base = other.clone();
        }
    }
}

/// Read a preset document, requiring a top-level JSON object.
pub fn read_document(path: &Path) -> Result<Map<String, Value>> {
    let content = io::read_text(&NormalizedPath::new(path))?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::InvalidDocument {
            path: path.to_path_buf(),
        }),
    }
}

/// Read a base and a child document from disk and merge them.
pub fn merge_documents(base_path: &Path, child_path: &Path) -> Result<Value> {
    let base = Value::Object(read_document(base_path)?);
    let child = Value::Object(read_document(child_path)?);
    Ok(merge(&base, &child))
}

/// Write a document as pretty JSON with a trailing newline, atomically.
pub fn write_document(path: &Path, document: &Value) -> Result<()> {
    let mut content = serde_json::to_string_pretty(document)?;
    content.push('\n');
    io::write_text(&NormalizedPath::new(path), &content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn nested_objects_merge() {
        let base = json!({"x": 1, "y": {"a": 1}});
        let child = json!({"y": {"b": 2}, "inherits": "System"});

        assert_eq!(merge(&base, &child), json!({"x": 1, "y": {"a": 1, "b": 2}}));
    }

    #[test]
    fn child_scalar_wins() {
        let base = json!({"nozzle_temperature": ["210"], "name": "Base"});
        let child = json!({"name": "Child"});

        assert_eq!(
            merge(&base, &child),
            json!({"nozzle_temperature": ["210"], "name": "Child"})
        );
    }

    #[test]
    fn arrays_are_replaced_not_concatenated() {
        let base = json!({"compatible_printers": ["A", "B"]});
        let child = json!({"compatible_printers": ["C"]});

        assert_eq!(merge(&base, &child), json!({"compatible_printers": ["C"]}));
    }

    #[test]
    fn object_replaces_scalar_and_vice_versa() {
        let base = json!({"a": 1, "b": {"c": 1}});
        let child = json!({"a": {"nested": true}, "b": null});

        assert_eq!(merge(&base, &child), json!({"a": {"nested": true}, "b": null}));
    }

    #[test]
    fn base_inherits_is_kept() {
        let base = json!({"inherits": "Generic PLA @System", "x": 1});
        let child = json!({"inherits": "Other", "x": 2});

        assert_eq!(
            merge(&base, &child),
            json!({"inherits": "Generic PLA @System", "x": 2})
        );
    }

    #[test]
    fn key_order_follows_base_then_child() {
        let base = json!({"z": 1, "a": 1});
        let child = json!({"m": 2, "z": 2});

        let merged = serde_json::to_string(&merge(&base, &child)).unwrap();
        assert_eq!(merged, r#"{"z":2,"a":1,"m":2}"#);
    }

    #[test]
    fn non_object_document_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("list.json");
        fs::write(&path, "[1, 2]").unwrap();

        assert!(matches!(
            read_document(&path),
            Err(Error::InvalidDocument { .. })
        ));
    }

    #[test]
    fn write_document_is_pretty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.json");

        write_document(&path, &json!({"x": 1})).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\n  \"x\": 1\n}\n");
    }
}
