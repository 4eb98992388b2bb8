//! Bundle manifest model and synchronization
//!
//! The manifest lists, per vendor, the bundle-relative paths of the presets
//! the host application imports:
//!
//! ```json
//! { "printer_vendor": [ { "vendor": "Generic", "filament_path": ["Generic/PLA.json"] } ] }
//! ```
//!
//! Only `printer_vendor[].vendor` and `printer_vendor[].filament_path` are
//! interpreted. Every other key is carried through untouched and in its
//! original order.

use std::path::{Path, PathBuf};

use bundle_fs::{NormalizedPath, io};
use serde_json::{Map, Value, json};

use crate::{Error, Result};

/// Top-level key holding the vendor entries
pub const VENDORS_KEY: &str = "printer_vendor";
/// Vendor name key inside an entry
pub const VENDOR_NAME_KEY: &str = "vendor";
/// Path list key inside an entry
pub const PATHS_KEY: &str = "filament_path";

/// An in-memory manifest document
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    root: Map<String, Value>,
}

impl Manifest {
    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = io::read_text(&NormalizedPath::new(path))?;
        Self::parse(path, &content)
    }

    /// Parse manifest text; `path` is only used in error messages.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(content)? {
            Value::Object(root) => Ok(Self {
                path: path.to_path_buf(),
                root,
            }),
            _ => Err(Self::invalid(path, "top level is not a JSON object")),
        }
    }

    /// Persist via temp-file-then-rename.
    pub fn save(&self) -> Result<()> {
        let mut content = serde_json::to_string_pretty(&self.root)?;
        content.push('\n');
        io::write_atomic(&NormalizedPath::new(&self.path), content.as_bytes())?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Vendor names in manifest order.
    pub fn vendors(&self) -> Vec<&str> {
        self.root
            .get(VENDORS_KEY)
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.get(VENDOR_NAME_KEY).and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Paths registered for `vendor`, or `None` if it has no entry.
    pub fn paths(&self, vendor: &str) -> Option<Vec<&str>> {
        let entries = self.root.get(VENDORS_KEY)?.as_array()?;
        let entry = entries
            .iter()
            .find(|entry| entry.get(VENDOR_NAME_KEY).and_then(Value::as_str) == Some(vendor))?;
        Some(
            entry
                .get(PATHS_KEY)
                .and_then(Value::as_array)
                .map(|paths| paths.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default(),
        )
    }

    /// Add `relative_path` under `vendor`, creating the entry if needed.
    ///
    /// Returns whether the document changed. Registering a path that is
    /// already present is a no-op.
    pub fn register(&mut self, vendor: &str, relative_path: &str) -> Result<bool> {
        let path = self.path.clone();
        let entries = self
            .root
            .entry(VENDORS_KEY)
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
            .ok_or_else(|| Self::invalid(&path, &format!("'{VENDORS_KEY}' is not an array")))?;

        let existing = entries
            .iter_mut()
            .find(|entry| entry.get(VENDOR_NAME_KEY).and_then(Value::as_str) == Some(vendor));

        let Some(entry) = existing else {
            entries.push(json!({
                VENDOR_NAME_KEY: vendor,
                PATHS_KEY: [relative_path],
            }));
            return Ok(true);
        };

        let entry = entry
            .as_object_mut()
            .ok_or_else(|| Self::invalid(&path, &format!("entry for '{vendor}' is not an object")))?;
        let paths = entry
            .entry(PATHS_KEY)
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
            .ok_or_else(|| {
                Self::invalid(&path, &format!("'{PATHS_KEY}' of '{vendor}' is not an array"))
            })?;

        if paths.iter().any(|p| p.as_str() == Some(relative_path)) {
            return Ok(false);
        }
        paths.push(Value::String(relative_path.to_string()));
        Ok(true)
    }

    fn invalid(path: &Path, message: &str) -> Error {
        Error::ManifestInvalid {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

/// Load-modify-save registration of one generated preset.
///
/// The manifest is only rewritten when the registration changes it, so
/// repeated calls with the same arguments leave the file untouched.
pub fn register(manifest_path: &Path, vendor: &str, relative_path: &str) -> Result<bool> {
    let mut manifest = Manifest::load(manifest_path)?;
    let changed = manifest.register(vendor, relative_path)?;
    if changed {
        manifest.save()?;
        tracing::debug!(
            manifest = %manifest_path.display(),
            vendor,
            path = relative_path,
            "registered preset in manifest"
        );
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn manifest(content: &str) -> Manifest {
        Manifest::parse(Path::new("bundle_structure.json"), content).unwrap()
    }

    #[test]
    fn register_creates_vendor_entry() {
        let mut m = manifest("{}");

        assert!(m.register("A", "A/child.json").unwrap());
        assert_eq!(m.paths("A"), Some(vec!["A/child.json"]));
        assert_eq!(m.vendors(), vec!["A"]);
    }

    #[test]
    fn register_appends_to_existing_entry() {
        let mut m = manifest(
            r#"{"printer_vendor": [{"vendor": "A", "filament_path": ["A/flat.json"]}]}"#,
        );

        assert!(m.register("A", "A/child.json").unwrap());
        assert_eq!(m.paths("A"), Some(vec!["A/flat.json", "A/child.json"]));
    }

    #[test]
    fn register_is_idempotent() {
        let mut m = manifest("{}");
        m.register("A", "A/child.json").unwrap();
        let once = m.clone();

        assert!(!m.register("A", "A/child.json").unwrap());
        assert_eq!(m, once);
    }

    #[test]
    fn entry_without_path_list_gets_one() {
        let mut m = manifest(r#"{"printer_vendor": [{"vendor": "A"}]}"#);

        assert!(m.register("A", "A/child.json").unwrap());
        assert_eq!(m.paths("A"), Some(vec!["A/child.json"]));
    }

    #[test]
    fn unknown_keys_are_preserved_in_order() {
        let mut m = manifest(
            r#"{"name": "Bundle", "version": "1", "printer_vendor": [{"vendor": "A", "filament_path": [], "note": "x"}]}"#,
        );
        m.register("A", "A/child.json").unwrap();

        let text = serde_json::to_string(&m.root).unwrap();
        assert_eq!(
            text,
            r#"{"name":"Bundle","version":"1","printer_vendor":[{"vendor":"A","filament_path":["A/child.json"],"note":"x"}]}"#
        );
    }

    #[test]
    fn malformed_vendor_list_is_an_error() {
        let mut m = manifest(r#"{"printer_vendor": {"vendor": "A"}}"#);

        assert!(matches!(
            m.register("A", "A/child.json"),
            Err(Error::ManifestInvalid { .. })
        ));
    }

    #[test]
    fn non_object_manifest_is_an_error() {
        let result = Manifest::parse(Path::new("m.json"), "[]");
        assert!(matches!(result, Err(Error::ManifestInvalid { .. })));
    }

    #[test]
    fn register_file_skips_rewrite_when_unchanged() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bundle_structure.json");
        fs::write(&path, r#"{"printer_vendor":[{"vendor":"A","filament_path":["A/c.json"]}]}"#)
            .unwrap();

        assert!(!register(&path, "A", "A/c.json").unwrap());
        // Untouched: still the compact original, not pretty-printed
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"{"printer_vendor":[{"vendor":"A","filament_path":["A/c.json"]}]}"#
        );
    }

    #[test]
    fn register_file_writes_pretty_manifest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bundle_structure.json");
        fs::write(&path, "{}").unwrap();

        assert!(register(&path, "A", "A/child.json").unwrap());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"printer_vendor\": [\n    {\n      \"vendor\": \"A\",\n      \"filament_path\": [\n        \"A/child.json\"\n      ]\n    }\n  ]\n}\n"
        );
    }

    #[test]
    fn register_missing_manifest_fails() {
        let temp = TempDir::new().unwrap();
        assert!(register(&temp.path().join("missing.json"), "A", "A/c.json").is_err());
    }
}
