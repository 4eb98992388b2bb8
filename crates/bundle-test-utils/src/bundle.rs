//! [`TestBundle`] builder for bundle directory trees.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// A temporary directory holding one bundle, or a container of bundles.
///
/// # Example
///
/// ```rust,no_run
/// use bundle_test_utils::TestBundle;
/// use serde_json::json;
///
/// let bundle = TestBundle::new("Overture");
/// bundle.write_json("A/G/base.json", &json!({"x": 1}));
/// bundle.write_json("A/G/child.json", &json!({"y": 2}));
/// bundle.assert_file_exists("bundle_structure.json");
/// ```
pub struct TestBundle {
    temp_dir: TempDir,
    root: PathBuf,
}

impl TestBundle {
    /// Create a bundle named `name` with an empty manifest.
    pub fn new(name: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(name);
        let bundle = Self { temp_dir, root };
        bundle.write("bundle_structure.json", "{}\n");
        bundle
    }

    /// Create an empty container directory; add bundles with [`Self::add_bundle`].
    pub fn container() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("bundles");
        fs::create_dir_all(&root).unwrap();
        Self { temp_dir, root }
    }

    /// Copy the directory tree at `src` into a fresh temporary directory.
    ///
    /// The copy keeps `src`'s base name, so bundle names survive.
    pub fn from_dir(src: &Path) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let name = src.file_name().expect("fixture path has a name");
        let root = temp_dir.path().join(name);
        copy_tree(src, &root);
        Self { temp_dir, root }
    }

    /// Add a bundle subdirectory with an empty manifest and return its root.
    pub fn add_bundle(&self, name: &str) -> PathBuf {
        self.write(&format!("{name}/bundle_structure.json"), "{}\n");
        self.root.join(name)
    }

    /// Root of the bundle (or container).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The temporary directory holding [`Self::root`].
    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Write raw text at `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Write a JSON value at `rel`.
    pub fn write_json(&self, rel: &str, value: &Value) {
        self.write(rel, &serde_json::to_string_pretty(value).unwrap());
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root.join(rel)).unwrap()
    }

    pub fn read_json(&self, rel: &str) -> Value {
        serde_json::from_str(&self.read(rel)).unwrap()
    }

    /// Parsed manifest of the bundle at `bundle_rel` ("" for the root).
    pub fn manifest(&self, bundle_rel: &str) -> Value {
        let rel = if bundle_rel.is_empty() {
            "bundle_structure.json".to_string()
        } else {
            format!("{bundle_rel}/bundle_structure.json")
        };
        self.read_json(&rel)
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.root.join(rel).exists()
    }

    pub fn assert_file_exists(&self, rel: &str) {
        assert!(self.exists(rel), "expected {rel} to exist under {}", self.root.display());
    }

    pub fn assert_file_missing(&self, rel: &str) {
        assert!(!self.exists(rel), "expected {rel} to be absent under {}", self.root.display());
    }
}

fn copy_tree(src: &Path, dst: &Path) {
    fs::create_dir_all(dst).unwrap();
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_tree(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), target).unwrap();
        }
    }
}
