//! Inheritance group discovery
//!
//! Every vendor folder of a bundle may hold subfolders that pair one
//! `base.json` with sibling child documents. Subfolders without a base are
//! reported and skipped; they never fail the bundle.

use std::path::{Path, PathBuf};

use bundle_fs::{BundlePath, NormalizedPath};
use serde::Serialize;

use crate::Result;
use crate::classify::{dir_name, files_in, is_hidden, subdirectories};

/// A vendor subdirectory of a bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorFolder {
    /// Vendor name (the directory's base name)
    pub name: String,
    /// Absolute location on disk
    pub dir: PathBuf,
}

/// One base document plus the child documents merged over it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InheritanceGroup {
    /// Name of the vendor folder the group lives in
    pub vendor: String,
    /// The vendor folder generated presets are written to
    pub vendor_dir: PathBuf,
    /// The group directory itself
    pub dir: PathBuf,
    /// Path of the group's `base.json`
    pub base: PathBuf,
    /// Child documents, sorted by file name; may be empty
    pub children: Vec<PathBuf>,
}

impl InheritanceGroup {
    /// Where the generated preset for `child` is written.
    pub fn output_path(&self, child: &Path) -> PathBuf {
        self.vendor_dir.join(child_file_name(child))
    }

    /// Bundle-relative path registered in the manifest for `child`.
    pub fn relative_output(&self, child: &Path) -> NormalizedPath {
        NormalizedPath::new(&self.vendor).join(&child_file_name(child))
    }
}

/// Everything discovered in one bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BundleScan {
    pub vendors: Vec<VendorFolder>,
    pub groups: Vec<InheritanceGroup>,
    /// Group candidates that had no base document
    pub skipped: Vec<PathBuf>,
}

/// List the vendor folders of a bundle.
pub fn vendor_folders(bundle_root: &Path) -> Result<Vec<VendorFolder>> {
    Ok(subdirectories(bundle_root)?
        .into_iter()
        .map(|dir| VendorFolder {
            name: dir_name(&dir),
            dir,
        })
        .collect())
}

/// Find the inheritance groups of every vendor folder in a bundle.
pub fn scan_bundle(bundle_root: &Path) -> Result<BundleScan> {
    let mut scan = BundleScan {
        vendors: vendor_folders(bundle_root)?,
        ..BundleScan::default()
    };

    for vendor in &scan.vendors {
        for dir in subdirectories(&vendor.dir)? {
            match locate_group(vendor, &dir)? {
                Some(group) => {
                    tracing::debug!(
                        vendor = %vendor.name,
                        group = %dir.display(),
                        children = group.children.len(),
                        "found inheritance group"
                    );
                    scan.groups.push(group);
                }
                None => {
                    tracing::warn!(
                        vendor = %vendor.name,
                        group = %dir.display(),
                        "no {} in group directory, skipping",
                        BundlePath::BaseDocument
                    );
                    scan.skipped.push(dir);
                }
            }
        }
    }

    Ok(scan)
}

/// Build the group for `dir`, or `None` when it has no base document.
pub fn locate_group(vendor: &VendorFolder, dir: &Path) -> Result<Option<InheritanceGroup>> {
    let base = dir.join(BundlePath::BaseDocument.as_str());
    if !base.is_file() {
        return Ok(None);
    }

    let children = files_in(dir)?
        .into_iter()
        .filter(|path| is_child_document(path))
        .collect();

    Ok(Some(InheritanceGroup {
        vendor: vendor.name.clone(),
        vendor_dir: vendor.dir.clone(),
        dir: dir.to_path_buf(),
        base,
        children,
    }))
}

fn is_child_document(path: &Path) -> bool {
    if is_hidden(path) {
        return false;
    }
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    is_json && child_file_name(path) != BundlePath::BaseDocument.as_str()
}

fn child_file_name(child: &Path) -> String {
    child
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
