//! Directory classification
//!
//! A directory with a manifest at its root is a single bundle; anything
//! else is a container whose immediate subdirectories are classified again.

use std::fs;
use std::path::{Path, PathBuf};

use bundle_fs::BundlePath;

use crate::{Error, Result};

/// What a target directory turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryKind {
    /// Has a manifest; processed as one bundle
    Bundle,
    /// No manifest; its subdirectories are processed independently
    Container,
}

/// Classify `path` by checking for the manifest at its root.
pub fn classify(path: &Path) -> Result<DirectoryKind> {
    if !path.is_dir() {
        return Err(Error::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    if path.join(BundlePath::Manifest.as_str()).is_file() {
        Ok(DirectoryKind::Bundle)
    } else {
        Ok(DirectoryKind::Container)
    }
}

/// Immediate, non-hidden subdirectories of `dir`, sorted by name.
pub(crate) fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| bundle_fs::Error::io(dir, e))?;

    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| !is_hidden(&entry.path()))
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.path())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Regular files directly inside `dir`, sorted by name.
pub(crate) fn files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| bundle_fs::Error::io(dir, e))?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

pub(crate) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Resolve targets like `.` or `..` that have no base name of their own.
///
/// Paths that already end in a name are returned unchanged so reports keep
/// the caller's spelling.
pub(crate) fn resolve_target(path: &Path) -> PathBuf {
    if path.file_name().is_some() {
        return path.to_path_buf();
    }
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Base name of a directory, used as the bundle or vendor name.
pub(crate) fn dir_name(path: &Path) -> String {
    resolve_target(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
