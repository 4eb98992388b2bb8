//! In-process archiver doubles.
//!
//! [`RecordingArchiver`] writes a plain listing instead of a real archive,
//! snapshots the contents of every entry at archive time, and can be told to
//! fail for chosen bundles or to report itself unavailable.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use bundle_core::{Archiver, Error, Result};
use bundle_fs::NormalizedPath;

/// One `create` call as seen by the archiver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveCall {
    pub bundle_root: PathBuf,
    pub archive_path: PathBuf,
    pub entries: Vec<String>,
    /// `(entry, file content)` captured when the archive was created
    pub contents: Vec<(String, String)>,
}

#[derive(Debug, Default)]
pub struct RecordingArchiver {
    unavailable: bool,
    fail_for: HashSet<String>,
    calls: RefCell<Vec<ArchiveCall>>,
}

impl RecordingArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the tool as missing from `check_available`.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Fail `create` for the bundle whose root directory is named `bundle`.
    pub fn failing_for(mut self, bundle: &str) -> Self {
        self.fail_for.insert(bundle.to_string());
        self
    }

    pub fn calls(&self) -> Vec<ArchiveCall> {
        self.calls.borrow().clone()
    }

    /// The call made for the bundle named `bundle`, if any.
    pub fn call_for(&self, bundle: &str) -> Option<ArchiveCall> {
        self.calls
            .borrow()
            .iter()
            .find(|call| call.bundle_root.file_name().map(|n| n == bundle).unwrap_or(false))
            .cloned()
    }
}

impl Archiver for RecordingArchiver {
    fn name(&self) -> &str {
        "recording"
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(Error::ToolUnavailable {
                tool: "recording".into(),
                reason: "disabled for test".into(),
            });
        }
        Ok(())
    }

    fn create(
        &self,
        bundle_root: &Path,
        archive_path: &Path,
        entries: &[NormalizedPath],
    ) -> Result<()> {
        let entry_names: Vec<String> = entries.iter().map(|e| e.as_str().to_string()).collect();
        let contents = entry_names
            .iter()
            .map(|name| {
                let text = fs::read_to_string(bundle_root.join(name)).unwrap_or_default();
                (name.clone(), text)
            })
            .collect();

        self.calls.borrow_mut().push(ArchiveCall {
            bundle_root: bundle_root.to_path_buf(),
            archive_path: archive_path.to_path_buf(),
            entries: entry_names.clone(),
            contents,
        });

        let bundle_name = bundle_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.fail_for.contains(&bundle_name) {
            return Err(Error::ArchiveFailed {
                path: archive_path.to_path_buf(),
                reason: "configured to fail".into(),
            });
        }

        if let Some(parent) = archive_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(archive_path, entry_names.join("\n"))?;
        Ok(())
    }
}
