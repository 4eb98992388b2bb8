//! Archive creation
//!
//! The byte-level archive format belongs to an external tool. The core only
//! decides which bundle-relative entries go in and where the archive lands;
//! an [`Archiver`] does the rest.

use std::path::{Path, PathBuf};
use std::process::Command;

use bundle_fs::{BundlePath, NormalizedPath};

use crate::classify::{files_in, is_hidden};
use crate::groups::VendorFolder;
use crate::{Error, Result};

/// Something that can pack a list of bundle files into one archive.
pub trait Archiver {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// Fail with [`Error::ToolUnavailable`] if archives cannot be created.
    fn check_available(&self) -> Result<()>;

    /// Create `archive_path` containing `entries`, which are relative to
    /// `bundle_root`. The caller has already removed any previous archive.
    fn create(&self, bundle_root: &Path, archive_path: &Path, entries: &[NormalizedPath])
        -> Result<()>;
}

/// The manifest plus every file directly inside each vendor folder.
///
/// Inheritance group subdirectories are not archived; their merged output
/// is already in the vendor folder.
pub fn archive_entries(vendors: &[VendorFolder]) -> Result<Vec<NormalizedPath>> {
    let mut entries = vec![NormalizedPath::new(BundlePath::Manifest.as_str())];

    for vendor in vendors {
        let vendor_rel = NormalizedPath::new(&vendor.name);
        for file in files_in(&vendor.dir)? {
            if is_hidden(&file) {
                continue;
            }
            if let Some(name) = file.file_name() {
                entries.push(vendor_rel.join(&name.to_string_lossy()));
            }
        }
    }

    entries[1..].sort();
    Ok(entries)
}

/// Archiver backed by the `zip` command-line program.
#[derive(Debug, Clone)]
pub struct ZipCommandArchiver {
    program: PathBuf,
}

impl Default for ZipCommandArchiver {
    fn default() -> Self {
        Self::new()
    }
}

impl ZipCommandArchiver {
    /// Use `zip` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("zip"),
        }
    }

    /// Use a specific `zip` executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn unavailable(&self, reason: impl Into<String>) -> Error {
        Error::ToolUnavailable {
            tool: self.program.display().to_string(),
            reason: reason.into(),
        }
    }
}

impl Archiver for ZipCommandArchiver {
    fn name(&self) -> &str {
        "zip"
    }

    fn check_available(&self) -> Result<()> {
        let output = Command::new(&self.program)
            .arg("-v")
            .output()
            .map_err(|e| self.unavailable(e.to_string()))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(self.unavailable(format!("'{} -v' exited with {}", self.program.display(), output.status)))
        }
    }

    fn create(
        &self,
        bundle_root: &Path,
        archive_path: &Path,
        entries: &[NormalizedPath],
    ) -> Result<()> {
        // The command runs inside the bundle, so the target must not be
        // relative to the caller's directory.
        let archive_path = std::path::absolute(archive_path)?;
        if let Some(parent) = archive_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| bundle_fs::Error::io(parent, e))?;
        }

        let output = Command::new(&self.program)
            .current_dir(bundle_root)
            .arg("-q")
            .arg("-X")
            .arg(&archive_path)
            .args(entries.iter().map(entry_arg))
            .output()
            .map_err(|e| Error::ArchiveFailed {
                path: archive_path.clone(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::ArchiveFailed {
                path: archive_path,
                reason: format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            })
        }
    }
}

/// Command-line form of an archive entry; names starting with `-` get a
/// `./` prefix so `zip` does not read them as options.
fn entry_arg(entry: &NormalizedPath) -> PathBuf {
    if entry.as_str().starts_with('-') {
        Path::new(".").join(entry.to_native())
    } else {
        entry.to_native()
    }
}
