//! Packaging settings
//!
//! Settings are resolved in layers: built-in defaults, then an optional
//! `preset-bundle.toml` (or `.json`) in the target directory, then explicit
//! overrides from the caller (environment and command line).

use std::path::{Path, PathBuf};

use bundle_fs::{BundlePath, ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::{BundleKind, Result};

/// Resolved settings for one packaging run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSettings {
    /// Which archive extension bundles are written with
    pub kind: BundleKind,
    /// Leave generated presets in vendor folders after archiving
    pub keep_generated: bool,
    /// Directory archives are written to; defaults to each bundle's root
    pub out_dir: Option<PathBuf>,
}

/// Settings as they appear in a settings file; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    pub kind: Option<BundleKind>,
    pub keep_generated: Option<bool>,
    pub out_dir: Option<PathBuf>,
}

/// Caller-supplied overrides, applied last.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub kind: Option<BundleKind>,
    pub keep_generated: Option<bool>,
    pub out_dir: Option<PathBuf>,
}

impl PackSettings {
    /// Resolve settings for a target directory.
    ///
    /// A relative `out_dir` in a settings file is taken relative to the
    /// directory holding that file.
    pub fn resolve(dir: &Path, overrides: SettingsOverrides) -> Result<Self> {
        let mut settings = Self::default();

        if let Some((file_path, file)) = load_settings_file(dir)? {
            tracing::debug!(path = %file_path, "loaded settings file");
            settings.apply_file(dir, file);
        }

        settings.apply_overrides(overrides);
        Ok(settings)
    }

    fn apply_file(&mut self, dir: &Path, file: SettingsFile) {
        if let Some(kind) = file.kind {
            self.kind = kind;
        }
        if let Some(keep) = file.keep_generated {
            self.keep_generated = keep;
        }
        if let Some(out_dir) = file.out_dir {
            self.out_dir = Some(if out_dir.is_relative() {
                dir.join(out_dir)
            } else {
                out_dir
            });
        }
    }

    /// Apply overrides; `None` fields leave the current value untouched.
    pub fn apply_overrides(&mut self, overrides: SettingsOverrides) {
        if let Some(kind) = overrides.kind {
            self.kind = kind;
        }
        if let Some(keep) = overrides.keep_generated {
            self.keep_generated = keep;
        }
        if let Some(out_dir) = overrides.out_dir {
            self.out_dir = Some(out_dir);
        }
    }
}

fn load_settings_file(dir: &Path) -> Result<Option<(NormalizedPath, SettingsFile)>> {
    let store = ConfigStore::new();
    for name in [BundlePath::SettingsToml, BundlePath::SettingsJson] {
        let path = NormalizedPath::new(dir.join(name.as_str()));
        if path.is_file() {
            let file: SettingsFile = store.load(&path)?;
            return Ok(Some((path, file)));
        }
    }
    Ok(None)
}
