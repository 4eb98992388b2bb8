//! Reserved file names inside a preset bundle.

use std::path::Path;

/// Well-known names the bundler looks for on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundlePath {
    /// The manifest at a bundle root; its presence makes a directory a bundle
    Manifest,
    /// The document every child of an inheritance group is merged over
    BaseDocument,
    /// Optional TOML settings file in the target directory
    SettingsToml,
    /// Optional JSON settings file in the target directory
    SettingsJson,
}

impl BundlePath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "bundle_structure.json",
            Self::BaseDocument => "base.json",
            Self::SettingsToml => "preset-bundle.toml",
            Self::SettingsJson => "preset-bundle.json",
        }
    }
}

impl AsRef<Path> for BundlePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for BundlePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for BundlePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
