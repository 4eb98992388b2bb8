//! Error types for bundle-core

use std::path::PathBuf;

/// Result type for bundle-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bundle-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Target path is missing or not a directory
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A preset document parsed but is not a JSON object
    #[error("Preset document at {path} is not a JSON object")]
    InvalidDocument { path: PathBuf },

    /// The manifest exists but does not have the expected shape
    #[error("Invalid manifest at {path}: {message}")]
    ManifestInvalid { path: PathBuf, message: String },

    /// Unknown bundle kind name
    #[error("Invalid bundle kind: {kind} (expected filament, printer or process)")]
    InvalidKind { kind: String },

    /// A required external tool is not installed
    #[error("Required tool '{tool}' is not available: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    /// Creating the archive for a bundle failed
    #[error("Archive creation failed for {path}: {reason}")]
    ArchiveFailed { path: PathBuf, reason: String },

    /// Filesystem error from bundle-fs
    #[error(transparent)]
    Fs(#[from] bundle_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for errors that must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ToolUnavailable { .. })
    }
}
