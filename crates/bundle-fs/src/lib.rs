//! Filesystem layer for the preset bundler
//!
//! Provides normalized path handling, crash-safe writes and
//! format-detected configuration loading.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::BundlePath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
