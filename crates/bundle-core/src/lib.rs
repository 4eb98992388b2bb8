//! Preset inheritance flattening for slicer preset bundles
//!
//! The host slicer only lets presets inherit from its built-in system
//! presets. This crate resolves user-level inheritance at packaging time:
//! inside each vendor folder of a bundle, a group directory holding a
//! `base.json` has each sibling document merged over that base, and the
//! flattened result is written next to the vendor's other presets,
//! registered in the bundle manifest and archived.
//!
//! # Architecture
//!
//! ```text
//!            classify  (bundle | container of bundles)
//!                |
//!           scan_bundle  (vendor folders -> inheritance groups)
//!                |
//!              merge  ->  manifest::register
//!                |
//!             Archiver  ->  cleanup
//! ```
//!
//! [`Packager`] ties the steps together and reports per-bundle outcomes in
//! a [`RunReport`].

pub mod archive;
pub mod classify;
pub mod cleanup;
pub mod error;
pub mod groups;
pub mod kind;
pub mod manifest;
pub mod merge;
pub mod pipeline;
pub mod settings;

pub use archive::{Archiver, ZipCommandArchiver, archive_entries};
pub use classify::{DirectoryKind, classify};
pub use error::{Error, Result};
pub use groups::{BundleScan, InheritanceGroup, VendorFolder, scan_bundle};
pub use kind::BundleKind;
pub use manifest::Manifest;
pub use merge::{merge, merge_documents};
pub use pipeline::{
    BundlePlan, BundleReport, GeneratedPreset, ItemFailure, ItemStage, Packager, PlannedPreset,
    RunReport, plan,
};
pub use settings::{PackSettings, SettingsOverrides};
