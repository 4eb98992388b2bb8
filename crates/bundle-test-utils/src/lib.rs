//! Shared test fixtures for the preset bundler workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`bundle`] — [`TestBundle`] builder for bundle directory trees
//! - [`archiver`] — in-process [`Archiver`](bundle_core::Archiver) doubles

pub mod archiver;
pub mod bundle;

pub use archiver::RecordingArchiver;
pub use bundle::TestBundle;
