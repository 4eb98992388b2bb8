//! Command implementations for bundle-cli

pub mod pack;
pub mod plan;

pub use pack::run_pack;
pub use plan::run_plan;
