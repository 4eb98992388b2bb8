//! CLI argument parsing using clap derive

use std::path::PathBuf;

use bundle_core::{BundleKind, SettingsOverrides};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Preset bundler - flatten inherited slicer presets and package bundles
#[derive(Parser, Debug)]
#[command(name = "preset-bundle")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run; packs DIR when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub pack: PackArgs,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Merge inheritance groups, update manifests and archive bundles
    ///
    /// DIR is either a bundle (it has a bundle_structure.json) or a
    /// directory of bundles, each packed independently.
    ///
    /// Examples:
    ///   preset-bundle pack                     # Pack the current directory
    ///   preset-bundle pack bundles/ --keep     # Keep generated presets
    ///   preset-bundle pack --kind printer      # Write .orca_printer archives
    Pack(PackArgs),

    /// Show what pack would generate, without writing anything
    Plan {
        /// Bundle or directory of bundles
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Bundle kind, used for the archive name
        #[arg(long, value_enum, env = "PRESET_BUNDLE_KIND")]
        kind: Option<KindArg>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options for packing
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PackArgs {
    /// Bundle or directory of bundles
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Leave generated presets in vendor folders after archiving
    #[arg(long, env = "PRESET_BUNDLE_KEEP")]
    pub keep: bool,

    /// Bundle kind, selects the archive extension
    #[arg(long, value_enum, env = "PRESET_BUNDLE_KIND")]
    pub kind: Option<KindArg>,

    /// Directory to write archives to (default: each bundle's root)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// zip executable used to create archives
    #[arg(long, env = "PRESET_BUNDLE_ZIP", default_value = "zip")]
    pub zip: PathBuf,
}

impl PackArgs {
    /// Settings overrides from the command line; unset flags defer to the
    /// settings file.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            kind: self.kind.map(Into::into),
            keep_generated: self.keep.then_some(true),
            out_dir: self.out_dir.clone(),
        }
    }
}

/// Bundle kinds accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Filament,
    Printer,
    Process,
}

impl From<KindArg> for BundleKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Filament => BundleKind::Filament,
            KindArg::Printer => BundleKind::Printer,
            KindArg::Process => BundleKind::Process,
        }
    }
}
