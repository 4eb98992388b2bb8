//! Preset bundler CLI
//!
//! Flattens user-level preset inheritance and packages slicer preset
//! bundles for import.

mod cli;
mod commands;
mod error;
mod logging;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match cli.command {
        Some(Commands::Pack(args)) => commands::run_pack(&args),
        None => commands::run_pack(&cli.pack),
        Some(Commands::Plan { dir, json, kind }) => {
            commands::run_plan(&dir, json, kind.map(Into::into))?;
            Ok(0)
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "preset-bundle",
                &mut std::io::stdout(),
            );
            Ok(0)
        }
    }
}
