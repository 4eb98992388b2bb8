//! The pack command

use bundle_core::{BundleReport, PackSettings, Packager, RunReport, ZipCommandArchiver};
use colored::Colorize;

use crate::cli::PackArgs;
use crate::error::Result;

/// Run the pack command
///
/// Returns the process exit status: zero when every bundle was archived,
/// otherwise the number of failed bundles.
pub fn run_pack(args: &PackArgs) -> Result<i32> {
    let settings = PackSettings::resolve(&args.dir, args.overrides())?;
    tracing::debug!(?settings, dir = %args.dir.display(), "resolved settings");

    let archiver = ZipCommandArchiver::with_program(&args.zip);
    let packager = Packager::new(&archiver, settings);

    println!(
        "{} Packing presets in {}...",
        "=>".blue().bold(),
        args.dir.display()
    );
    let report = packager.pack(&args.dir)?;
    print_report(&report, packager.settings().keep_generated);

    Ok(report.exit_code())
}

fn print_report(report: &RunReport, kept: bool) {
    if report.bundles.is_empty() {
        println!("{} No bundles found.", "!".yellow().bold());
    }

    for bundle in &report.bundles {
        print_bundle(bundle, kept);
    }

    if report.bundles.len() > 1 || !report.success() {
        println!();
        if report.success() {
            println!(
                "{} {} bundle(s) packed.",
                "OK".green().bold(),
                report.bundles.len()
            );
        } else {
            println!(
                "{} {} failure(s) across {} bundle(s).",
                "FAILED".red().bold(),
                report.failures,
                report.bundles.len()
            );
        }
    }
}

fn print_bundle(bundle: &BundleReport, kept: bool) {
    if let Some(reason) = bundle.scan_error.as_ref().or(bundle.archive_error.as_ref()) {
        println!("{} {}: {}", "FAILED".red().bold(), bundle.name.cyan(), reason);
    } else {
        println!(
            "{} {} -> {}",
            "OK".green().bold(),
            bundle.name.cyan(),
            bundle.archive.display()
        );
    }

    for preset in &bundle.generated {
        println!("   {} {}", "+".green(), preset.relative);
    }
    for path in &bundle.registered {
        println!("   {} {} {}", "*".blue(), path, "(added to manifest)".dimmed());
    }
    for group in &bundle.skipped_groups {
        println!(
            "   {} {} {}",
            "-".yellow(),
            group.display(),
            "(no base.json, skipped)".dimmed()
        );
    }
    for failure in &bundle.item_failures {
        println!(
            "   {} {}: {}",
            "!".red(),
            failure.path.display(),
            failure.message
        );
    }
    if !kept && bundle.cleaned > 0 {
        println!(
            "   {} removed {} generated preset(s)",
            "~".dimmed(),
            bundle.cleaned
        );
    }
}
