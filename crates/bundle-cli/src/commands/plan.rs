//! The plan command: a read-only preview of pack

use std::path::Path;

use bundle_core::{BundleKind, BundlePlan, PackSettings, SettingsOverrides};
use colored::Colorize;

use crate::error::Result;

/// Run the plan command
pub fn run_plan(dir: &Path, json: bool, kind: Option<BundleKind>) -> Result<()> {
    let overrides = SettingsOverrides {
        kind,
        ..SettingsOverrides::default()
    };
    let settings = PackSettings::resolve(dir, overrides)?;
    let plans = bundle_core::plan(dir, &settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plans)?);
        return Ok(());
    }

    if plans.is_empty() {
        println!("{} No bundles found.", "!".yellow().bold());
    }
    for plan in &plans {
        print_plan(plan);
    }
    Ok(())
}

fn print_plan(plan: &BundlePlan) {
    println!(
        "{} {} -> {}",
        "=>".blue().bold(),
        plan.name.cyan(),
        plan.archive.display()
    );
    if plan.presets.is_empty() {
        println!("   {}", "no inherited presets".dimmed());
    }
    for preset in &plan.presets {
        println!(
            "   {} {} {}",
            "+".green(),
            preset.relative,
            format!("(from {})", preset.source.display()).dimmed()
        );
    }
    for group in &plan.skipped_groups {
        println!(
            "   {} {} {}",
            "-".yellow(),
            group.display(),
            "(no base.json, skipped)".dimmed()
        );
    }
}
