//! Bundle packaging pipeline
//!
//! Classifies the target, then for each bundle: merges every inheritance
//! group's children over their base, registers the results in the manifest,
//! archives the bundle and removes the generated files again. Failures are
//! contained at the narrowest scope: one document, then one bundle. Only an
//! unavailable archiver aborts the run.

use std::path::{Path, PathBuf};

use bundle_fs::{BundlePath, NormalizedPath, io};
use serde::Serialize;

use crate::archive::{Archiver, archive_entries};
use crate::classify::{DirectoryKind, classify, dir_name, resolve_target, subdirectories};
use crate::groups::{BundleScan, scan_bundle};
use crate::merge::{merge_documents, write_document};
use crate::{PackSettings, Result, cleanup, manifest};

/// A preset produced by merging a child document over its base
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPreset {
    pub vendor: String,
    /// The child document inside the inheritance group
    pub source: PathBuf,
    /// Where the merged document was written
    pub output: PathBuf,
    /// Bundle-relative path recorded in the manifest
    pub relative: NormalizedPath,
}

/// Which step a per-document failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStage {
    Merge,
    Register,
}

/// A single document that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub path: PathBuf,
    pub stage: ItemStage,
    pub message: String,
}

/// Outcome of processing one bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BundleReport {
    pub name: String,
    pub root: PathBuf,
    pub archive: PathBuf,
    pub generated: Vec<GeneratedPreset>,
    /// Relative paths newly added to the manifest this run
    pub registered: Vec<String>,
    pub skipped_groups: Vec<PathBuf>,
    pub item_failures: Vec<ItemFailure>,
    /// Set when the bundle could not be scanned
    pub scan_error: Option<String>,
    /// Set when archive creation failed
    pub archive_error: Option<String>,
    /// Number of generated presets removed after archiving
    pub cleaned: usize,
}

impl BundleReport {
    /// A bundle fails only when it produced no archive.
    pub fn failed(&self) -> bool {
        self.scan_error.is_some() || self.archive_error.is_some()
    }
}

/// Outcome of a whole run, across every bundle found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub bundles: Vec<BundleReport>,
    /// Failed bundles plus containers that could not be listed
    pub failures: usize,
}

impl RunReport {
    pub fn success(&self) -> bool {
        self.failures == 0
    }

    /// Process exit status: 0, or the failure count clamped to 1..=255.
    pub fn exit_code(&self) -> i32 {
        self.failures.min(255) as i32
    }
}

/// Drives packaging for a directory tree
pub struct Packager<'a> {
    archiver: &'a dyn Archiver,
    settings: PackSettings,
}

impl<'a> Packager<'a> {
    pub fn new(archiver: &'a dyn Archiver, settings: PackSettings) -> Self {
        Self { archiver, settings }
    }

    pub fn settings(&self) -> &PackSettings {
        &self.settings
    }

    /// Package `path`, which is either one bundle or a container of them.
    ///
    /// Returns `Err` only for fatal conditions: the archiver is unavailable
    /// or `path` is not a directory.
    pub fn pack(&self, path: &Path) -> Result<RunReport> {
        self.archiver.check_available()?;

        let path = resolve_target(path);
        let mut report = RunReport::default();
        match classify(&path)? {
            DirectoryKind::Bundle => self.record(&mut report, self.pack_bundle(&path)),
            DirectoryKind::Container => self.pack_container(&path, &mut report),
        }
        Ok(report)
    }

    fn pack_container(&self, path: &Path, report: &mut RunReport) {
        let children = match subdirectories(path) {
            Ok(children) => children,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "cannot list directory");
                report.failures += 1;
                return;
            }
        };

        if children.is_empty() {
            tracing::debug!(path = %path.display(), "no bundles in directory");
        }

        for child in children {
            match classify(&child) {
                Ok(DirectoryKind::Bundle) => self.record(report, self.pack_bundle(&child)),
                Ok(DirectoryKind::Container) => self.pack_container(&child, report),
                Err(e) => {
                    tracing::error!(path = %child.display(), error = %e, "cannot classify directory");
                    report.failures += 1;
                }
            }
        }
    }

    fn record(&self, report: &mut RunReport, bundle: BundleReport) {
        if bundle.failed() {
            report.failures += 1;
        }
        report.bundles.push(bundle);
    }

    /// Process a single bundle root.
    pub fn pack_bundle(&self, root: &Path) -> BundleReport {
        let name = dir_name(root);
        let mut report = BundleReport {
            archive: self.archive_path(root, &name),
            name,
            root: root.to_path_buf(),
            ..BundleReport::default()
        };
        tracing::info!(bundle = %report.name, "processing bundle");

        let scan = match scan_bundle(root) {
            Ok(scan) => scan,
            Err(e) => {
                tracing::error!(bundle = %report.name, error = %e, "cannot scan bundle");
                report.scan_error = Some(e.to_string());
                return report;
            }
        };
        report.skipped_groups = scan.skipped.clone();

        self.generate(root, &scan, &mut report);

        if let Err(e) = self.archive(root, &scan, &report.archive) {
            tracing::error!(bundle = %report.name, archive = %report.archive.display(), error = %e, "archive creation failed");
            report.archive_error = Some(e.to_string());
        } else {
            tracing::info!(bundle = %report.name, archive = %report.archive.display(), "archive created");
        }

        if !self.settings.keep_generated {
            report.cleaned = cleanup::remove_generated(&report.generated);
        }

        report
    }

    fn generate(&self, root: &Path, scan: &BundleScan, report: &mut BundleReport) {
        let manifest_path = root.join(BundlePath::Manifest.as_str());

        for group in &scan.groups {
            for child in &group.children {
                let output = group.output_path(child);
                let relative = group.relative_output(child);

                if report.generated.iter().any(|g| g.output == output) {
                    tracing::warn!(
                        vendor = %group.vendor,
                        path = %relative,
                        "preset generated by more than one group; last one wins"
                    );
                }

                let written = merge_documents(&group.base, child)
                    .and_then(|document| write_document(&output, &document));
                if let Err(e) = written {
                    tracing::error!(path = %child.display(), error = %e, "failed to generate preset");
                    report.item_failures.push(ItemFailure {
                        path: child.clone(),
                        stage: ItemStage::Merge,
                        message: e.to_string(),
                    });
                    continue;
                }
                tracing::debug!(path = %relative, "generated preset");

                // The preset is archived even if the manifest cannot be updated.
                match manifest::register(&manifest_path, &group.vendor, relative.as_str()) {
                    Ok(true) => report.registered.push(relative.as_str().to_string()),
                    Ok(false) => {}
                    Err(e) => {
                        tracing::error!(path = %relative, error = %e, "failed to update manifest");
                        report.item_failures.push(ItemFailure {
                            path: child.clone(),
                            stage: ItemStage::Register,
                            message: e.to_string(),
                        });
                    }
                }

                report.generated.push(GeneratedPreset {
                    vendor: group.vendor.clone(),
                    source: child.clone(),
                    output,
                    relative,
                });
            }
        }
    }

    fn archive(&self, root: &Path, scan: &BundleScan, archive_path: &Path) -> Result<()> {
        let entries = archive_entries(&scan.vendors)?;
        if io::remove_if_exists(&NormalizedPath::new(archive_path))? {
            tracing::debug!(archive = %archive_path.display(), "removed previous archive");
        }
        tracing::debug!(
            archiver = self.archiver.name(),
            entries = entries.len(),
            "creating archive"
        );
        self.archiver.create(root, archive_path, &entries)
    }

    fn archive_path(&self, root: &Path, name: &str) -> PathBuf {
        archive_path(&self.settings, root, name)
    }
}

fn archive_path(settings: &PackSettings, root: &Path, name: &str) -> PathBuf {
    settings
        .out_dir
        .as_deref()
        .unwrap_or(root)
        .join(settings.kind.archive_name(name))
}

/// Describe what [`Packager::pack`] would do, without touching disk.
pub fn plan(path: &Path, settings: &PackSettings) -> Result<Vec<BundlePlan>> {
    let path = resolve_target(path);
    let mut plans = Vec::new();
    match classify(&path)? {
        DirectoryKind::Bundle => plans.push(plan_bundle(&path, settings)?),
        DirectoryKind::Container => plan_container(&path, settings, &mut plans)?,
    }
    Ok(plans)
}

fn plan_container(path: &Path, settings: &PackSettings, plans: &mut Vec<BundlePlan>) -> Result<()> {
    for child in subdirectories(path)? {
        match classify(&child)? {
            DirectoryKind::Bundle => plans.push(plan_bundle(&child, settings)?),
            DirectoryKind::Container => plan_container(&child, settings, plans)?,
        }
    }
    Ok(())
}

fn plan_bundle(root: &Path, settings: &PackSettings) -> Result<BundlePlan> {
    let name = dir_name(root);
    let scan = scan_bundle(root)?;
    let presets = scan
        .groups
        .iter()
        .flat_map(|group| {
            group.children.iter().map(move |child| PlannedPreset {
                vendor: group.vendor.clone(),
                group: group.dir.clone(),
                source: child.clone(),
                relative: group.relative_output(child),
            })
        })
        .collect();

    Ok(BundlePlan {
        archive: archive_path(settings, root, &name),
        name,
        root: root.to_path_buf(),
        presets,
        skipped_groups: scan.skipped,
    })
}

/// A preset that packaging would generate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPreset {
    pub vendor: String,
    pub group: PathBuf,
    pub source: PathBuf,
    pub relative: NormalizedPath,
}

/// What packaging one bundle would do
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundlePlan {
    pub name: String,
    pub root: PathBuf,
    pub archive: PathBuf,
    pub presets: Vec<PlannedPreset>,
    pub skipped_groups: Vec<PathBuf>,
}
