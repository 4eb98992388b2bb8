//! Golden-file tests using test-fixtures/
//!
//! The Overture fixture is a realistic filament bundle: one vendor with an
//! inheritance group, one vendor whose group lacks a base document.

use bundle_core::{PackSettings, Packager};
use bundle_test_utils::{RecordingArchiver, TestBundle};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;

/// Normalize line endings to LF for cross-platform comparison.
fn normalize_line_endings(s: &str) -> String {
    s.replace("\r\n", "\n")
}

/// Path to the test-fixtures directory (relative to the workspace root).
fn fixtures_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/bundle-core -> ../../test-fixtures
    manifest_dir.join("../../test-fixtures")
}

fn load_expected(rel: &str) -> String {
    let path = fixtures_dir().join("expected/Overture").join(rel);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read expected output at {}: {}", path.display(), e));
    normalize_line_endings(&content)
}

fn overture() -> TestBundle {
    TestBundle::from_dir(&fixtures_dir().join("bundles/Overture"))
}

const BLACK: &str = "Bambu Lab/Overture PLA Matte Black @BBL X1C.json";
const WHITE: &str = "Bambu Lab/Overture PLA Matte White @BBL X1C.json";

#[test]
fn test_fixture_is_valid() {
    let bundle = overture();
    bundle.assert_file_exists("bundle_structure.json");
    bundle.assert_file_exists("Bambu Lab/PLA Matte/base.json");
    bundle.assert_file_missing(BLACK);
}

#[test]
fn test_overture_generated_presets_match_golden() {
    let bundle = overture();
    let archiver = RecordingArchiver::new();
    let settings = PackSettings {
        keep_generated: true,
        ..PackSettings::default()
    };

    let report = Packager::new(&archiver, settings).pack(bundle.root()).unwrap();

    assert!(report.success());
    assert_eq!(normalize_line_endings(&bundle.read(BLACK)), load_expected(BLACK));
    assert_eq!(normalize_line_endings(&bundle.read(WHITE)), load_expected(WHITE));
    assert_eq!(
        normalize_line_endings(&bundle.read("bundle_structure.json")),
        load_expected("bundle_structure.json")
    );
    assert_eq!(
        report.bundles[0].skipped_groups,
        vec![bundle.path("Creality/Hyper PLA")]
    );
}

#[test]
fn test_overture_archive_entries() {
    let bundle = overture();
    let archiver = RecordingArchiver::new();

    Packager::new(&archiver, PackSettings::default())
        .pack(bundle.root())
        .unwrap();

    let call = archiver.call_for("Overture").unwrap();
    assert_eq!(
        call.entries,
        vec![
            "bundle_structure.json",
            "Bambu Lab/Overture PLA @BBL X1C.json",
            BLACK,
            WHITE,
        ]
    );
    assert_eq!(call.archive_path, bundle.path("Overture.orca_filament"));

    // Cleanup removed the generated presets but left the hand-written one
    bundle.assert_file_missing(BLACK);
    bundle.assert_file_missing(WHITE);
    bundle.assert_file_exists("Bambu Lab/Overture PLA @BBL X1C.json");
}

#[test]
fn test_overture_second_run_is_stable() {
    let bundle = overture();
    let archiver = RecordingArchiver::new();
    let packager = Packager::new(&archiver, PackSettings::default());

    packager.pack(bundle.root()).unwrap();
    packager.pack(bundle.root()).unwrap();

    let calls = archiver.calls();
    assert_eq!(calls[0].contents, calls[1].contents);
    assert_eq!(
        normalize_line_endings(&bundle.read("bundle_structure.json")),
        load_expected("bundle_structure.json")
    );
}
