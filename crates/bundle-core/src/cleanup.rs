//! Post-archive removal of generated presets

use bundle_fs::{NormalizedPath, io};

use crate::pipeline::GeneratedPreset;

/// Delete generated presets from their vendor folders.
///
/// Failures are logged and otherwise ignored; a preset may already be gone.
/// The manifest keeps its entries. Returns how many files were removed.
pub fn remove_generated(generated: &[GeneratedPreset]) -> usize {
    let mut removed = 0;
    for preset in generated {
        match io::remove_if_exists(&NormalizedPath::new(&preset.output)) {
            Ok(true) => removed += 1,
            Ok(false) => {}
            Err(e) => tracing::debug!(path = %preset.output.display(), error = %e, "cleanup failed"),
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn removes_outputs_and_tolerates_missing() {
        let temp = TempDir::new().unwrap();
        let present = temp.path().join("a.json");
        fs::write(&present, "{}").unwrap();

        let generated = vec![
            GeneratedPreset {
                vendor: "V".into(),
                source: temp.path().join("G/a.json"),
                output: present.clone(),
                relative: NormalizedPath::new("V/a.json"),
            },
            GeneratedPreset {
                vendor: "V".into(),
                source: temp.path().join("G/b.json"),
                output: temp.path().join("b.json"),
                relative: NormalizedPath::new("V/b.json"),
            },
        ];

        assert_eq!(remove_generated(&generated), 1);
        assert!(!present.exists());
    }
}
