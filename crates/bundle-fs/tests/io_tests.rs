use bundle_fs::{NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("bundle_structure.json"));

    io::write_atomic(&path, b"{}").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "{}");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("PLA.json");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated").unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_write_atomic_creates_parent_dirs() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("Generic/nested/PLA.json"));

    io::write_atomic(&path, b"{}").unwrap();

    assert!(path.is_file());
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("bundle_structure.json"));

    io::write_atomic(&path, b"first").unwrap();
    io::write_atomic(&path, b"second").unwrap();

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["bundle_structure.json".to_string()]);
}

#[test]
fn test_write_atomic_into_missing_parent_that_is_a_file_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("blocker"), "x").unwrap();
    let path = NormalizedPath::new(temp.path().join("blocker/child.json"));

    assert!(io::write_atomic(&path, b"{}").is_err());
}

#[test]
fn test_read_text_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/file.json");
    let err = io::read_text(&path).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_remove_if_exists() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("PLA.json");
    fs::write(&file_path, "{}").unwrap();
    let path = NormalizedPath::new(&file_path);

    assert!(io::remove_if_exists(&path).unwrap());
    assert!(!file_path.exists());
    // Second removal is a no-op, not an error
    assert!(!io::remove_if_exists(&path).unwrap());
}
