use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use crate::{Walker, files_under, find_named};

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("a/deep/deeper")).unwrap();
    fs::create_dir_all(root.join("b")).unwrap();
    fs::write(root.join(".gitignore"), "*.log\n").unwrap();
    fs::write(root.join("a/.gitignore"), "*.tmp\n").unwrap();
    fs::write(root.join("a/deep/deeper/file.txt"), "x").unwrap();
    fs::write(root.join("b/other.txt"), "x").unwrap();
    dir
}

#[test]
fn walker_yields_every_entry_once() {
    let dir = fixture();
    let mut seen = BTreeSet::new();
    for entry in Walker::new(dir.path()) {
        let entry = entry.unwrap();
        let relative = entry
            .path()
            .strip_prefix(dir.path())
            .unwrap()
            .to_path_buf();
        assert!(seen.insert(relative), "duplicate entry: {entry:?}");
    }
    assert!(seen.contains(&PathBuf::from("a/deep/deeper/file.txt")));
    assert!(seen.contains(&PathBuf::from("a/deep")));
    assert!(seen.contains(&PathBuf::from(".gitignore")));
    // The root itself is never yielded.
    assert!(!seen.contains(&PathBuf::from("")));
}

#[test]
fn walker_reports_missing_root_and_stops() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let mut walker = Walker::new(&missing);
    let first = walker.next().unwrap();
    assert_eq!(first.unwrap_err().path(), missing);
    assert!(walker.next().is_none());
}

#[test]
fn find_named_locates_nested_ignore_files() {
    let dir = fixture();
    let mut found = find_named(dir.path(), ".gitignore");
    found.sort();
    assert_eq!(
        found,
        [dir.path().join(".gitignore"), dir.path().join("a/.gitignore")]
    );
}

#[test]
fn find_named_matches_files_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join(".gitignore")).unwrap();
    fs::write(dir.path().join(".gitignore/.gitignore"), "").unwrap();
    let found = find_named(dir.path(), ".gitignore");
    assert_eq!(found, [dir.path().join(".gitignore/.gitignore")]);
}

#[test]
fn files_under_skips_directories() {
    let dir = fixture();
    let mut files = files_under(dir.path());
    files.sort();
    assert_eq!(
        files,
        [
            dir.path().join(".gitignore"),
            dir.path().join("a/.gitignore"),
            dir.path().join("a/deep/deeper/file.txt"),
            dir.path().join("b/other.txt"),
        ]
    );
}
