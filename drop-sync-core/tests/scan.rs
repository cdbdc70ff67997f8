use std::fs;

use drop_sync_core::scan::{scan, ScanError, DROP_PREFIXES};
use tempfile::tempdir;

#[test]
fn scan_returns_only_prefix_matching_files() {
    let dir = tempdir().expect("Creating temp dir failed");
    for name in [
        "foo-1.0.tar.gz",
        "dnx-clr-win-x86.1.0.0.nupkg",
        "dnx-coreclr-linux-x64.1.0.0.nupkg",
    ] {
        fs::write(dir.path().join(name), b"drop").expect("Writing fixture failed");
    }

    let drops = scan(dir.path(), &DROP_PREFIXES).expect("Scan should succeed");

    let mut names: Vec<String> = drops
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "dnx-clr-win-x86.1.0.0.nupkg",
            "dnx-coreclr-linux-x64.1.0.0.nupkg"
        ],
        "Exactly the dnx-* files match; foo-1.0.tar.gz is excluded"
    );
}

#[test]
fn scan_is_not_recursive_and_skips_directories() {
    let dir = tempdir().expect("Creating temp dir failed");
    let nested = dir.path().join("dnx-clr-nested");
    fs::create_dir(&nested).expect("Creating nested dir failed");
    fs::write(nested.join("dnx-clr-inner.nupkg"), b"drop").expect("Writing fixture failed");

    let drops = scan(dir.path(), &DROP_PREFIXES).expect("Scan should succeed");
    assert!(
        drops.is_empty(),
        "A directory whose name matches a prefix is not a drop, and nested files are ignored"
    );
}

#[test]
fn scan_of_empty_directory_is_empty_not_error() {
    let dir = tempdir().expect("Creating temp dir failed");
    let drops = scan(dir.path(), &DROP_PREFIXES).expect("Scan should succeed");
    assert!(drops.is_empty());
}

#[test]
fn scan_of_missing_directory_fails() {
    let dir = tempdir().expect("Creating temp dir failed");
    let missing = dir.path().join("no-such-dir");
    match scan(&missing, &DROP_PREFIXES) {
        Err(ScanError::DirectoryNotFound(path)) => assert_eq!(path, missing),
        other => panic!("Expected DirectoryNotFound, got {other:?}"),
    }
}

#[test]
fn scan_order_is_stable_for_unchanged_directory() {
    let dir = tempdir().expect("Creating temp dir failed");
    for name in ["dnx-clr-b.nupkg", "dnx-clr-a.nupkg", "dnx-coreclr-c.nupkg"] {
        fs::write(dir.path().join(name), b"drop").expect("Writing fixture failed");
    }
    let first = scan(dir.path(), &DROP_PREFIXES).expect("Scan should succeed");
    let second = scan(dir.path(), &DROP_PREFIXES).expect("Scan should succeed");
    assert_eq!(first, second, "Same directory state, same order");
}
