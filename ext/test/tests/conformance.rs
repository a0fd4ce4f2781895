//! Conformance tests that run YAML fixtures against headerblock
//!
//! Run with: cargo test -p headerblock-test --test conformance --features headerblock-test/fixtures
//!
//! Note: This test file requires the `fixtures` feature to be enabled.

#![cfg(feature = "fixtures")]

use headerblock_test::fixture::Fixture;
use std::fs;
use std::path::{Path, PathBuf};

/// The `fixtures/` directory at the workspace root
fn fixtures_dir() -> PathBuf {
    // The manifest dir is ext/test
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let root = Path::new(manifest_dir)
        .parent() // ext
        .and_then(Path::parent) // workspace root
        .expect("Could not find workspace root");

    root.join("fixtures")
}

/// Load and run every fixture in one file
fn run_fixture_file(name: &str) {
    let path = fixtures_dir().join(name);
    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));

    // Parse potentially multiple fixtures (separated by ---)
    let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
        panic!("Failed to parse {}: {}", path.display(), e);
    });
    assert!(!fixtures.is_empty(), "{} has no fixtures", path.display());

    for fixture in fixtures {
        println!("  Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn test_blocklist() {
    run_fixture_file("01_blocklist.yaml");
}

#[test]
fn test_allowlist() {
    run_fixture_file("02_allowlist.yaml");
}

#[test]
fn test_rule_semantics() {
    run_fixture_file("03_rule_semantics.yaml");
}

#[test]
fn test_invalid_config() {
    run_fixture_file("04_invalid_config.yaml");
}

#[test]
fn every_fixture_file_is_covered() {
    let mut files: Vec<String> = fs::read_dir(fixtures_dir())
        .expect("read dir")
        .filter_map(|entry| {
            let name = entry.ok()?.file_name().into_string().ok()?;
            Path::new(&name)
                .extension()
                .is_some_and(|e| e == "yaml" || e == "yml")
                .then_some(name)
        })
        .collect();
    files.sort();

    assert_eq!(
        files,
        [
            "01_blocklist.yaml",
            "02_allowlist.yaml",
            "03_rule_semantics.yaml",
            "04_invalid_config.yaml",
        ]
    );
}
