//! Shared helpers for tests that load the native test component library.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use lorenzett_core::config::LibraryConfig;
use once_cell::sync::Lazy;

/// Library name of the fixture under `tests/fixtures/test-components`.
pub const TEST_LIBRARY: &str = "lorenzett_test_components";

static FIXTURE_DIR: Lazy<PathBuf> = Lazy::new(build_fixture);

/// Directory holding the built test component library.
///
/// The fixture is its own workspace and is built once per test binary into a
/// separate target directory.
pub fn fixture_dir() -> &'static Path {
    &FIXTURE_DIR
}

/// Library config that resolves to the test component library.
pub fn fixture_config() -> LibraryConfig {
    LibraryConfig {
        name: TEST_LIBRARY.to_string(),
        search_paths: vec![fixture_dir().to_path_buf()],
    }
}

/// Resolved path of the test component library.
pub fn fixture_path() -> PathBuf {
    fixture_dir().join(libloading::library_filename(TEST_LIBRARY))
}

fn build_fixture() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("test-components")
        .join("Cargo.toml");
    let target_dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join("test-components");

    let status = Command::new(env!("CARGO"))
        .arg("build")
        .arg("--quiet")
        .arg("--manifest-path")
        .arg(&manifest)
        .arg("--target-dir")
        .arg(&target_dir)
        .env_remove("CARGO_TARGET_DIR")
        .env_remove("CARGO_BUILD_TARGET")
        .status()
        .expect("failed to run cargo for the test component library");
    assert!(status.success(), "building the test component library failed");

    target_dir.join("debug")
}
