//! Shared helpers for integration tests

#![allow(dead_code)]

use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_text(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("fixture {} unreadable: {}", name, e))
}

/// Deserialize a JSON fixture into a record type
pub fn load_fixture<T: DeserializeOwned>(name: &str) -> T {
    serde_json::from_str(&fixture_text(name))
        .unwrap_or_else(|e| panic!("fixture {} is not valid: {}", name, e))
}

/// Write a configuration file into a fresh temporary directory
pub fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bdsquery.toml");
    std::fs::write(&path, contents).expect("write config");
    (dir, path)
}
