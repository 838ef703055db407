//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

/// Raw ideas exercised across the suite, including edge cases.
pub const SAMPLE_IDEAS: &[&str] = &[
    "a faster sort",
    "",
    " ",
    "line one\nline two",
    "Forging: already labelled",
    "unicode 🦀 ünïcode",
];

/// Write `content` to `config.toml` inside a fresh temp dir.
///
/// The returned `TempDir` must outlive the path.
pub fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).expect("write config");
    (dir, path)
}
