//! Shared helpers for integration tests

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// `termynal` with colors off and config/data dirs inside `home`.
pub fn termynal(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("termynal").expect("binary builds");
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"));
    cmd
}

/// Write `content` to `name` inside `dir` and return its path.
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}
