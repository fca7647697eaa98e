//! Integration tests for the CLI

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{termynal, write_file};

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    termynal(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn play_help_describes_keys() {
    let home = TempDir::new().unwrap();
    termynal(&home)
        .args(["play", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<FILE>"))
        .stdout(predicate::str::contains("--type-delay <MS>"))
        .stdout(predicate::str::contains("restart"));
}

#[test]
fn play_without_file_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    termynal(&home)
        .arg("play")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<FILE>"));
}

// ============================================================================
// Parse Tests
// ============================================================================

#[test]
fn parse_prints_line_data_as_json() {
    let home = TempDir::new().unwrap();
    let file = write_file(&home, "demo.txt", "$ echo woo\nwoo\n// a note\n");

    let output = termynal(&home).arg("parse").arg(&file).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    insta::assert_snapshot!(stdout, @r#"
    [
      {
        "value": "echo woo",
        "type": "input"
      },
      {
        "value": "woo"
      },
      {
        "value": "💬 a note",
        "class": "termynal-comment",
        "delay": 0.0
      }
    ]
    "#);
}

#[test]
fn parse_finds_container_in_html() {
    let home = TempDir::new().unwrap();
    let page = r#"<html><body>
<pre class="demo">$ cargo build
Compiling</pre>
</body></html>"#;
    let file = write_file(&home, "page.html", page);

    termynal(&home)
        .arg("parse")
        .arg(&file)
        .args(["--selector", "pre.demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""value": "cargo build""#))
        .stdout(predicate::str::contains(r#""value": "Compiling""#));
}

#[test]
fn parse_honors_custom_prompt_literal() {
    let home = TempDir::new().unwrap();
    let file = write_file(&home, "demo.txt", "% ls\n$ not input\n");

    termynal(&home)
        .arg("parse")
        .arg(&file)
        .args(["--prompt", "% "])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""value": "ls""#))
        .stdout(predicate::str::contains(r#""value": "$ not input""#));
}

#[test]
fn missing_container_fails() {
    let home = TempDir::new().unwrap();
    let file = write_file(&home, "page.html", "<div>nothing here</div>");

    termynal(&home)
        .arg("parse")
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("container not found: #termynal"));
}

#[test]
fn invalid_selector_fails() {
    let home = TempDir::new().unwrap();
    let file = write_file(&home, "page.html", "<pre id=\"termynal\">x</pre>");

    termynal(&home)
        .arg("parse")
        .arg(&file)
        .args(["--selector", "pre > code"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid selector"));
}

#[test]
fn missing_file_fails() {
    let home = TempDir::new().unwrap();
    termynal(&home)
        .args(["parse", "/nonexistent/demo.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn malformed_custom_prompt_is_logged_not_fatal() {
    let home = TempDir::new().unwrap();
    let file = write_file(&home, "demo.txt", "# no delimiter here\n");

    termynal(&home)
        .arg("parse")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "input""#))
        .stderr(predicate::str::contains("custom prompt found but no end delimiter"));
}

// ============================================================================
// Render Tests
// ============================================================================

#[test]
fn render_prints_line_templates() {
    let home = TempDir::new().unwrap();
    let file = write_file(
        &home,
        "demo.txt",
        "$ ls\n# root@box$ whoami\nDownloading\r\ndone\n",
    );

    let output = termynal(&home).arg("render").arg(&file).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    insta::assert_snapshot!(stdout, @r#"
    <span data-ty="input">ls</span>
    <span data-ty="input" data-ty-prompt="root@box">whoami</span>
    <span data-ty-carriageReturn="true">Downloading</span>
    <span>done</span>
    "#);
}

#[test]
fn render_keeps_authored_lines() {
    let home = TempDir::new().unwrap();
    let file = write_file(
        &home,
        "demo.txt",
        "<span data-ty=\"progress\" data-ty-progressPercent=\"60\"></span>\n",
    );

    termynal(&home)
        .arg("render")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "<span data-ty=\"progress\" data-ty-progressPercent=\"60\"></span>\n",
        ));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn config_path_points_into_config_dir() {
    let home = TempDir::new().unwrap();
    termynal(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("termynal"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
#[cfg(target_os = "linux")]
fn config_show_reads_playback_defaults() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("config").join("termynal");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[playback]\ntypeDelay = 40\n").unwrap();

    termynal(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("typeDelay = 40.0"))
        .stdout(predicate::str::contains("level = \"warn\""));
}

#[test]
#[cfg(target_os = "linux")]
fn broken_config_is_reported() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("config").join("termynal");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[playback\n").unwrap();

    termynal(&home)
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
#[cfg(target_os = "linux")]
fn config_init_writes_defaults_once() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("config").join("termynal").join("config.toml");

    termynal(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
    let written = std::fs::read_to_string(&file).unwrap();
    assert!(written.contains("level = \"warn\""), "{}", written);

    std::fs::write(&file, "[playback]\ntypeDelay = 40\n").unwrap();
    termynal(&home)
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
    assert!(std::fs::read_to_string(&file).unwrap().contains("typeDelay"));

    termynal(&home).args(["config", "init", "--force"]).assert().success();
    assert!(!std::fs::read_to_string(&file).unwrap().contains("typeDelay"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn completions_for_bash() {
    let home = TempDir::new().unwrap();
    termynal(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_termynal"));
}
