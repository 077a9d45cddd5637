//! Integration tests for the devault-subver binary
//!
//! Runs the built binary against a temporary configuration file and checks
//! stdout and the exit status.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_with_config(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_devault-subver"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run devault-subver")
}

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn test_parse_prints_version_and_dotted_form() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");

    let output = run_with_config(&config, &["parse", "/DeVault Core:1.0.1(EB32.0)/"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1000100 (1.0.1)");
}

#[test]
fn test_strict_parse_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "[parser]\nmode = \"compatible\"\n");

    let output = run_with_config(&config, &["parse", "/X:1.0.1/"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0 (0.0.0)");

    let output = run_with_config(&config, &["parse", "--strict", "/X:1.0.1/"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_config_comments_used_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "[client]\nname = \"Test Node\"\ncomments = [\"a\", \"b\"]\n",
    );

    let output = run_with_config(&config, &[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "/Test Node:1.2.1(a; b)/");

    let output = run_with_config(&config, &["format", "--comment", "c"]);
    assert_eq!(stdout(&output), "/Test Node:1.2.1(c)/");
}

#[test]
fn test_version_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");

    let output = run_with_config(&config, &["version", "1020304"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1.2.3.4");
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "[client]\ncomments = [\"net:main\"]\n");

    let output = run_with_config(&config, &["version", "1"]);
    assert!(!output.status.success());
}
