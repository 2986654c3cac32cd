//! CLI integration tests
//!
//! These run the compiled `stackprobe` binary and check output formats and
//! exit codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn stackprobe_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_stackprobe"))
}

fn run(args: &[&str]) -> Output {
    Command::new(stackprobe_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("STACKPROBE_MIN_CONFIDENCE")
        .output()
        .expect("Failed to execute stackprobe")
}

fn create_rust_repo(dir: &TempDir) -> &Path {
    let repo_path = dir.path();
    fs::write(
        repo_path.join("Cargo.toml"),
        "[package]\nname = \"test-project\"\nversion = \"0.1.0\"\nedition = \"2021\"\n\n[dependencies]\naxum = \"0.7\"\n",
    )
    .expect("Failed to write Cargo.toml");
    fs::create_dir_all(repo_path.join("src")).expect("Failed to create src directory");
    fs::write(
        repo_path.join("src/main.rs"),
        "use axum::Router;\n\nfn main() {}\n",
    )
    .expect("Failed to write main.rs");
    repo_path
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("stackprobe"));
    assert!(stdout.contains("detect"));
    assert!(stdout.contains("platforms"));
}

#[test]
fn test_cli_version() {
    let output = run(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_detect_json_output() {
    let dir = TempDir::new().unwrap();
    let repo = create_rust_repo(&dir);

    let output = run(&["detect", repo.to_str().unwrap(), "--format", "json", "-q"]);
    assert_eq!(output.status.code(), Some(0));

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(parsed["primary"]["primary_language"], "Rust");
    assert_eq!(parsed["primary"]["framework"], "Axum");
    assert_eq!(parsed["primary"]["build_tool"], "cargo");
    assert_eq!(parsed["min_confidence_threshold"], 0.0);
}

#[test]
fn test_detect_sequential_matches_default() {
    let dir = TempDir::new().unwrap();
    let repo = create_rust_repo(&dir);
    let path = repo.to_str().unwrap();

    let concurrent = run(&["detect", path, "-f", "json", "-q"]);
    let sequential = run(&["detect", path, "-f", "json", "-q", "--sequential"]);

    assert_eq!(concurrent.stdout, sequential.stdout);
}

#[test]
fn test_detect_yaml_output() {
    let dir = TempDir::new().unwrap();
    let repo = create_rust_repo(&dir);

    let output = run(&["detect", repo.to_str().unwrap(), "--format", "yaml", "-q"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("primary_language: Rust"));
}

#[test]
fn test_detect_human_output() {
    let dir = TempDir::new().unwrap();
    let repo = create_rust_repo(&dir);

    let output = run(&["detect", repo.to_str().unwrap(), "-q"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Detected Rust"));
    assert!(stdout.contains("cargo build --release"));
}

#[test]
fn test_detect_output_file() {
    let dir = TempDir::new().unwrap();
    let repo = create_rust_repo(&dir);
    let out_dir = TempDir::new().unwrap();
    let out_file = out_dir.path().join("result.json");

    let output = run(&[
        "detect",
        repo.to_str().unwrap(),
        "-f",
        "json",
        "-o",
        out_file.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let written = fs::read_to_string(&out_file).expect("output file written");
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed["primary"]["primary_language"], "Rust");
}

#[test]
fn test_detect_threshold_filters_detections() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();

    let output = run(&[
        "detect",
        dir.path().to_str().unwrap(),
        "-f",
        "json",
        "-c",
        "0.45",
        "-q",
    ]);
    assert_eq!(output.status.code(), Some(0));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(parsed["detections"].as_array().unwrap().is_empty());
    assert!(parsed["primary"].is_null());
}

#[test]
fn test_invalid_threshold_exit_code() {
    let dir = TempDir::new().unwrap();
    let repo = create_rust_repo(&dir);

    let output = run(&["detect", repo.to_str().unwrap(), "--min-confidence", "1.5"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_path_exit_code() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let output = run(&["detect", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_platforms_json() {
    let output = run(&["platforms", "--format", "json"]);
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["Java", "Node.js", "Python", ".NET", "Go", "Rust", "PHP", "Ruby"]
    );
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = run(&["frobnicate"]);
    assert!(!output.status.success());
}
