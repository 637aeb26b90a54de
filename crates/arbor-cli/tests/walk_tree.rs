//! Integration tests for the `arbor` binary.
//!
//! These tests build an installed node_modules layout in a temp directory
//! and verify the binary's output and exit status.

use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-p", "arbor-cli", "--bin", "arbor", "--"]);
    cmd
}

fn write_manifest(dir: &Path, content: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join("package.json"), content).unwrap();
}

#[test]
fn test_json_output_lists_discovered_modules() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_manifest(
        root,
        r#"{
            "name": "app",
            "dependencies": { "a": "^1.0.0" },
            "devDependencies": { "b": "^1.0.0" }
        }"#,
    );
    write_manifest(&root.join("node_modules/a"), r#"{ "name": "a" }"#);
    write_manifest(&root.join("node_modules/b"), r#"{ "name": "b" }"#);

    let output = cargo_bin()
        .arg(root)
        .arg("--json")
        .output()
        .expect("failed to run arbor");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let modules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let modules = modules.as_array().unwrap();
    assert_eq!(modules.len(), 3);

    // Discovery order: the root package comes first.
    assert_eq!(modules[0]["name"], "app");
    assert_eq!(modules[0]["relationship"]["category"], "root");
    assert_eq!(modules[0]["relationship"]["requirement"], "required");

    let a = modules.iter().find(|m| m["name"] == "a").unwrap();
    assert_eq!(a["relationship"]["category"], "production");
    assert_eq!(a["native_build_kind"], "none");

    let b = modules.iter().find(|m| m["name"] == "b").unwrap();
    assert_eq!(b["relationship"]["category"], "development");
}

#[test]
fn test_missing_required_dependency_fails_with_its_name() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_manifest(root, r#"{ "name": "app", "dependencies": { "gone": "1" } }"#);

    let output = cargo_bin()
        .arg(root)
        .output()
        .expect("failed to run arbor");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("gone"), "stderr: {stderr}");
}

#[test]
fn test_human_output_includes_header_and_paths() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_manifest(root, r#"{ "name": "app", "dependencies": { "a": "1" } }"#);
    write_manifest(&root.join("node_modules/a"), r#"{ "name": "a" }"#);

    let output = cargo_bin().arg(root).output().expect("failed to run arbor");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RELATIONSHIP"));
    assert!(stdout.contains("production required"));
}
