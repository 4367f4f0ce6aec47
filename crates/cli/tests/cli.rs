//! Integration tests for the `opengen` binary.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const TREE_JSON: &str = r#"{
  "paths": {
    "/pets/{petId}": {
      "get": {
        "operationId": "getPet",
        "tags": ["pets"],
        "parameters": [
          { "name": "petId", "in": "path", "schema": { "type": "integer", "format": "int64" } }
        ],
        "responses": {
          "200": { "content": { "application/json": { "schema": { "key": "Pet" } } } }
        }
      }
    }
  }
}"#;

fn opengen(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_opengen"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run opengen")
}

#[test]
fn prints_endpoint_groups() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("tree.json"), TREE_JSON).unwrap();
    fs::write(
        dir.path().join("config.yaml"),
        "useGroups: true\nrenames:\n  Pet: PetDto\n",
    )
    .unwrap();

    let output = opengen(
        &["--target", "kt", "--input", "tree.json", "--config", "config.yaml"],
        dir.path(),
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "opengen failed: {stderr}");

    let groups: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let endpoint = &groups[0]["endpoints"][0];
    assert_eq!(groups[0]["name"], "Pets");
    assert_eq!(endpoint["operationId"], "getPet");
    assert_eq!(endpoint["returnType"], "PetDto");
    assert_eq!(endpoint["operationParams"][0], "petId: Long");
    assert!(stderr.contains("Generated endpoints."), "{stderr}");
}

#[test]
fn reads_yaml_trees() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("tree.yaml"),
        "paths:\n  /health:\n    get:\n      operationId: health\n      responses:\n        204:\n          description: ok\n",
    )
    .unwrap();

    let output = opengen(&["-t", "rust", "-i", "tree.yaml", "--pretty"], dir.path());
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains('\n'));
    let groups: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(groups[0]["endpoints"][0]["returnType"], "()");
}

#[test]
fn unknown_target_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("tree.json"), TREE_JSON).unwrap();

    let output = opengen(&["--target", "cobol", "--input", "tree.json"], dir.path());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown target 'cobol'"), "{stderr}");
    assert!(stderr.contains("kotlin, rust, swift, typescript"), "{stderr}");
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let output = opengen(&["--target", "ts", "--input", "nope.json"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read nope.json"));
}

#[test]
fn generation_errors_fail() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("tree.json"),
        r#"{ "paths": { "/x": { "get": { "operationId": "x" } } } }"#,
    )
    .unwrap();

    let output = opengen(&["--target", "swift", "--input", "tree.json"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No responses field found"));
}
