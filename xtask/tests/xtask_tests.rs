// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integration tests for xtask subcommands.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)] // cargo_bin works fine; the replacement macro is unstable
fn xtask() -> Command {
    Command::cargo_bin("xtask").unwrap()
}

#[test]
fn schema_subcommand_exists() {
    xtask()
        .arg("schema")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--out-dir"));
}

#[test]
fn schema_writes_config_schema() {
    let dir = tempfile::tempdir().unwrap();
    xtask()
        .arg("schema")
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("wrote schema"));

    let path = dir.path().join("mte-config.schema.json");
    let content = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let obj = value.as_object().expect("schema should be a JSON object");
    assert!(obj.contains_key("$schema"));
    assert_eq!(obj["title"], "TermEnvConfig");
    let props = obj["properties"].as_object().unwrap();
    for key in ["log_level", "sdk", "maven"] {
        assert!(props.contains_key(key), "missing property {key}");
    }
}

#[test]
fn schema_creates_nested_out_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a/b");
    xtask()
        .args(["schema", "--out-dir"])
        .arg(&nested)
        .assert()
        .success();
    assert!(nested.join("mte-config.schema.json").is_file());
}
