// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `bl settings` and how settings shape backlogs.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DATASET: &str = r#"{
  "projects": [{"id": 1, "name": "product"}],
  "versions": [
    {"id": 5, "project": 1, "name": "Sprint 1", "status": "open",
     "start_date": "2024-06-03", "end_date": "2024-06-14"},
    {"id": 9, "project": 1, "name": "Icebox", "status": "open"}
  ],
  "issues": [
    {"id": 10, "project": 1, "kind": "story", "subject": "Login",
     "position": 1, "created_on": "2024-06-01", "updated_on": "2024-06-01"},
    {"id": 11, "project": 1, "version": 9, "kind": "story", "subject": "Dark mode",
     "position": 2, "created_on": "2024-06-01", "updated_on": "2024-06-01"}
  ]
}"#;

fn bl() -> Command {
    cargo_bin_cmd!("bl")
}

fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    bl().arg("init").current_dir(temp.path()).assert().success();
    std::fs::write(temp.path().join("data.json"), DATASET).unwrap();
    bl().args(["import", "data.json"])
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

fn ids(temp: &TempDir, command: &str) -> Vec<i64> {
    let output = bl()
        .args([command, "1", "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let key = if command == "backlog" { "stories" } else { "sprints" };
    json[key]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect()
}

#[test]
fn defaults_are_shown() {
    let temp = init_temp();
    let output = bl()
        .args(["settings", "1"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    similar_asserts::assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Project 1\n  ignored versions:    (none)\n  backlog versions:    0\n  show subprojects:    false\n  in scrum stats:      false\n"
    );
}

#[test]
fn backlog_versions_join_the_product_backlog() {
    let temp = init_temp();
    assert_eq!(ids(&temp, "backlog"), vec![10]);
    assert_eq!(ids(&temp, "sprints"), vec![5, 9]);

    bl().args(["settings", "1", "--backlog", "0,9"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("backlog versions:    0,9"));

    assert_eq!(ids(&temp, "backlog"), vec![10, 11]);
    assert_eq!(ids(&temp, "sprints"), vec![5]);
}

#[test]
fn backlog_versions_only() {
    let temp = init_temp();
    bl().args(["settings", "1", "--backlog", "9"])
        .current_dir(temp.path())
        .assert()
        .success();
    assert_eq!(ids(&temp, "backlog"), vec![11]);
}

#[test]
fn settings_json() {
    let temp = init_temp();
    let output = bl()
        .args(["settings", "1", "--scrum-stats", "true", "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["project"], 1);
    assert_eq!(json["show_in_scrum_stats"], true);
    assert_eq!(json["backlog_versions"], serde_json::json!([0]));
}

#[test]
fn foreign_version_is_rejected() {
    let temp = init_temp();
    bl().args(["settings", "1", "--ignored", "77"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("version 77 is not an open version of project 1"));
}
