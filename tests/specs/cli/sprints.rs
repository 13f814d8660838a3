// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `bl sprints`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DATASET: &str = r#"{
  "projects": [
    {"id": 1, "name": "product"},
    {"id": 2, "name": "web", "parent": 1},
    {"id": 3, "name": "mobile", "parent": 1}
  ],
  "versions": [
    {"id": 6, "project": 1, "name": "Sprint 2", "status": "open",
     "start_date": "2024-06-17", "end_date": "2024-06-28"},
    {"id": 5, "project": 1, "name": "Sprint 1", "status": "open",
     "start_date": "2024-06-03", "end_date": "2024-06-14"},
    {"id": 7, "project": 1, "name": "Someday", "status": "open"},
    {"id": 4, "project": 1, "name": "Sprint 0", "status": "closed",
     "start_date": "2024-05-20", "end_date": "2024-05-31"},
    {"id": 8, "project": 2, "name": "Web sprint", "status": "locked", "sharing": "hierarchy",
     "start_date": "2024-06-10", "end_date": "2024-06-21"},
    {"id": 9, "project": 3, "name": "Mobile only", "status": "open",
     "start_date": "2024-06-03", "end_date": "2024-06-14"}
  ],
  "issues": [
    {"id": 10, "project": 1, "version": 5, "kind": "story", "subject": "Login",
     "points": 3, "position": 1, "created_on": "2024-06-01", "updated_on": "2024-06-01"},
    {"id": 11, "project": 2, "version": 8, "kind": "story", "subject": "Landing",
     "points": 2, "position": 2, "created_on": "2024-06-01", "updated_on": "2024-06-01"}
  ]
}"#;

fn bl() -> Command {
    cargo_bin_cmd!("bl")
}

fn init_with(sharing: bool) -> TempDir {
    let temp = TempDir::new().unwrap();
    let mut init = bl();
    init.arg("init");
    if sharing {
        init.arg("--sharing");
    }
    init.current_dir(temp.path()).assert().success();
    std::fs::write(temp.path().join("data.json"), DATASET).unwrap();
    bl().args(["import", "data.json"])
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

fn sprint_ids(temp: &TempDir, args: &[&str]) -> Vec<i64> {
    let output = bl()
        .arg("sprints")
        .args(args)
        .args(["-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["sprints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect()
}

#[test]
fn own_open_sprints_in_date_order() {
    let temp = init_with(false);
    assert_eq!(sprint_ids(&temp, &["1"]), vec![5, 6, 7]);
}

#[test]
fn text_listing() {
    let temp = init_with(false);
    let output = bl()
        .args(["sprints", "1"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    similar_asserts::assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "#5 Sprint 1 (2024-06-03 .. 2024-06-14) open, 3 points\n\
         #6 Sprint 2 (2024-06-17 .. 2024-06-28) open, 0 points\n\
         #7 Someday (undated) open, 0 points\n"
    );
}

#[test]
fn closed_sprints() {
    let temp = init_with(false);
    assert_eq!(sprint_ids(&temp, &["1", "--closed"]), vec![4]);
}

#[test]
fn shared_sprints_include_locked_subproject_sprint() {
    let temp = init_with(true);
    assert_eq!(sprint_ids(&temp, &["1"]), vec![5, 8, 6, 7]);
    // sprint 9 is not shared, so only its owner sees it
    assert_eq!(sprint_ids(&temp, &["3"]), vec![9]);
}

#[test]
fn shared_sprint_points_cover_all_projects() {
    let temp = init_with(true);
    let output = bl()
        .args(["sprints", "1", "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["sprints"][1]["id"], 8);
    assert_eq!(json["sprints"][1]["points"], 2.0);
    assert_eq!(json["sprints"][1]["status"], "locked");
}

#[test]
fn ignored_versions_drop_out() {
    let temp = init_with(false);
    bl().args(["settings", "1", "--ignored", "7"])
        .current_dir(temp.path())
        .assert()
        .success();
    assert_eq!(sprint_ids(&temp, &["1"]), vec![5, 6]);
}

#[test]
fn empty_listing_says_so() {
    let temp = init_with(false);
    bl().args(["sprints", "2", "--closed"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No closed sprints for project 2"));
}

#[test]
fn unknown_project_fails() {
    let temp = init_with(false);
    bl().args(["sprints", "42"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("project not found: 42"));
}
