// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `bl health`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Two finished sprints that delivered everything, then a running one.
const DATASET: &str = r#"{
  "projects": [{"id": 1, "name": "product"}, {"id": 2, "name": "empty"}],
  "versions": [
    {"id": 3, "project": 1, "name": "Sprint 1", "status": "closed", "has_notes": true,
     "start_date": "2024-05-20", "end_date": "2024-05-22"},
    {"id": 4, "project": 1, "name": "Sprint 2", "status": "closed", "has_notes": true,
     "start_date": "2024-05-27", "end_date": "2024-05-29"},
    {"id": 5, "project": 1, "name": "Sprint 3", "status": "open",
     "start_date": "2024-06-03", "end_date": "2024-06-14"}
  ],
  "issues": [
    {"id": 10, "project": 1, "kind": "story", "subject": "Next up", "points": 2,
     "position": 1, "created_on": "2024-06-01", "updated_on": "2024-06-01"},
    {"id": 30, "project": 1, "version": 3, "kind": "story", "subject": "Login", "points": 3,
     "position": 2, "closed": true, "created_on": "2024-05-20", "updated_on": "2024-05-22"},
    {"id": 40, "project": 1, "version": 4, "kind": "story", "subject": "Search", "points": 5,
     "position": 3, "closed": true, "created_on": "2024-05-27", "updated_on": "2024-05-29"},
    {"id": 50, "project": 1, "version": 5, "kind": "story", "subject": "Export", "points": 1,
     "position": 4, "created_on": "2024-06-01", "updated_on": "2024-06-04"}
  ],
  "history": [
    {"issue": 30, "day": "2024-05-20", "sprint": 3, "kind": "story", "points": 3, "estimated_hours": 6},
    {"issue": 30, "day": "2024-05-22", "sprint": 3, "kind": "story", "points": 3, "estimated_hours": 0,
     "closed": true, "accepted": true},
    {"issue": 40, "day": "2024-05-27", "sprint": 4, "kind": "story", "points": 5, "estimated_hours": 10},
    {"issue": 40, "day": "2024-05-29", "sprint": 4, "kind": "story", "points": 5, "estimated_hours": 0,
     "closed": true, "accepted": true}
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

fn health_json(temp: &TempDir, project: &str, today: &str) -> serde_json::Value {
    let output = bl()
        .args(["health", project, "--today", today, "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn healthy_project_scores_full_marks() {
    let temp = init_temp();
    let json = health_json(&temp, "1", "2024-06-05");
    assert_eq!(json["score"], 100);
    assert_eq!(json["failed"], serde_json::json!([]));
    assert_eq!(json["active_sprint"], 5);
    assert_eq!(json["past_sprints"], serde_json::json!([4, 3]));
    assert_eq!(json["values"]["sprints"], 2.0);
    assert_eq!(json["values"]["velocity"], 4.0);
    assert_eq!(json["values"]["velocity_stddev"], 1.0);
    assert_eq!(json["values"]["hours_per_point"], 2.0);
}

#[test]
fn text_report() {
    let temp = init_temp();
    bl().args(["health", "1", "--today", "2024-06-05"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Project 1 health on 2024-06-05: 100%"))
        .stdout(predicate::str::contains("  pass  yield"))
        .stdout(predicate::str::contains("Statistics:"))
        .stdout(predicate::str::contains("no active sprint").not());
}

#[test]
fn no_active_sprint_is_reported_not_scored() {
    let temp = init_temp();
    let json = health_json(&temp, "1", "2024-07-01");
    assert_eq!(json["no_active_sprint"], true);
    assert!(json.get("active_sprint").is_none());
    let passed = json["passed"].as_array().unwrap();
    assert!(!passed.iter().any(|c| c == "active"));
}

#[test]
fn empty_backlog_fails_filled_check() {
    let temp = init_temp();
    let json = health_json(&temp, "2", "2024-06-05");
    assert_eq!(json["failed"], serde_json::json!(["product_backlog_filled"]));
    assert_eq!(json["score"], 80);
}

#[test]
fn disabled_checks_are_skipped() {
    let temp = init_temp();
    let config = temp.path().join(".backlogs/config.toml");
    let mut content = std::fs::read_to_string(&config).unwrap();
    content = content.replace(
        "[backlogs]",
        "[backlogs]\ndisabled_checks = [\"product_backlog_filled\"]",
    );
    std::fs::write(&config, content).unwrap();

    let json = health_json(&temp, "2", "2024-06-05");
    assert_eq!(json["score"], 100);
}

#[test]
fn unknown_project_fails() {
    let temp = init_temp();
    bl().args(["health", "42"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("project not found"));
}
