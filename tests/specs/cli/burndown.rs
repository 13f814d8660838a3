// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `bl burndown` and `bl eta`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use yare::parameterized;

/// Sprint 5 runs Monday 3 to Wednesday 5 June. Story 10 is accepted on the
/// last day; story 11 moves to sprint 6 on the second day.
const DATASET: &str = r#"{
  "projects": [{"id": 1, "name": "product"}],
  "versions": [
    {"id": 5, "project": 1, "name": "Sprint 1", "status": "closed",
     "start_date": "2024-06-03", "end_date": "2024-06-05"},
    {"id": 6, "project": 1, "name": "Sprint 2", "status": "open",
     "start_date": "2024-06-06", "end_date": "2024-06-12"},
    {"id": 7, "project": 1, "name": "Someday", "status": "open"}
  ],
  "issues": [
    {"id": 10, "project": 1, "version": 5, "kind": "story", "subject": "Login",
     "points": 3, "position": 1, "closed": true,
     "created_on": "2024-06-01", "updated_on": "2024-06-05"},
    {"id": 11, "project": 1, "version": 6, "kind": "story", "subject": "Search",
     "points": 2, "position": 2, "created_on": "2024-06-01", "updated_on": "2024-06-04"}
  ],
  "history": [
    {"issue": 10, "day": "2024-06-03", "sprint": 5, "kind": "story", "points": 3, "estimated_hours": 8},
    {"issue": 10, "day": "2024-06-04", "sprint": 5, "kind": "story", "points": 3, "estimated_hours": 4},
    {"issue": 10, "day": "2024-06-05", "sprint": 5, "kind": "story", "points": 3, "estimated_hours": 0,
     "closed": true, "accepted": true},
    {"issue": 11, "day": "2024-06-03", "sprint": 5, "kind": "story", "points": 2, "estimated_hours": 5},
    {"issue": 11, "day": "2024-06-04", "sprint": 6, "kind": "story", "points": 2, "estimated_hours": 5}
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

fn burndown_json(temp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = bl()
        .arg("burndown")
        .args(args)
        .args(["-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn burndown_table() {
    let temp = init_temp();
    let output = bl()
        .args(["burndown", "5"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    similar_asserts::assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "day         committed  accepted  resolved     hours\n\
         2024-06-03          5         0         0        13\n\
         2024-06-04          3         0         0         4\n\
         2024-06-05          3         3         3         0\n"
    );
}

#[test]
fn burndown_json_series() {
    let temp = init_temp();
    let json = burndown_json(&temp, &["5"]);
    assert_eq!(json["direction"], "down");
    assert_eq!(json["status"], "any");
    assert_eq!(json["days"], serde_json::json!(["2024-06-03", "2024-06-04", "2024-06-05"]));
    assert_eq!(json["points_committed"], serde_json::json!([5.0, 3.0, 3.0]));
    assert_eq!(json["hours_remaining"], serde_json::json!([13.0, 4.0, 0.0]));
}

#[test]
fn burndown_up_shows_burned_hours() {
    let temp = init_temp();
    let json = burndown_json(&temp, &["5", "--direction", "up"]);
    assert_eq!(json["hours_remaining"], serde_json::json!([0.0, 9.0, 13.0]));

    bl().args(["burndown", "5", "--direction", "up"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("burned"));
}

#[parameterized(
    open = { "open", serde_json::json!([5.0, 3.0, null]) },
    closed = { "closed", serde_json::json!([null, null, 3.0]) },
)]
fn burndown_status_filter(status: &str, committed: serde_json::Value) {
    let temp = init_temp();
    let json = burndown_json(&temp, &["5", "--status", status]);
    assert_eq!(json["points_committed"], committed);
}

#[test]
fn story_moved_between_sprints_counts_in_both() {
    let temp = init_temp();
    let json = burndown_json(&temp, &["6"]);
    assert_eq!(json["points_committed"][0], 2.0);
}

#[parameterized(
    direction = { &["5", "--direction", "sideways"], "invalid direction" },
    status = { &["5", "--status", "done"], "invalid status filter" },
    undated = { &["7"], "has no burndown" },
    unknown = { &["99"], "version not found" },
)]
fn burndown_errors(args: &[&str], message: &str) {
    let temp = init_temp();
    bl().arg("burndown")
        .args(args)
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(message));
}

#[test]
fn eta_from_past_pace() {
    let temp = init_temp();
    let output = bl()
        .args(["eta", "6", "--today", "2024-06-07", "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // sprint 5 started with stories 10 and 11, 5 points over 3 days
    assert_eq!(json["points"], 2.0);
    assert!((json["days_per_point"].as_f64().unwrap() - 0.6).abs() < 1e-9);
    assert_eq!(json["eta"], "2024-06-07");
}

#[test]
fn eta_without_history() {
    let temp = init_temp();
    bl().args(["eta", "6", "--today", "2024-06-04"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no estimate"));
}

#[test]
fn eta_rejects_bad_date() {
    let temp = init_temp();
    bl().args(["eta", "6", "--today", "June 7"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));
}
