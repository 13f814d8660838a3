// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the backlog commands: `backlog`, `move`, `new`, `points`, `close`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use yare::parameterized;

const DATASET: &str = r#"{
  "projects": [
    {"id": 1, "name": "product"},
    {"id": 2, "name": "web", "parent": 1}
  ],
  "versions": [
    {"id": 5, "project": 1, "name": "Sprint 1", "status": "open",
     "start_date": "2024-06-03", "end_date": "2024-06-14"}
  ],
  "issues": [
    {"id": 10, "project": 1, "kind": "story", "subject": "Login", "points": 3,
     "position": 1, "created_on": "2024-06-01", "updated_on": "2024-06-01"},
    {"id": 11, "project": 1, "kind": "story", "subject": "Logout", "points": "s",
     "position": 2, "created_on": "2024-06-01", "updated_on": "2024-06-01"},
    {"id": 12, "project": 1, "kind": "story", "subject": "Profile",
     "position": 3, "created_on": "2024-06-01", "updated_on": "2024-06-01"},
    {"id": 20, "project": 1, "version": 5, "kind": "story", "subject": "Search",
     "points": 5, "position": 4, "created_on": "2024-06-01", "updated_on": "2024-06-01"},
    {"id": 21, "project": 1, "kind": "task", "subject": "Index", "parent": 20,
     "version": 5, "estimated_hours": 4, "position": 5,
     "created_on": "2024-06-01", "updated_on": "2024-06-01"},
    {"id": 30, "project": 2, "kind": "story", "subject": "Landing page",
     "position": 6, "created_on": "2024-06-01", "updated_on": "2024-06-01"}
  ]
}"#;

fn bl() -> Command {
    cargo_bin_cmd!("bl")
}

fn init_with(dataset: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    bl().arg("init").current_dir(temp.path()).assert().success();
    std::fs::write(temp.path().join("data.json"), dataset).unwrap();
    bl().args(["import", "data.json"])
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

fn backlog_ids(temp: &TempDir, args: &[&str]) -> Vec<i64> {
    let output = bl()
        .arg("backlog")
        .args(args)
        .args(["-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["stories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect()
}

#[test]
fn product_backlog_text() {
    let temp = init_with(DATASET);
    let output = bl()
        .args(["backlog", "1"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    similar_asserts::assert_eq!(
        stdout,
        "Product backlog (project 1): 3 stories, 3 points\n  1. #10 [3] Login\n  2. #11 [S] Logout\n  3. #12 [-] Profile\n"
    );
}

#[test]
fn product_backlog_json_links_neighbours() {
    let temp = init_with(DATASET);
    let output = bl()
        .args(["backlog", "1", "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let middle = &json["stories"][1];
    assert_eq!(middle["rank"], 2);
    assert_eq!(middle["previous"], 10);
    assert_eq!(middle["next"], 12);
    assert_eq!(middle["points_display"], "S");
    assert!(json["stories"][0].get("previous").is_none());
}

#[test]
fn limit_truncates_after_ranking() {
    let temp = init_with(DATASET);
    assert_eq!(backlog_ids(&temp, &["1", "-n", "2"]), vec![10, 11]);
}

#[test]
fn sprint_backlog_lists_stories_only() {
    let temp = init_with(DATASET);
    assert_eq!(backlog_ids(&temp, &["1", "--sprint", "5"]), vec![20]);
}

#[parameterized(
    top = { &["--top"], vec![12, 10, 11] },
    bottom = { &["--bottom"], vec![10, 11, 12] },
    before = { &["--before", "11"], vec![10, 12, 11] },
    after = { &["--after", "10"], vec![10, 12, 11] },
)]
fn move_story(flags: &[&str], expected: Vec<i64>) {
    let temp = init_with(DATASET);
    bl().args(["move", "12", "-p", "1"])
        .args(flags)
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Moved #12 to rank"));
    assert_eq!(backlog_ids(&temp, &["1"]), expected);
}

#[test]
fn move_relative_to_other_backlog_fails() {
    let temp = init_with(DATASET);
    bl().args(["move", "12", "-p", "1", "--after", "20"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid pivot"));
    assert_eq!(backlog_ids(&temp, &["1"]), vec![10, 11, 12]);
}

#[test]
fn move_requires_placement() {
    let temp = init_with(DATASET);
    bl().args(["move", "12", "-p", "1"])
        .current_dir(temp.path())
        .assert()
        .failure();
}

#[parameterized(
    appended = { &[], vec![10, 11, 12, 31] },
    top = { &["--prev", ""], vec![31, 10, 11, 12] },
    after = { &["--prev", "10"], vec![10, 31, 11, 12] },
    before = { &["--next", "12"], vec![10, 11, 31, 12] },
)]
fn new_story_placement(flags: &[&str], expected: Vec<i64>) {
    let temp = init_with(DATASET);
    bl().args(["new", "1", "Settings page"])
        .args(flags)
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Created #31"));
    assert_eq!(backlog_ids(&temp, &["1"]), expected);
}

#[test]
fn new_story_into_sprint() {
    let temp = init_with(DATASET);
    bl().args(["new", "1", "Filters", "--sprint", "5", "--points", "2", "--prev", ""])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created #31 at rank 1"));
    assert_eq!(backlog_ids(&temp, &["1", "--sprint", "5"]), vec![31, 20]);
    assert_eq!(backlog_ids(&temp, &["1"]), vec![10, 11, 12]);
}

#[parameterized(
    number = { "8", "[8] Profile" },
    small = { "s", "[S] Profile" },
    unknown = { "?", "[?] Profile" },
)]
fn points_are_shown(value: &str, line: &str) {
    let temp = init_with(DATASET);
    bl().args(["points", "12", value])
        .current_dir(temp.path())
        .assert()
        .success();
    bl().args(["backlog", "1"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(line));
}

#[test]
fn invalid_points_fail_with_hint() {
    let temp = init_with(DATASET);
    bl().args(["points", "12", "lots"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid story points"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn closed_stories_leave_the_backlog() {
    let temp = init_with(DATASET);
    bl().args(["close", "11"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Closed #11"));
    assert_eq!(backlog_ids(&temp, &["1"]), vec![10, 12]);
}

#[test]
fn story_follows_its_last_task() {
    let temp = init_with(DATASET);
    let config = temp.path().join(".backlogs/config.toml");
    let content = std::fs::read_to_string(&config).unwrap();
    std::fs::write(
        &config,
        content.replace("story_follow_task_status = \"off\"", "story_follow_task_status = \"close\""),
    )
    .unwrap();

    bl().args(["close", "21"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Closed #21"))
        .stdout(predicate::str::contains("Closed #20"));
    assert!(backlog_ids(&temp, &["1", "--sprint", "5"]).is_empty());
}

#[test]
fn subproject_stories_shared_when_enabled() {
    let temp = TempDir::new().unwrap();
    bl().args(["init", "--sharing"]).current_dir(temp.path()).assert().success();
    std::fs::write(temp.path().join("data.json"), DATASET).unwrap();
    bl().args(["import", "data.json"]).current_dir(temp.path()).assert().success();

    assert_eq!(backlog_ids(&temp, &["1"]), vec![10, 11, 12]);
    bl().args(["settings", "1", "--show-subprojects", "true"])
        .current_dir(temp.path())
        .assert()
        .success();
    assert_eq!(backlog_ids(&temp, &["1"]), vec![10, 11, 12, 30]);
}
