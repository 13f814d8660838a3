// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `bl init` and `bl import`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bl() -> Command {
    cargo_bin_cmd!("bl")
}

#[test]
fn creates_backlogs_directory() {
    let temp = TempDir::new().unwrap();
    bl().arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized backlogs"));

    assert!(temp.path().join(".backlogs/config.toml").exists());
    assert!(temp.path().join(".backlogs/backlogs.db").exists());
    let gitignore = std::fs::read_to_string(temp.path().join(".backlogs/.gitignore")).unwrap();
    assert!(gitignore.contains("backlogs.db"));
}

#[test]
fn fails_if_already_initialized() {
    let temp = TempDir::new().unwrap();
    bl().arg("init").current_dir(temp.path()).assert().success();
    bl().arg("init")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn path_option_initializes_elsewhere() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("nested");
    std::fs::create_dir_all(&target).unwrap();
    bl().arg("init")
        .arg("--path")
        .arg(&target)
        .current_dir(temp.path())
        .assert()
        .success();
    assert!(target.join(".backlogs/config.toml").exists());
    assert!(!temp.path().join(".backlogs").exists());
}

#[test]
fn sharing_is_written_to_config() {
    let temp = TempDir::new().unwrap();
    bl().arg("init")
        .arg("--sharing")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Sharing: enabled"));
    let config = std::fs::read_to_string(temp.path().join(".backlogs/config.toml")).unwrap();
    assert!(config.contains("sharing_enabled = true"));
}

#[test]
fn commands_found_from_subdirectory() {
    let temp = TempDir::new().unwrap();
    bl().arg("init").current_dir(temp.path()).assert().success();
    std::fs::write(
        temp.path().join("data.json"),
        r#"{"projects": [{"id": 1, "name": "product"}]}"#,
    )
    .unwrap();
    bl().args(["import", "data.json"]).current_dir(temp.path()).assert().success();

    let sub = temp.path().join("src/deep");
    std::fs::create_dir_all(&sub).unwrap();
    bl().args(["backlog", "1"])
        .current_dir(&sub)
        .assert()
        .success()
        .stdout(predicate::str::contains("Product backlog (project 1)"));
}

#[test]
fn commands_fail_without_init() {
    let temp = TempDir::new().unwrap();
    bl().args(["backlog", "1"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn import_reports_counts() {
    let temp = TempDir::new().unwrap();
    bl().arg("init").current_dir(temp.path()).assert().success();
    std::fs::write(
        temp.path().join("data.json"),
        r#"{
  "projects": [{"id": 1, "name": "product"}],
  "versions": [{"id": 5, "project": 1, "name": "Sprint 1", "status": "open",
                "start_date": "2024-06-03", "end_date": "2024-06-14"}],
  "issues": [{"id": 10, "project": 1, "kind": "story", "subject": "Login",
              "points": 3, "position": 1,
              "created_on": "2024-06-01", "updated_on": "2024-06-01"}]
}"#,
    )
    .unwrap();
    bl().args(["import", "data.json"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Imported 1 projects, 1 versions, 1 items, 0 settings, 0 history records",
        ));
}

#[test]
fn import_rejects_unknown_fields() {
    let temp = TempDir::new().unwrap();
    bl().arg("init").current_dir(temp.path()).assert().success();
    std::fs::write(temp.path().join("data.json"), r#"{"people": []}"#).unwrap();
    bl().args(["import", "data.json"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: "));
}

#[test]
fn import_rejects_inverted_sprint_dates() {
    let temp = TempDir::new().unwrap();
    bl().arg("init").current_dir(temp.path()).assert().success();
    std::fs::write(
        temp.path().join("data.json"),
        r#"{
  "projects": [{"id": 1, "name": "product"}],
  "versions": [{"id": 5, "project": 1, "name": "Backwards", "status": "open",
                "start_date": "2024-06-14", "end_date": "2024-06-03"}]
}"#,
    )
    .unwrap();
    bl().args(["import", "data.json"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("sprint dates"));

    // nothing from the failed import was kept
    bl().args(["backlog", "1"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("project not found"));
}
