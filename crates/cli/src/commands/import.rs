// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bulk load of a JSON dataset.
//!
//! ```json
//! {
//!   "projects": [{"id": 1, "name": "product"}],
//!   "versions": [{"id": 5, "project": 1, "name": "Sprint 1", "status": "open",
//!                 "start_date": "2024-06-03", "end_date": "2024-06-14"}],
//!   "issues":   [{"id": 10, "project": 1, "kind": "story", "subject": "Login",
//!                 "points": 3, "position": 1,
//!                 "created_on": "2024-06-01", "updated_on": "2024-06-01"}],
//!   "settings": [{"project": 1, "backlog_versions": [0, 9]}],
//!   "history":  [{"issue": 10, "day": "2024-06-03", "sprint": 5, "kind": "story",
//!                 "points": 3, "estimated_hours": 6}]
//! }
//! ```
//!
//! Every section is optional. The whole file is loaded in one transaction.

use std::collections::HashSet;

use bl_core::{
    Database, HistoryEvent, Issue, Project, ProjectId, ProjectSettings, ProjectTree, Version,
};
use serde::Deserialize;

use crate::error::Result;

use super::open_db;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Dataset {
    pub projects: Vec<Project>,
    pub versions: Vec<Version>,
    pub issues: Vec<Issue>,
    pub settings: Vec<ProjectSettings>,
    pub history: Vec<HistoryEvent>,
}

/// Row counts of an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub projects: usize,
    pub versions: usize,
    pub issues: usize,
    pub settings: usize,
    pub history: usize,
}

pub fn run(file: &str) -> Result<()> {
    let (db, _, _) = open_db()?;
    let content = std::fs::read_to_string(file)?;
    let dataset: Dataset = serde_json::from_str(&content)?;
    let summary = run_impl(&db, dataset)?;
    println!(
        "Imported {} projects, {} versions, {} items, {} settings, {} history records",
        summary.projects, summary.versions, summary.issues, summary.settings, summary.history
    );
    Ok(())
}

/// Insert a dataset in dependency order; nothing is kept if any row fails.
pub(crate) fn run_impl(db: &Database, dataset: Dataset) -> Result<ImportSummary> {
    let Dataset {
        projects,
        versions,
        mut issues,
        settings,
        history,
    } = dataset;

    let tx = db.conn.unchecked_transaction()?;

    // Validated together with stored projects; pre-order puts parents first.
    let imported: HashSet<ProjectId> = projects.iter().map(|p| p.id).collect();
    let mut all: Vec<Project> = db.project_tree()?.iter().cloned().collect();
    all.extend(projects);
    let tree = ProjectTree::new(all)?;
    for project in tree.iter().filter(|p| imported.contains(&p.id)) {
        db.insert_project(project)?;
    }
    for version in &versions {
        db.insert_version(version)?;
    }
    // Stories before the tasks that reference them.
    issues.sort_by_key(|issue| (issue.parent.is_some(), issue.id));
    for issue in &issues {
        db.insert_issue(issue)?;
    }
    for row in &settings {
        db.save_project_settings(row)?;
    }
    for event in &history {
        db.insert_history(event)?;
    }

    tx.commit()?;
    let summary = ImportSummary {
        projects: imported.len(),
        versions: versions.len(),
        issues: issues.len(),
        settings: settings.len(),
        history: history.len(),
    };
    tracing::info!(?summary, "imported dataset");
    Ok(summary)
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
