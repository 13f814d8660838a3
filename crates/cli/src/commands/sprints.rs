// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bl_core::{Database, ProjectId, SprintStatus};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::display::format_sprint_line;
use crate::error::Result;
use crate::schema::{SprintJson, SprintsJson};

use super::{open_db, Snapshot};

pub fn run(project: i64, closed: bool, format: OutputFormat) -> Result<()> {
    let (db, config, _) = open_db()?;
    let status = if closed {
        SprintStatus::Closed
    } else {
        SprintStatus::Open
    };
    let sprints = run_impl(&db, &config, project, status)?;
    match format {
        OutputFormat::Text => {
            if sprints.sprints.is_empty() {
                println!("No {status} sprints for project {project}");
            }
            for sprint in &sprints.sprints {
                println!("{}", format_sprint_line(sprint));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&sprints)?),
    }
    Ok(())
}

/// The ordered sprints `project` sees, each with its committed points.
pub(crate) fn run_impl(db: &Database, config: &Config, project: i64, status: SprintStatus) -> Result<SprintsJson> {
    let snapshot = Snapshot::load(db)?;
    let resolver = snapshot.resolver(&config.backlogs);
    let project_id = ProjectId(project);

    let sprints = resolver.resolve_sprints(project_id, status)?;
    let backlogs = resolver.backlogs_by_sprint(project_id, &sprints, &snapshot.issues);
    Ok(SprintsJson {
        project,
        status: status.as_str().to_string(),
        sprints: sprints
            .iter()
            .zip(&backlogs)
            .map(|(sprint, backlog)| SprintJson::new(sprint, backlog.points()))
            .collect(),
    })
}

#[cfg(test)]
#[path = "sprints_tests.rs"]
mod tests;
