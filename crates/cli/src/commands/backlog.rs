// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bl_core::{Database, ProjectId, RankedList, VersionId};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::display::format_backlog;
use crate::error::Result;
use crate::schema::BacklogJson;

use super::{open_db, Snapshot};

pub fn run(project: i64, sprint: Option<i64>, limit: Option<usize>, format: OutputFormat) -> Result<()> {
    let (db, config, _) = open_db()?;
    let backlog = run_impl(&db, &config, project, sprint, limit)?;
    match format {
        OutputFormat::Text => {
            for line in format_backlog(&backlog) {
                println!("{line}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&backlog)?),
    }
    Ok(())
}

/// The product backlog of `project`, or the backlog of `sprint` as seen from it.
pub(crate) fn run_impl(
    db: &Database,
    config: &Config,
    project: i64,
    sprint: Option<i64>,
    limit: Option<usize>,
) -> Result<BacklogJson> {
    let snapshot = Snapshot::load(db)?;
    let resolver = snapshot.resolver(&config.backlogs);
    let project_id = ProjectId(project);
    resolver.tree().project(project_id)?;

    let backlog = match sprint {
        Some(sprint) => {
            let sprint_id = resolver.version(VersionId(sprint))?.id;
            let scope = resolver.sprint_backlog_scope(sprint_id, project_id);
            RankedList::fetch_ordered(scope, &snapshot.issues, limit)
        }
        None => resolver.product_backlog(project_id, &snapshot.issues, limit)?,
    };
    Ok(BacklogJson::new(project, sprint, &backlog))
}

#[cfg(test)]
#[path = "backlog_tests.rs"]
mod tests;
