// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bl_core::{Database, HealthInput, HealthReport, HealthStatistics, ProjectId};
use chrono::NaiveDate;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::display::format_health;
use crate::error::Result;
use crate::schema::HealthJson;

use super::{open_db, resolve_today, Snapshot};

/// Top of the product backlog the backlog checks look at.
pub const BACKLOG_SAMPLE: usize = 10;

pub fn run(project: i64, today: Option<&str>, format: OutputFormat) -> Result<()> {
    let (db, config, _) = open_db()?;
    let today = resolve_today(today)?;
    let report = run_impl(&db, &config, project, today)?;
    let health = HealthJson::new(project, today, &report);
    match format {
        OutputFormat::Text => {
            for line in format_health(&health) {
                println!("{line}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&health)?),
    }
    Ok(())
}

/// Compute the health report of `project` as of `today`.
pub(crate) fn run_impl(db: &Database, config: &Config, project: i64, today: NaiveDate) -> Result<HealthReport> {
    let snapshot = Snapshot::load(db)?;
    let resolver = snapshot.resolver(&config.backlogs);
    let project = snapshot.tree.project(ProjectId(project))?;
    let product_backlog = resolver.product_backlog(project.id, &snapshot.issues, Some(BACKLOG_SAMPLE))?;
    let history = db.history_log()?;

    let input = HealthInput {
        project,
        today,
        versions: &snapshot.versions,
        product_backlog: &product_backlog,
        issues: &snapshot.issues,
        history: &history,
    };
    Ok(HealthStatistics::compute(&input, &config.backlogs))
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
