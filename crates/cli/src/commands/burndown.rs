// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bl_core::burndown::sprint_stories;
use bl_core::{Burndown, Database, Direction, StatusFilter, VersionId};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::display::format_burndown;
use crate::error::{Error, Result};
use crate::schema::BurndownJson;

use super::open_db;

pub fn run(sprint: i64, direction: &str, status: &str, format: OutputFormat) -> Result<()> {
    let (db, config, _) = open_db()?;
    let burndown = run_impl(&db, &config, sprint, direction.parse()?, status.parse()?)?;
    match format {
        OutputFormat::Text => {
            for line in format_burndown(&burndown) {
                println!("{line}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&burndown)?),
    }
    Ok(())
}

/// Replay the history of `sprint` into its day-by-day series.
pub(crate) fn run_impl(
    db: &Database,
    config: &Config,
    sprint: i64,
    direction: Direction,
    status: StatusFilter,
) -> Result<BurndownJson> {
    let version = db.get_version(VersionId(sprint))?;
    let history = db.history_log()?;
    let stories = sprint_stories(version.id, &db.issues()?, &history);

    let burndown = Burndown::build(&version, &stories, &history, status, &config.backlogs)
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "sprint {sprint} has no burndown: it needs a start and an end date"
            ))
        })?
        .with_direction(direction);
    Ok(BurndownJson::new(&burndown, status.as_str()))
}

#[cfg(test)]
#[path = "burndown_tests.rs"]
mod tests;
