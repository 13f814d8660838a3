// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bl_core::{Database, ProjectId, ProjectSettings, VersionSet};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::display::format_settings;
use crate::error::Result;

use super::{open_db, Snapshot};

/// Requested changes; `None` leaves a setting as it is.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub ignored: Option<String>,
    pub backlog: Option<String>,
    pub show_subprojects: Option<bool>,
    pub scrum_stats: Option<bool>,
}

impl SettingsUpdate {
    fn is_empty(&self) -> bool {
        self.ignored.is_none()
            && self.backlog.is_none()
            && self.show_subprojects.is_none()
            && self.scrum_stats.is_none()
    }
}

pub fn run(project: i64, update: SettingsUpdate, format: OutputFormat) -> Result<()> {
    let (db, config, _) = open_db()?;
    let settings = run_impl(&db, &config, project, &update)?;
    match format {
        OutputFormat::Text => {
            for line in format_settings(&settings) {
                println!("{line}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&settings)?),
    }
    Ok(())
}

/// Parse a version list, keeping only versions that can be filtered.
fn version_list(snapshot: &Snapshot, config: &Config, project: ProjectId, input: &str) -> Result<VersionSet> {
    let set = VersionSet::parse_list(input)?;
    let filterable = snapshot.resolver(&config.backlogs).filterable_versions(project);
    for id in set.specific() {
        if !filterable.iter().any(|v| v.id == id) {
            return Err(bl_core::Error::validation(
                "version list",
                format!("version {id} is not an open version of project {project}"),
            )
            .into());
        }
    }
    Ok(set)
}

/// Show the settings of `project`, applying `update` first when it has changes.
pub(crate) fn run_impl(
    db: &Database,
    config: &Config,
    project: i64,
    update: &SettingsUpdate,
) -> Result<ProjectSettings> {
    let project = ProjectId(project);
    let mut settings = db.project_settings(project)?;
    if update.is_empty() {
        return Ok(settings);
    }

    let snapshot = Snapshot::load(db)?;
    if let Some(ignored) = &update.ignored {
        settings.ignored_versions = version_list(&snapshot, config, project, ignored)?;
    }
    if let Some(backlog) = &update.backlog {
        settings.backlog_versions = version_list(&snapshot, config, project, backlog)?;
    }
    if let Some(show) = update.show_subprojects {
        settings.show_stories_from_subprojects = show;
    }
    if let Some(stats) = update.scrum_stats {
        settings.show_in_scrum_stats = stats;
    }
    db.save_project_settings(&settings)?;
    tracing::info!(project = %project, "updated settings");
    Ok(settings)
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
