// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod backlog;
pub mod burndown;
pub mod close;
pub mod eta;
pub mod health;
pub mod import;
pub mod init;
pub mod new;
pub mod points;
pub mod rank;
pub mod schema;
pub mod settings;
pub mod sprints;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::path::PathBuf;

use bl_core::{BacklogsConfig, Database, Issue, ProjectTree, ScopeResolver, SettingsIndex, Version};
use chrono::NaiveDate;

use crate::config::{find_work_dir, get_db_path, Config};
use crate::error::{Error, Result};

/// Helper to open the database from the current context.
pub fn open_db() -> Result<(Database, Config, PathBuf)> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;
    let db_path = get_db_path(&work_dir, &config);
    tracing::debug!(path = %db_path.display(), "opening database");
    let db = Database::open(&db_path)?;
    Ok((db, config, work_dir))
}

/// Everything the resolvers read, loaded once per command.
pub struct Snapshot {
    pub tree: ProjectTree,
    pub versions: Vec<Version>,
    pub settings: SettingsIndex,
    pub issues: Vec<Issue>,
}

impl Snapshot {
    pub fn load(db: &Database) -> Result<Self> {
        Ok(Snapshot {
            tree: db.project_tree()?,
            versions: db.versions()?,
            settings: db.settings_index()?,
            issues: db.issues()?,
        })
    }

    pub fn resolver<'a>(&'a self, config: &'a BacklogsConfig) -> ScopeResolver<'a> {
        ScopeResolver::new(&self.tree, &self.versions, &self.settings, config)
    }
}

/// Parse `--today`, defaulting to the local date.
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map_err(|_| Error::InvalidDate(value.to_string())),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
