// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-project backlog settings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::id::ProjectId;
use crate::version_set::VersionSet;

/// Backlog settings of one project.
///
/// A missing row behaves exactly like [`ProjectSettings::new`]: nothing
/// ignored and only unassigned items in the backlog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    pub project: ProjectId,
    /// Versions never offered as sprints.
    #[serde(default)]
    pub ignored_versions: VersionSet,
    /// Versions treated as the product backlog; `0` means unassigned items.
    #[serde(default = "VersionSet::unassigned")]
    pub backlog_versions: VersionSet,
    #[serde(default)]
    pub show_stories_from_subprojects: bool,
    #[serde(default)]
    pub show_in_scrum_stats: bool,
}

impl ProjectSettings {
    pub fn new(project: ProjectId) -> Self {
        ProjectSettings {
            project,
            ignored_versions: VersionSet::new(),
            backlog_versions: VersionSet::unassigned(),
            show_stories_from_subprojects: false,
            show_in_scrum_stats: false,
        }
    }

    /// Replaces the ignored versions from raw ids, validating them first.
    pub fn set_ignored_versions(&mut self, ids: &[i64]) -> Result<()> {
        self.ignored_versions = VersionSet::from_ids(ids.iter().copied())?;
        Ok(())
    }

    /// Replaces the backlog versions from raw ids, validating them first.
    pub fn set_backlog_versions(&mut self, ids: &[i64]) -> Result<()> {
        self.backlog_versions = VersionSet::from_ids(ids.iter().copied())?;
        Ok(())
    }

    /// True when some versions are configured to be ignored.
    pub fn has_ignored_versions(&self) -> bool {
        !self.ignored_versions.is_empty()
    }

    /// True when specific versions stand in for the backlog, i.e. the
    /// designation is neither empty nor exactly `{0}`.
    pub fn has_backlog_versions(&self) -> bool {
        !self.backlog_versions.is_empty() && !self.backlog_versions.is_only_unassigned()
    }
}

/// Settings rows keyed by project; absent rows mean defaults.
#[derive(Debug, Clone, Default)]
pub struct SettingsIndex {
    rows: HashMap<ProjectId, ProjectSettings>,
}

impl SettingsIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, settings: ProjectSettings) {
        self.rows.insert(settings.project, settings);
    }

    pub fn get(&self, project: ProjectId) -> Option<&ProjectSettings> {
        self.rows.get(&project)
    }

    /// Stored settings, or defaults when the row does not exist.
    pub fn settings_for(&self, project: ProjectId) -> ProjectSettings {
        self.get(project)
            .cloned()
            .unwrap_or_else(|| ProjectSettings::new(project))
    }
}

impl FromIterator<ProjectSettings> for SettingsIndex {
    fn from_iter<T: IntoIterator<Item = ProjectSettings>>(iter: T) -> Self {
        let mut index = SettingsIndex::new();
        for settings in iter {
            index.insert(settings);
        }
        index
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
