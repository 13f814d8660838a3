// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Which sprints and backlogs a project sees.
//!
//! [`ScopeResolver`] borrows an already-loaded snapshot of projects,
//! versions and settings. Every query is a pure read over that snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::config::BacklogsConfig;
use crate::error::{Error, Result};
use crate::id::{ProjectId, VersionId};
use crate::issue::Issue;
use crate::project::ProjectTree;
use crate::ranked::{Backlog, BacklogScope, RankedList, VersionFilter};
use crate::settings::SettingsIndex;
use crate::version::{Version, VersionStatus};
use crate::version_set::VersionSet;

/// Which half of a project's sprints to resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintStatus {
    #[default]
    Open,
    Closed,
}

impl SprintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SprintStatus::Open => "open",
            SprintStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SprintStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(SprintStatus::Open),
            "closed" => Ok(SprintStatus::Closed),
            _ => Err(Error::validation(
                "sprint status",
                format!("'{s}' is not one of: open, closed"),
            )),
        }
    }
}

/// Orders sprints: dated before undated by start, then dated before
/// undated by end. Ids break remaining ties.
pub fn sort_sprints(sprints: &mut [&Version]) {
    sprints.sort_by_key(|v| {
        (
            v.start_date.is_none(),
            v.start_date,
            v.end_date.is_none(),
            v.end_date,
            v.id,
        )
    });
}

/// Sprint and backlog visibility over one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ScopeResolver<'a> {
    tree: &'a ProjectTree,
    versions: &'a [Version],
    settings: &'a SettingsIndex,
    config: &'a BacklogsConfig,
}

impl<'a> ScopeResolver<'a> {
    pub fn new(
        tree: &'a ProjectTree,
        versions: &'a [Version],
        settings: &'a SettingsIndex,
        config: &'a BacklogsConfig,
    ) -> Self {
        ScopeResolver {
            tree,
            versions,
            settings,
            config,
        }
    }

    pub fn config(&self) -> &'a BacklogsConfig {
        self.config
    }

    pub fn tree(&self) -> &'a ProjectTree {
        self.tree
    }

    pub fn version(&self, id: VersionId) -> Result<&'a Version> {
        self.versions
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| Error::VersionNotFound(id.to_string()))
    }

    /// Versions never offered as sprints for `projects`: their ignored
    /// versions plus any non-trivial backlog designation.
    pub fn excluded_versions(&self, projects: &[ProjectId]) -> VersionSet {
        let mut excluded = VersionSet::new();
        for &project in projects {
            let settings = self.settings.settings_for(project);
            if settings.has_ignored_versions() {
                excluded.extend_from(&settings.ignored_versions);
            }
            if settings.has_backlog_versions() {
                excluded.extend_from(&settings.backlog_versions);
            }
        }
        excluded
    }

    /// The project and its descendants, in tree order.
    fn subtree(&self, project: ProjectId) -> Result<Vec<ProjectId>> {
        Ok(self
            .tree
            .self_and_descendants(project)?
            .into_iter()
            .map(|p| p.id)
            .collect())
    }

    fn select<I>(candidates: I, statuses: &[VersionStatus], excluded: &VersionSet) -> Vec<&'a Version>
    where
        I: IntoIterator<Item = &'a Version>,
    {
        let mut sprints: Vec<&'a Version> = candidates
            .into_iter()
            .filter(|v| statuses.contains(&v.status) && !excluded.contains(v.id))
            .collect();
        sort_sprints(&mut sprints);
        sprints
    }

    fn own_sprints(&self, project: ProjectId, status: VersionStatus) -> Result<Vec<&'a Version>> {
        self.tree.project(project)?;
        let excluded = self.excluded_versions(&[project]);
        tracing::debug!(project = %project, excluded = %excluded, status = %status, "resolving own sprints");
        let own = self.versions.iter().filter(|v| v.project == project);
        Ok(Self::select(own, &[status], &excluded))
    }

    /// Open sprints owned by `project`.
    pub fn open_sprints(&self, project: ProjectId) -> Result<Vec<&'a Version>> {
        self.own_sprints(project, VersionStatus::Open)
    }

    /// Closed sprints owned by `project`.
    pub fn closed_sprints(&self, project: ProjectId) -> Result<Vec<&'a Version>> {
        self.own_sprints(project, VersionStatus::Closed)
    }

    /// Every version `project` can see under each version's sharing mode.
    pub fn shared_versions(&self, project: ProjectId) -> Result<Vec<&'a Version>> {
        self.tree.project(project)?;
        let mut visible = Vec::new();
        for version in self.versions {
            if version.is_shared_with(self.tree, project)? {
                visible.push(version);
            }
        }
        Ok(visible)
    }

    fn shared_sprints(&self, project: ProjectId, statuses: &[VersionStatus]) -> Result<Vec<&'a Version>> {
        let excluded = self.excluded_versions(&self.subtree(project)?);
        tracing::debug!(project = %project, excluded = %excluded, "resolving shared sprints");
        let visible = self.shared_versions(project)?;
        Ok(Self::select(visible, statuses, &excluded))
    }

    /// Open and locked sprints visible to `project`; own open sprints when
    /// sharing is off.
    pub fn open_shared_sprints(&self, project: ProjectId) -> Result<Vec<&'a Version>> {
        if self.config.sharing_enabled {
            self.shared_sprints(project, &[VersionStatus::Open, VersionStatus::Locked])
        } else {
            self.open_sprints(project)
        }
    }

    /// Closed sprints visible to `project`, or none when closed sprints are
    /// kept out of master backlogs.
    pub fn closed_shared_sprints(&self, project: ProjectId) -> Result<Vec<&'a Version>> {
        if self.config.disable_closed_sprints_to_master_backlogs {
            self.tree.project(project)?;
            return Ok(Vec::new());
        }
        if self.config.sharing_enabled {
            self.shared_sprints(project, &[VersionStatus::Closed])
        } else {
            self.closed_sprints(project)
        }
    }

    /// The ordered sprints of `project` with the given status.
    pub fn resolve_sprints(&self, project: ProjectId, status: SprintStatus) -> Result<Vec<&'a Version>> {
        match status {
            SprintStatus::Open => self.open_shared_sprints(project),
            SprintStatus::Closed => self.closed_shared_sprints(project),
        }
    }

    /// Projects whose stories appear in `project`'s product backlog.
    pub fn projects_in_shared_product_backlog(&self, project: ProjectId) -> Result<Vec<ProjectId>> {
        self.tree.project(project)?;
        let settings = self.settings.settings_for(project);
        if self.config.sharing_enabled && settings.show_stories_from_subprojects {
            Ok(self
                .tree
                .self_and_descendants(project)?
                .into_iter()
                .filter(|p| p.id == project || p.active)
                .map(|p| p.id)
                .collect())
        } else {
            Ok(vec![project])
        }
    }

    /// The product backlog of `project` as a ranking scope.
    pub fn product_backlog_scope(&self, project: ProjectId) -> Result<BacklogScope> {
        let projects = self.projects_in_shared_product_backlog(project)?;
        let mut designated = VersionSet::new();
        for &p in &projects {
            let settings = self.settings.settings_for(p);
            if settings.has_backlog_versions() {
                designated.extend_from(&settings.backlog_versions);
            }
        }
        let listed: BTreeSet<VersionId> = designated.specific().collect();
        let versions = if listed.is_empty() {
            VersionFilter::Unassigned
        } else if designated.includes_unassigned() {
            VersionFilter::UnassignedOr(listed)
        } else {
            VersionFilter::Only(listed)
        };
        Ok(BacklogScope::Product {
            owner: project,
            projects: projects.into_iter().collect(),
            versions,
        })
    }

    /// The backlog of `sprint` as seen from `project`.
    ///
    /// Without sharing only `project`'s own stories are included.
    pub fn sprint_backlog_scope(&self, sprint: VersionId, project: ProjectId) -> BacklogScope {
        BacklogScope::Sprint {
            sprint,
            project: (!self.config.sharing_enabled).then_some(project),
        }
    }

    /// The scope a story is ranked in when viewed from `project`.
    pub fn scope_of(&self, story: &Issue, project: ProjectId) -> Result<BacklogScope> {
        match story.version {
            Some(sprint) => {
                let scope = self.sprint_backlog_scope(sprint, project);
                if scope.contains(story) {
                    return Ok(scope);
                }
                self.product_backlog_scope(project)
            }
            None => self.product_backlog_scope(project),
        }
    }

    /// The ranked product backlog of `project`, optionally truncated.
    pub fn product_backlog(&self, project: ProjectId, issues: &[Issue], limit: Option<usize>) -> Result<Backlog> {
        Ok(RankedList::fetch_ordered(
            self.product_backlog_scope(project)?,
            issues,
            limit,
        ))
    }

    /// The ranked backlog of `sprint` as seen from `project`.
    pub fn sprint_backlog(&self, sprint: VersionId, project: ProjectId, issues: &[Issue]) -> Backlog {
        RankedList::fetch_ordered(self.sprint_backlog_scope(sprint, project), issues, None)
    }

    /// One ranked backlog per sprint, in the order given.
    pub fn backlogs_by_sprint(&self, project: ProjectId, sprints: &[&Version], issues: &[Issue]) -> Vec<Backlog> {
        sprints
            .iter()
            .map(|sprint| self.sprint_backlog(sprint.id, project, issues))
            .collect()
    }

    /// Open versions of `project` that can be listed in its settings.
    pub fn filterable_versions(&self, project: ProjectId) -> Vec<&'a Version> {
        self.versions
            .iter()
            .filter(|v| v.project == project && v.status == VersionStatus::Open)
            .collect()
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
