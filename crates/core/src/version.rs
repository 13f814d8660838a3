// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Versions, which double as sprints when they carry a date range.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::BacklogsConfig;
use crate::error::{Error, Result};
use crate::id::{ProjectId, VersionId};
use crate::project::ProjectTree;

/// Lifecycle state of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    Open,
    /// Open for viewing but no longer accepting new items.
    Locked,
    Closed,
}

impl VersionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionStatus::Open => "open",
            VersionStatus::Locked => "locked",
            VersionStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VersionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(VersionStatus::Open),
            "locked" => Ok(VersionStatus::Locked),
            "closed" => Ok(VersionStatus::Closed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// Which other projects can see a version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sharing {
    /// Only the owning project.
    #[default]
    None,
    /// The owning project and its descendants.
    Descendants,
    /// Ancestors and descendants of the owning project.
    Hierarchy,
    /// Every project sharing the owning project's root.
    Tree,
    /// Every active project.
    System,
}

impl Sharing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sharing::None => "none",
            Sharing::Descendants => "descendants",
            Sharing::Hierarchy => "hierarchy",
            Sharing::Tree => "tree",
            Sharing::System => "system",
        }
    }
}

impl fmt::Display for Sharing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sharing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Sharing::None),
            "descendants" => Ok(Sharing::Descendants),
            "hierarchy" => Ok(Sharing::Hierarchy),
            "tree" => Ok(Sharing::Tree),
            "system" => Ok(Sharing::System),
            _ => Err(Error::InvalidSharing(s.to_string())),
        }
    }
}

/// A version of a project. With a date range it is a sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub id: VersionId,
    pub project: ProjectId,
    pub name: String,
    pub status: VersionStatus,
    #[serde(default)]
    pub sharing: Sharing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Whether the sprint's notes page exists and differs from the template.
    #[serde(default)]
    pub has_notes: bool,
}

impl Version {
    /// Creates an open, undated, unshared version.
    pub fn new(id: i64, project: i64, name: &str) -> Self {
        Version {
            id: VersionId(id),
            project: ProjectId(project),
            name: name.to_string(),
            status: VersionStatus::Open,
            sharing: Sharing::None,
            start_date: None,
            end_date: None,
            has_notes: false,
        }
    }

    /// Sets the status (builder pattern).
    pub fn with_status(mut self, status: VersionStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the sharing mode (builder pattern).
    pub fn with_sharing(mut self, sharing: Sharing) -> Self {
        self.sharing = sharing;
        self
    }

    /// Sets the date range (builder pattern).
    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Rejects a sprint that ends before it starts.
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(Error::validation(
                    "sprint dates",
                    format!("sprint {} ends ({end}) before it starts ({start})", self.id),
                ));
            }
        }
        Ok(())
    }

    /// A burndown needs both dates in order.
    pub fn has_burndown(&self) -> bool {
        matches!((self.start_date, self.end_date), (Some(s), Some(e)) if s <= e)
    }

    /// True when `day` lies within the sprint's date range.
    pub fn covers(&self, day: NaiveDate) -> bool {
        matches!((self.start_date, self.end_date), (Some(s), Some(e)) if s <= day && day <= e)
    }

    /// The sprint's working days; empty without a valid date range.
    pub fn days(&self, config: &BacklogsConfig) -> Vec<NaiveDate> {
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Vec::new();
        };
        start
            .iter_days()
            .take_while(|day| *day <= end)
            .filter(|day| !config.skip_weekends || !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
            .collect()
    }

    /// Whether `project` can see this version under its sharing mode.
    pub fn is_shared_with(&self, tree: &ProjectTree, project: ProjectId) -> Result<bool> {
        if self.project == project {
            return Ok(true);
        }
        let owner = tree.project(self.project)?;
        if !owner.active {
            return Ok(false);
        }
        Ok(match self.sharing {
            Sharing::None => false,
            Sharing::System => true,
            Sharing::Tree => tree.root_of(self.project)? == tree.root_of(project)?,
            Sharing::Hierarchy => {
                tree.is_ancestor(self.project, project)? || tree.is_ancestor(project, self.project)?
            }
            Sharing::Descendants => tree.is_ancestor(self.project, project)?,
        })
    }
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
