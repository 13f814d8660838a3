// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backlog items: stories and their tasks.
//!
//! This module contains [`Issue`], [`ItemKind`] and [`StoryPoints`],
//! including the parse and display rules for story points.

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{BacklogsConfig, FollowTaskStatus};
use crate::error::{Error, Result};
use crate::id::{IssueId, ProjectId, VersionId};

/// Whether an item is ranked on a backlog or hangs off a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A sizeable unit of work, ranked in a backlog.
    Story,
    /// Work under a story, estimated in hours.
    Task,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Story => "story",
            ItemKind::Task => "task",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "story" => Ok(ItemKind::Story),
            "task" => Ok(ItemKind::Task),
            _ => Err(Error::InvalidItemKind(s.to_string())),
        }
    }
}

/// Size of a story.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum StoryPoints {
    /// Not sized yet.
    #[default]
    Unset,
    /// Sized, but the size is not known (`?`).
    Unknown,
    /// A non-negative size; `0` is displayed as `S` (small).
    Points(f64),
}

impl StoryPoints {
    /// Numeric contribution to sums; unset and unknown count as zero.
    pub fn value(&self) -> f64 {
        match self {
            StoryPoints::Points(p) => *p,
            StoryPoints::Unset | StoryPoints::Unknown => 0.0,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, StoryPoints::Unset)
    }

    /// Display form, using `not_sized` for unset points.
    pub fn display(&self, not_sized: &str) -> String {
        match self {
            StoryPoints::Unset => not_sized.to_string(),
            StoryPoints::Unknown => "?".to_string(),
            StoryPoints::Points(p) if *p == 0.0 => "S".to_string(),
            StoryPoints::Points(p) => format_number(*p),
        }
    }
}

/// Formats a float without a trailing `.0` for whole numbers.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

impl fmt::Display for StoryPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display("-"))
    }
}

impl FromStr for StoryPoints {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed {
            "" | "-" => Ok(StoryPoints::Unset),
            "?" => Ok(StoryPoints::Unknown),
            "s" | "S" => Ok(StoryPoints::Points(0.0)),
            _ => match trimmed.parse::<f64>() {
                Ok(p) if p.is_finite() && p >= 0.0 => Ok(StoryPoints::Points(p)),
                _ => Err(Error::InvalidPoints(s.to_string())),
            },
        }
    }
}

impl Serialize for StoryPoints {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            StoryPoints::Unset => serializer.serialize_none(),
            StoryPoints::Unknown => serializer.serialize_str("?"),
            StoryPoints::Points(p) => serializer.serialize_f64(*p),
        }
    }
}

impl<'de> Deserialize<'de> for StoryPoints {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(StoryPoints::Unset),
            Some(Raw::Number(p)) if p.is_finite() && p >= 0.0 => Ok(StoryPoints::Points(p)),
            Some(Raw::Number(p)) => Err(de::Error::custom(Error::InvalidPoints(p.to_string()))),
            Some(Raw::Text(s)) => s.parse().map_err(de::Error::custom),
        }
    }
}

/// A story or task as supplied by the issue-tracking subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub project: ProjectId,
    /// Assigned version; `None` for the generic backlog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionId>,
    pub kind: ItemKind,
    pub subject: String,
    #[serde(default)]
    pub points: StoryPoints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    /// Stored ordering key; ranks are derived from it on read.
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<IssueId>,
    pub created_on: NaiveDate,
    pub updated_on: NaiveDate,
}

impl Issue {
    /// Creates an open story with no version, points or position.
    pub fn story(id: i64, project: i64, subject: &str, created_on: NaiveDate) -> Self {
        Issue {
            id: IssueId(id),
            project: ProjectId(project),
            version: None,
            kind: ItemKind::Story,
            subject: subject.to_string(),
            points: StoryPoints::Unset,
            estimated_hours: None,
            position: 0,
            closed: false,
            parent: None,
            created_on,
            updated_on: created_on,
        }
    }

    /// Creates an open task under `parent`.
    pub fn task(id: i64, parent: &Issue, subject: &str, created_on: NaiveDate) -> Self {
        Issue {
            kind: ItemKind::Task,
            parent: Some(parent.id),
            version: parent.version,
            ..Issue::story(id, parent.project.get(), subject, created_on)
        }
    }

    /// Assigns a version (builder pattern).
    pub fn in_version(mut self, version: i64) -> Self {
        self.version = Some(VersionId(version));
        self
    }

    /// Sets story points (builder pattern).
    pub fn with_points(mut self, points: f64) -> Self {
        self.points = StoryPoints::Points(points);
        self
    }

    /// Sets the hour estimate (builder pattern).
    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the stored position (builder pattern).
    pub fn at(mut self, position: i64) -> Self {
        self.position = position;
        self
    }

    /// Marks the item closed (builder pattern).
    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn is_story(&self) -> bool {
        self.kind == ItemKind::Story
    }

    pub fn is_task(&self) -> bool {
        self.kind == ItemKind::Task
    }

    /// Whether the item was created or updated within `[from, to]`.
    pub fn touched_between(&self, from: NaiveDate, to: NaiveDate) -> bool {
        (from <= self.updated_on && self.updated_on <= to)
            || (from <= self.created_on && self.created_on <= to)
    }
}

/// Whether an open story should be closed because all its tasks are.
///
/// Only applies with [`FollowTaskStatus::Close`] and at least one task.
pub fn story_ready_to_close(story: &Issue, tasks: &[Issue], config: &BacklogsConfig) -> bool {
    if config.story_follow_task_status != FollowTaskStatus::Close || story.closed {
        return false;
    }
    let mut own = tasks
        .iter()
        .filter(|t| t.is_task() && t.parent == Some(story.id))
        .peekable();
    own.peek().is_some() && own.all(|t| t.closed)
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
