// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Day-by-day state of backlog items, replayed from recorded history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::id::{IssueId, VersionId};
use crate::issue::{ItemKind, StoryPoints};

/// The recorded field values of an item as of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub issue: IssueId,
    pub day: NaiveDate,
    /// Sprint the item was assigned to on that day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<VersionId>,
    pub kind: ItemKind,
    #[serde(default)]
    pub points: StoryPoints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    /// The status was a closed one.
    #[serde(default)]
    pub closed: bool,
    /// The status counts as accepted by the product owner.
    #[serde(default)]
    pub accepted: bool,
}

/// Supplies the most relevant recorded state of an item for a day.
pub trait HistorySource {
    fn recorded(&self, issue: IssueId, day: NaiveDate) -> Option<&HistoryEvent>;

    /// Whether any recorded state places `issue` in `sprint`.
    fn ever_in(&self, issue: IssueId, sprint: VersionId) -> bool;
}

/// In-memory history: per item, events sorted by day.
///
/// The state for a day is the last event recorded on or before it; when an
/// item has several events on the same day the later one wins.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    by_issue: HashMap<IssueId, Vec<HistoryEvent>>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: HistoryEvent) {
        let events = self.by_issue.entry(event.issue).or_default();
        let at = events.partition_point(|e| e.day <= event.day);
        events.insert(at, event);
    }

    pub fn events_for(&self, issue: IssueId) -> &[HistoryEvent] {
        self.by_issue.get(&issue).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_issue.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_issue.is_empty()
    }
}

impl FromIterator<HistoryEvent> for HistoryLog {
    fn from_iter<T: IntoIterator<Item = HistoryEvent>>(iter: T) -> Self {
        let mut log = HistoryLog::new();
        for event in iter {
            log.push(event);
        }
        log
    }
}

impl HistorySource for HistoryLog {
    fn recorded(&self, issue: IssueId, day: NaiveDate) -> Option<&HistoryEvent> {
        let events = self.by_issue.get(&issue)?;
        let upto = events.partition_point(|e| e.day <= day);
        upto.checked_sub(1).map(|i| &events[i])
    }

    fn ever_in(&self, issue: IssueId, sprint: VersionId) -> bool {
        self.events_for(issue).iter().any(|e| e.sprint == Some(sprint))
    }
}

/// Restricts replay to items in a given state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    Any,
    Open,
    Closed,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Any => "any",
            StatusFilter::Open => "open",
            StatusFilter::Closed => "closed",
        }
    }

    pub fn admits(&self, event: &HistoryEvent) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Open => !event.closed,
            StatusFilter::Closed => event.closed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "any" | "all" => Ok(StatusFilter::Any),
            "open" => Ok(StatusFilter::Open),
            "closed" => Ok(StatusFilter::Closed),
            _ => Err(Error::validation(
                "status filter",
                format!("'{s}' is not one of: any, open, closed"),
            )),
        }
    }
}

/// A story's state on one sprint day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub story_points: f64,
    pub estimated_hours_remaining: f64,
    pub counts_as_accepted: bool,
    pub is_closed: bool,
}

/// The state of `story` on `day` as seen from `sprint`.
///
/// Absent when nothing was recorded yet, when the item was in another sprint
/// that day, when the item was not a story, or when `filter` rejects it.
pub fn snapshot_at<H: HistorySource + ?Sized>(
    history: &H,
    story: IssueId,
    day: NaiveDate,
    sprint: VersionId,
    filter: StatusFilter,
) -> Option<Snapshot> {
    let event = history.recorded(story, day)?;
    if event.sprint != Some(sprint) || event.kind != ItemKind::Story || !filter.admits(event) {
        return None;
    }
    Some(Snapshot {
        story_points: event.points.value(),
        estimated_hours_remaining: event.estimated_hours.unwrap_or(0.0),
        counts_as_accepted: event.accepted,
        is_closed: event.closed,
    })
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
