// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sprint burndown series built by replaying story history day by day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::BacklogsConfig;
use crate::error::{Error, Result};
use crate::history::{snapshot_at, HistorySource, StatusFilter};
use crate::id::{IssueId, VersionId};
use crate::issue::Issue;
use crate::version::Version;

/// How consumers read a burndown.
///
/// The underlying per-day sums never change; `Up` only changes what
/// [`Burndown::view`] reports for remaining hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Remaining work.
    #[default]
    Down,
    /// Work completed so far.
    Up,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "down" => Ok(Direction::Down),
            "up" => Ok(Direction::Up),
            _ => Err(Error::validation(
                "direction",
                format!("'{s}' is not one of: up, down"),
            )),
        }
    }
}

/// One of the four burndown series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    PointsCommitted,
    PointsAccepted,
    PointsResolved,
    HoursRemaining,
}

impl Series {
    pub const ALL: [Series; 4] = [
        Series::PointsCommitted,
        Series::PointsAccepted,
        Series::PointsResolved,
        Series::HoursRemaining,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Series::PointsCommitted => "points_committed",
            Series::PointsAccepted => "points_accepted",
            Series::PointsResolved => "points_resolved",
            Series::HoursRemaining => "hours_remaining",
        }
    }
}

/// Per-day sums for one sprint; `None` marks a day without any data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Burndown {
    pub sprint: VersionId,
    pub days: Vec<NaiveDate>,
    pub points_committed: Vec<Option<f64>>,
    pub points_accepted: Vec<Option<f64>>,
    pub points_resolved: Vec<Option<f64>>,
    pub hours_remaining: Vec<Option<f64>>,
    pub direction: Direction,
}

/// Stories that belong to `sprint` now or did on some recorded day.
pub fn sprint_stories<H: HistorySource + ?Sized>(
    sprint: VersionId,
    issues: &[Issue],
    history: &H,
) -> Vec<IssueId> {
    issues
        .iter()
        .filter(|issue| issue.is_story())
        .filter(|issue| issue.version == Some(sprint) || history.ever_in(issue.id, sprint))
        .map(|issue| issue.id)
        .collect()
}

#[derive(Default)]
struct DayTotals {
    seen: bool,
    committed: f64,
    accepted: f64,
    resolved: f64,
    hours: f64,
}

impl Burndown {
    /// Replays `stories` over every day of `sprint`.
    ///
    /// Returns `None` when the sprint has no complete date range.
    pub fn build<H: HistorySource + ?Sized>(
        sprint: &Version,
        stories: &[IssueId],
        history: &H,
        filter: StatusFilter,
        config: &BacklogsConfig,
    ) -> Option<Burndown> {
        if !sprint.has_burndown() {
            return None;
        }
        let days = sprint.days(config);
        let mut burndown = Burndown {
            sprint: sprint.id,
            days: Vec::with_capacity(days.len()),
            points_committed: Vec::with_capacity(days.len()),
            points_accepted: Vec::with_capacity(days.len()),
            points_resolved: Vec::with_capacity(days.len()),
            hours_remaining: Vec::with_capacity(days.len()),
            direction: Direction::Down,
        };

        for day in days {
            let mut totals = DayTotals::default();
            for &story in stories {
                let Some(snap) = snapshot_at(history, story, day, sprint.id, filter) else {
                    continue;
                };
                totals.seen = true;
                totals.committed += snap.story_points;
                if snap.counts_as_accepted {
                    totals.accepted += snap.story_points;
                }
                if snap.counts_as_accepted || snap.estimated_hours_remaining == 0.0 {
                    totals.resolved += snap.story_points;
                }
                if !snap.is_closed {
                    totals.hours += snap.estimated_hours_remaining;
                }
            }
            let value = |v: f64| totals.seen.then_some(v);
            burndown.days.push(day);
            burndown.points_committed.push(value(totals.committed));
            burndown.points_accepted.push(value(totals.accepted));
            burndown.points_resolved.push(value(totals.resolved));
            burndown.hours_remaining.push(value(totals.hours));
        }

        tracing::debug!(
            sprint = %sprint.id,
            days = burndown.days.len(),
            stories = stories.len(),
            filter = %filter,
            "built burndown"
        );
        Some(burndown)
    }

    /// Sets the counting direction (builder pattern).
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// The raw per-day sums of a series.
    pub fn series(&self, series: Series) -> &[Option<f64>] {
        match series {
            Series::PointsCommitted => &self.points_committed,
            Series::PointsAccepted => &self.points_accepted,
            Series::PointsResolved => &self.points_resolved,
            Series::HoursRemaining => &self.hours_remaining,
        }
    }

    /// A series as read in the current direction.
    ///
    /// Going up, remaining hours become hours burned since the first day.
    pub fn view(&self, series: Series) -> Vec<Option<f64>> {
        let raw = self.series(series);
        match (self.direction, series) {
            (Direction::Up, Series::HoursRemaining) => {
                let start = raw.first().copied().flatten();
                raw.iter()
                    .map(|v| match (start, v) {
                        (Some(s), Some(v)) => Some(s - v),
                        _ => None,
                    })
                    .collect()
            }
            _ => raw.to_vec(),
        }
    }

    /// Value of a series on the first sprint day.
    pub fn first(&self, series: Series) -> Option<f64> {
        self.series(series).first().copied().flatten()
    }

    /// Value of a series on the last sprint day.
    pub fn last(&self, series: Series) -> Option<f64> {
        self.series(series).last().copied().flatten()
    }

    pub fn starting_commitment(&self) -> Option<f64> {
        self.first(Series::PointsCommitted)
    }

    pub fn final_commitment(&self) -> Option<f64> {
        self.last(Series::PointsCommitted)
    }

    /// Points accepted by the end of the sprint.
    pub fn accepted(&self) -> Option<f64> {
        self.last(Series::PointsAccepted)
    }

    pub fn starting_hours(&self) -> Option<f64> {
        self.first(Series::HoursRemaining)
    }

    /// Number of days that have remaining-hours data.
    pub fn plotted_days(&self) -> usize {
        self.hours_remaining.iter().filter(|v| v.is_some()).count()
    }
}

#[cfg(test)]
#[path = "burndown_tests.rs"]
mod tests;
