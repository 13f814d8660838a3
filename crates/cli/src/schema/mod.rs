// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output structures.
//!
//! Every `-o json` rendering goes through one of these types so that
//! `bl schema <command>` describes exactly what is printed.

use std::collections::BTreeMap;

use bl_core::burndown::Burndown;
use bl_core::ranked::RankedStory;
use bl_core::{Backlog, HealthReport, Version};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Serialize;

/// A ranked backlog.
#[derive(Debug, JsonSchema, Serialize)]
pub struct BacklogJson {
    /// Project whose view of the backlog this is.
    pub project: i64,
    /// Sprint of a sprint backlog; absent for the product backlog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint: Option<i64>,
    /// Sum of numeric story points.
    pub points: f64,
    /// Stories in rank order.
    pub stories: Vec<StoryJson>,
}

/// One ranked story.
#[derive(Debug, JsonSchema, Serialize)]
pub struct StoryJson {
    pub id: i64,
    /// 1-based rank within the listing.
    pub rank: usize,
    pub project: i64,
    pub subject: String,
    /// Numeric points; absent when unset or unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    /// Points as displayed: `-` unset, `?` unknown, `S` small.
    pub points_display: String,
    /// Story ranked directly above.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<i64>,
    /// Story ranked directly below.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<i64>,
}

impl From<RankedStory<'_>> for StoryJson {
    fn from(entry: RankedStory<'_>) -> Self {
        let story = entry.story;
        StoryJson {
            id: story.id.get(),
            rank: entry.rank,
            project: story.project.get(),
            subject: story.subject.clone(),
            points: match story.points {
                bl_core::StoryPoints::Points(p) => Some(p),
                _ => None,
            },
            points_display: story.points.display("-"),
            previous: entry.previous.map(|s| s.id.get()),
            next: entry.next.map(|s| s.id.get()),
        }
    }
}

impl BacklogJson {
    pub fn new(project: i64, sprint: Option<i64>, backlog: &Backlog) -> Self {
        BacklogJson {
            project,
            sprint,
            points: backlog.points(),
            stories: backlog.entries().map(StoryJson::from).collect(),
        }
    }
}

/// Sprints visible to a project.
#[derive(Debug, JsonSchema, Serialize)]
pub struct SprintsJson {
    pub project: i64,
    /// Which sprints were resolved: `open` or `closed`.
    pub status: String,
    pub sprints: Vec<SprintJson>,
}

/// One sprint.
#[derive(Debug, JsonSchema, Serialize)]
pub struct SprintJson {
    pub id: i64,
    pub name: String,
    /// Owning project.
    pub project: i64,
    /// Version status: open, locked or closed.
    pub status: String,
    /// Sharing mode of the version.
    pub sharing: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Points committed to the sprint as seen from the project.
    pub points: f64,
}

impl SprintJson {
    pub fn new(sprint: &Version, points: f64) -> Self {
        SprintJson {
            id: sprint.id.get(),
            name: sprint.name.clone(),
            project: sprint.project.get(),
            status: sprint.status.as_str().to_string(),
            sharing: sprint.sharing.as_str().to_string(),
            start_date: sprint.start_date,
            end_date: sprint.end_date,
            points,
        }
    }
}

/// Day-by-day burndown series. Days without data are `null`.
#[derive(Debug, JsonSchema, Serialize)]
pub struct BurndownJson {
    pub sprint: i64,
    /// `down` shows remaining hours, `up` shows burned hours.
    pub direction: String,
    /// Story status filter the series were computed with.
    pub status: String,
    pub days: Vec<NaiveDate>,
    pub points_committed: Vec<Option<f64>>,
    pub points_accepted: Vec<Option<f64>>,
    pub points_resolved: Vec<Option<f64>>,
    pub hours_remaining: Vec<Option<f64>>,
}

impl BurndownJson {
    pub fn new(burndown: &Burndown, status: &str) -> Self {
        use bl_core::Series;
        BurndownJson {
            sprint: burndown.sprint.get(),
            direction: burndown.direction.to_string(),
            status: status.to_string(),
            days: burndown.days.clone(),
            points_committed: burndown.view(Series::PointsCommitted),
            points_accepted: burndown.view(Series::PointsAccepted),
            points_resolved: burndown.view(Series::PointsResolved),
            hours_remaining: burndown.view(Series::HoursRemaining),
        }
    }
}

/// Scrum health of a project.
#[derive(Debug, JsonSchema, Serialize)]
pub struct HealthJson {
    pub project: i64,
    /// Date the report was computed for.
    pub today: NaiveDate,
    /// Percentage of applicable checks that passed.
    pub score: u32,
    pub passed: Vec<String>,
    pub failed: Vec<String>,
    /// Statistics by name; absent when not computable.
    pub values: BTreeMap<String, f64>,
    /// The project has no sprint running today.
    pub no_active_sprint: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_sprint: Option<i64>,
    /// Past sprints considered, latest first.
    pub past_sprints: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_per_point: Option<f64>,
}

impl HealthJson {
    pub fn new(project: i64, today: NaiveDate, report: &HealthReport) -> Self {
        HealthJson {
            project,
            today,
            score: report.score,
            passed: report.passed.iter().map(|s| s.to_string()).collect(),
            failed: report.failed.iter().map(|s| s.to_string()).collect(),
            values: report
                .values
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
            no_active_sprint: report.no_active_sprint,
            active_sprint: report.active_sprint.map(|v| v.get()),
            past_sprints: report.past_sprints.iter().map(|v| v.get()).collect(),
            days_per_point: report.days_per_point,
        }
    }
}

/// Projected end of a sprint.
#[derive(Debug, JsonSchema, Serialize)]
pub struct EtaJson {
    pub sprint: i64,
    /// Numeric points planned into the sprint.
    pub points: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_per_point: Option<f64>,
    /// Projected date; absent without velocity data or a start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<NaiveDate>,
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
