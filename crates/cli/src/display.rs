// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plain-text rendering of command output.

use bl_core::issue::format_number;
use bl_core::ProjectSettings;

use crate::schema::{BacklogJson, BurndownJson, HealthJson, SprintJson, StoryJson};

/// Marker for a missing value.
const NONE: &str = "-";

/// Format an optional number, `-` when absent.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format_number((v * 100.0).round() / 100.0),
        None => NONE.to_string(),
    }
}

/// Format a story as a backlog line.
///
/// Output format: `  2. #11 [3] Subject`
pub fn format_story_line(story: &StoryJson) -> String {
    format!(
        "{:>3}. #{} [{}] {}",
        story.rank, story.id, story.points_display, story.subject
    )
}

pub fn format_backlog(backlog: &BacklogJson) -> Vec<String> {
    let title = match backlog.sprint {
        Some(sprint) => format!("Sprint {sprint} (project {})", backlog.project),
        None => format!("Product backlog (project {})", backlog.project),
    };
    let mut lines = vec![format!(
        "{title}: {} stories, {} points",
        backlog.stories.len(),
        format_number(backlog.points)
    )];
    if backlog.stories.is_empty() {
        lines.push("  (empty)".to_string());
    }
    lines.extend(backlog.stories.iter().map(format_story_line));
    lines
}

/// Format a sprint as a listing line.
///
/// Output format: `#5 Sprint 1 (2024-06-03 .. 2024-06-14) open, 8 points`
pub fn format_sprint_line(sprint: &SprintJson) -> String {
    let date = |d: Option<chrono::NaiveDate>| d.map_or_else(|| "?".to_string(), |d| d.to_string());
    let range = if sprint.start_date.is_none() && sprint.end_date.is_none() {
        "undated".to_string()
    } else {
        format!("{} .. {}", date(sprint.start_date), date(sprint.end_date))
    };
    format!(
        "#{} {} ({range}) {}, {} points",
        sprint.id,
        sprint.name,
        sprint.status,
        format_number(sprint.points)
    )
}

/// Format a burndown as an aligned table, one row per day.
pub fn format_burndown(burndown: &BurndownJson) -> Vec<String> {
    let hours = if burndown.direction == "up" {
        "burned"
    } else {
        "hours"
    };
    let mut lines = vec![format!(
        "{:<10}  {:>9}  {:>8}  {:>8}  {:>8}",
        "day", "committed", "accepted", "resolved", hours
    )];
    for (i, day) in burndown.days.iter().enumerate() {
        let cell = |series: &[Option<f64>]| format_value(series.get(i).copied().flatten());
        lines.push(format!(
            "{:<10}  {:>9}  {:>8}  {:>8}  {:>8}",
            day.to_string(),
            cell(&burndown.points_committed),
            cell(&burndown.points_accepted),
            cell(&burndown.points_resolved),
            cell(&burndown.hours_remaining),
        ));
    }
    lines
}

pub fn format_health(health: &HealthJson) -> Vec<String> {
    let mut lines = vec![format!(
        "Project {} health on {}: {}%",
        health.project, health.today, health.score
    )];
    if health.no_active_sprint {
        lines.push("  no active sprint".to_string());
    }
    for name in &health.passed {
        lines.push(format!("  pass  {name}"));
    }
    for name in &health.failed {
        lines.push(format!("  FAIL  {name}"));
    }
    if !health.values.is_empty() {
        lines.push("Statistics:".to_string());
        for (name, value) in &health.values {
            lines.push(format!("  {name:<16} {}", format_value(Some(*value))));
        }
    }
    lines
}

pub fn format_settings(settings: &ProjectSettings) -> Vec<String> {
    let list = |set: &bl_core::VersionSet| {
        if set.is_empty() {
            "(none)".to_string()
        } else {
            set.to_string()
        }
    };
    vec![
        format!("Project {}", settings.project),
        format!("  ignored versions:    {}", list(&settings.ignored_versions)),
        format!("  backlog versions:    {}", list(&settings.backlog_versions)),
        format!(
            "  show subprojects:    {}",
            settings.show_stories_from_subprojects
        ),
        format!("  in scrum stats:      {}", settings.show_in_scrum_stats),
    ]
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
