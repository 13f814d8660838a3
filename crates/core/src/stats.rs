// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project health: a registry of pass/fail checks and numeric statistics
//! computed over the active sprint and the most recent past sprints.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::burndown::{sprint_stories, Burndown, Direction, Series};
use crate::config::BacklogsConfig;
use crate::history::{HistorySource, StatusFilter};
use crate::id::VersionId;
use crate::issue::{Issue, StoryPoints};
use crate::project::Project;
use crate::ranked::Backlog;
use crate::version::{Version, VersionStatus};

/// How many past sprints feed the statistics.
pub const PAST_SPRINT_LIMIT: usize = 5;

/// Yield dispersion (percentage points) above which yield is erratic.
const YIELD_THRESHOLD: f64 = 10.0;
/// Velocity dispersion (points) above which velocity is unstable.
const VELOCITY_THRESHOLD: f64 = 4.0;
/// Hours-per-point dispersion above which sizing is inconsistent.
const SIZING_THRESHOLD: f64 = 4.0;

/// Everything a health computation reads.
pub struct HealthInput<'a> {
    pub project: &'a Project,
    pub today: NaiveDate,
    /// Versions owned by the project.
    pub versions: &'a [Version],
    /// The ranked product backlog, usually truncated to its top stories.
    pub product_backlog: &'a Backlog,
    /// Items of the project's sprints.
    pub issues: &'a [Issue],
    pub history: &'a dyn HistorySource,
}

/// The outcome of a health computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub score: u32,
    pub passed: Vec<&'static str>,
    pub failed: Vec<&'static str>,
    pub values: BTreeMap<&'static str, f64>,
    pub no_active_sprint: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_sprint: Option<VersionId>,
    pub past_sprints: Vec<VersionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_per_point: Option<f64>,
}

struct Context<'a> {
    input: &'a HealthInput<'a>,
    active: Option<(&'a Version, Option<Burndown>)>,
    past: Vec<(&'a Version, Burndown)>,
    velocity: Vec<f64>,
    hours_per_point: Vec<f64>,
    points_per_day: Option<f64>,
}

impl<'a> Context<'a> {
    fn all_sprints(&self) -> impl Iterator<Item = &'a Version> + '_ {
        self.past
            .iter()
            .map(|(s, _)| *s)
            .chain(self.active.as_ref().map(|(s, _)| *s))
    }

    fn sprint_items(&self) -> impl Iterator<Item = &'a Issue> + '_ {
        let sprints: Vec<VersionId> = self.all_sprints().map(|s| s.id).collect();
        self.input
            .issues
            .iter()
            .filter(move |i| i.version.is_some_and(|v| sprints.contains(&v)))
    }
}

type CheckFn = fn(&Context<'_>) -> Option<bool>;
type StatFn = fn(&Context<'_>) -> Option<f64>;

/// Scored checks, by name. `None` means the check does not apply.
const CHECKS: &[(&str, CheckFn)] = &[
    ("active", check_active),
    ("committed_velocity_stable", check_committed_velocity_stable),
    ("product_backlog_filled", check_product_backlog_filled),
    ("product_backlog_sized", check_product_backlog_sized),
    ("sizing_consistent", check_sizing_consistent),
    ("sprint_notes_available", check_sprint_notes_available),
    ("sprints_estimated", check_sprints_estimated),
    ("sprints_sized", check_sprints_sized),
    ("yield", check_yield),
];

/// Reported statistics, by name.
const STATS: &[(&str, StatFn)] = &[
    ("hours_per_point", stat_hours_per_point),
    ("points_per_day", stat_points_per_day),
    ("sizing_stddev", stat_sizing_stddev),
    ("sprints", stat_sprints),
    ("velocity", stat_velocity),
    ("velocity_stddev", stat_velocity_stddev),
];

/// Names of every registered check.
pub fn check_names() -> impl Iterator<Item = &'static str> {
    CHECKS.iter().map(|(name, _)| *name)
}

/// Names of every registered statistic.
pub fn stat_names() -> impl Iterator<Item = &'static str> {
    STATS.iter().map(|(name, _)| *name)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation; `None` for no values.
pub fn dispersion(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Percentage of applicable checks that passed; 100 when none applied.
pub fn score(passed: usize, failed: usize) -> u32 {
    let applicable = passed + failed;
    if applicable == 0 {
        return 100;
    }
    (passed * 100 / applicable) as u32
}

/// Projected end of `sprint` when burning `points` at `days_per_point`.
pub fn eta(sprint: &Version, points: f64, days_per_point: f64, config: &BacklogsConfig) -> Option<NaiveDate> {
    let start = sprint.start_date?;
    let mut days = points * days_per_point;
    if config.skip_weekends {
        // five working days per calendar week
        days = days * 7.0 / 5.0;
    }
    if !days.is_finite() || days < 0.0 {
        return None;
    }
    Duration::try_days(days as i64).and_then(|span| start.checked_add_signed(span))
}

/// Runs every enabled check and statistic for one project.
pub struct HealthStatistics;

impl HealthStatistics {
    pub fn compute(input: &HealthInput<'_>, config: &BacklogsConfig) -> HealthReport {
        let ctx = Self::gather(input, config);

        let mut passed = Vec::new();
        let mut failed = Vec::new();
        for (name, check) in CHECKS {
            if !config.check_enabled(name) {
                continue;
            }
            match check(&ctx) {
                Some(true) => passed.push(*name),
                Some(false) => failed.push(*name),
                None => tracing::debug!(check = *name, "check does not apply"),
            }
        }

        let values: BTreeMap<&'static str, f64> = STATS
            .iter()
            .filter_map(|(name, stat)| stat(&ctx).filter(|v| v.is_finite()).map(|v| (*name, v)))
            .collect();

        let report = HealthReport {
            score: score(passed.len(), failed.len()),
            passed,
            failed,
            values,
            no_active_sprint: ctx.active.is_none(),
            active_sprint: ctx.active.as_ref().map(|(s, _)| s.id),
            past_sprints: ctx.past.iter().map(|(s, _)| s.id).collect(),
            days_per_point: ctx.points_per_day.filter(|p| *p > 0.0).map(|p| 1.0 / p),
        };
        tracing::debug!(
            project = %input.project.id,
            score = report.score,
            passed = report.passed.len(),
            failed = report.failed.len(),
            "computed health"
        );
        report
    }

    fn gather<'a>(input: &'a HealthInput<'a>, config: &BacklogsConfig) -> Context<'a> {
        let project = input.project.id;
        let burndown = |sprint: &Version| {
            let stories = sprint_stories(sprint.id, input.issues, input.history);
            Burndown::build(sprint, &stories, input.history, StatusFilter::Any, config)
                .map(|b| b.with_direction(Direction::Up))
        };

        let mut own: Vec<&Version> = input.versions.iter().filter(|v| v.project == project).collect();
        own.sort_by_key(|v| (v.start_date, v.id));

        let active = own
            .iter()
            .copied()
            .find(|v| v.status == VersionStatus::Open && v.covers(input.today))
            .map(|v| (v, burndown(v)));

        let mut ended: Vec<&Version> = own
            .iter()
            .copied()
            .filter(|v| v.start_date.is_some() && v.end_date.is_some_and(|end| end < input.today))
            .collect();
        ended.sort_by(|a, b| b.end_date.cmp(&a.end_date).then(b.id.cmp(&a.id)));
        ended.truncate(PAST_SPRINT_LIMIT);
        let past: Vec<(&Version, Burndown)> = ended
            .into_iter()
            .filter_map(|v| burndown(v).map(|b| (v, b)))
            .collect();

        let velocity: Vec<f64> = past.iter().map(|(_, b)| b.accepted().unwrap_or(0.0)).collect();

        let days: usize = past.iter().map(|(_, b)| b.days.len()).sum();
        let points_per_day = (days != 0).then(|| {
            past.iter()
                .filter_map(|(_, b)| b.starting_commitment())
                .sum::<f64>()
                / days as f64
        });

        let mut ctx = Context {
            input,
            active,
            past,
            velocity,
            hours_per_point: Vec::new(),
            points_per_day,
        };
        let burndowns = ctx
            .past
            .iter()
            .map(|(_, b)| b)
            .chain(ctx.active.as_ref().and_then(|(_, b)| b.as_ref()));
        let mut hours_per_point = Vec::new();
        for b in burndowns {
            let hours = b.first(Series::HoursRemaining).unwrap_or(0.0);
            let points = b.starting_commitment().unwrap_or(0.0);
            if hours == 0.0 || points == 0.0 {
                continue;
            }
            hours_per_point.push(hours / points);
        }
        ctx.hours_per_point = hours_per_point;
        ctx
    }
}

fn check_product_backlog_filled(ctx: &Context<'_>) -> Option<bool> {
    Some(!ctx.input.project.active || !ctx.input.product_backlog.is_empty())
}

fn check_product_backlog_sized(ctx: &Context<'_>) -> Option<bool> {
    Some(ctx.input.product_backlog.stories().iter().all(|s| s.points.is_set()))
}

fn check_sprints_sized(ctx: &Context<'_>) -> Option<bool> {
    Some(!ctx.sprint_items().any(|i| i.is_story() && i.points == StoryPoints::Unset))
}

fn check_sprints_estimated(ctx: &Context<'_>) -> Option<bool> {
    Some(!ctx.sprint_items().any(|i| i.is_task() && i.estimated_hours.is_none()))
}

fn check_sprint_notes_available(ctx: &Context<'_>) -> Option<bool> {
    Some(ctx.past.iter().all(|(s, _)| s.has_notes))
}

fn check_active(ctx: &Context<'_>) -> Option<bool> {
    if !ctx.input.project.active {
        return Some(true);
    }
    let (sprint, burndown) = ctx.active.as_ref()?;
    if burndown.as_ref().is_some_and(|b| b.plotted_days() <= 2) {
        return Some(true);
    }
    let today = ctx.input.today;
    let since = today.checked_sub_signed(Duration::days(2)).unwrap_or(NaiveDate::MIN);
    Some(
        ctx.input
            .issues
            .iter()
            .any(|i| i.version == Some(sprint.id) && i.touched_between(since, today)),
    )
}

fn check_yield(ctx: &Context<'_>) -> Option<bool> {
    let yields: Vec<f64> = ctx
        .past
        .iter()
        .filter_map(|(_, b)| {
            let committed = b.final_commitment()?;
            let accepted = b.accepted()?;
            (committed != 0.0).then(|| (accepted * 100.0 / committed).min(100.0))
        })
        .collect();
    dispersion(&yields).map(|d| d < YIELD_THRESHOLD)
}

fn check_committed_velocity_stable(ctx: &Context<'_>) -> Option<bool> {
    dispersion(&ctx.velocity).map(|d| d < VELOCITY_THRESHOLD)
}

fn check_sizing_consistent(ctx: &Context<'_>) -> Option<bool> {
    dispersion(&ctx.hours_per_point).map(|d| d < SIZING_THRESHOLD)
}

fn stat_sprints(ctx: &Context<'_>) -> Option<f64> {
    Some(ctx.past.len() as f64)
}

fn stat_velocity(ctx: &Context<'_>) -> Option<f64> {
    mean(&ctx.velocity)
}

fn stat_velocity_stddev(ctx: &Context<'_>) -> Option<f64> {
    dispersion(&ctx.velocity)
}

fn stat_sizing_stddev(ctx: &Context<'_>) -> Option<f64> {
    dispersion(&ctx.hours_per_point)
}

fn stat_hours_per_point(ctx: &Context<'_>) -> Option<f64> {
    mean(&ctx.hours_per_point)
}

fn stat_points_per_day(ctx: &Context<'_>) -> Option<f64> {
    ctx.points_per_day
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
