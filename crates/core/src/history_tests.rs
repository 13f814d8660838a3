// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn event(issue: i64, day: u32, points: f64, hours: f64) -> HistoryEvent {
    HistoryEvent {
        issue: IssueId(issue),
        day: date(day),
        sprint: Some(VersionId(7)),
        kind: ItemKind::Story,
        points: StoryPoints::Points(points),
        estimated_hours: Some(hours),
        closed: false,
        accepted: false,
    }
}

#[test]
fn recorded_returns_latest_event_on_or_before_day() {
    let log: HistoryLog = vec![event(1, 5, 3.0, 8.0), event(1, 3, 2.0, 10.0)]
        .into_iter()
        .collect();

    assert!(log.recorded(IssueId(1), date(2)).is_none());
    assert_eq!(log.recorded(IssueId(1), date(3)).unwrap().points, StoryPoints::Points(2.0));
    assert_eq!(log.recorded(IssueId(1), date(4)).unwrap().points, StoryPoints::Points(2.0));
    assert_eq!(log.recorded(IssueId(1), date(9)).unwrap().points, StoryPoints::Points(3.0));
    assert!(log.recorded(IssueId(2), date(9)).is_none());
}

#[test]
fn later_event_on_same_day_wins() {
    let log: HistoryLog = vec![event(1, 3, 2.0, 10.0), event(1, 3, 5.0, 4.0)]
        .into_iter()
        .collect();
    assert_eq!(log.len(), 2);
    assert_eq!(log.recorded(IssueId(1), date(3)).unwrap().points, StoryPoints::Points(5.0));
}

#[test]
fn snapshot_reads_recorded_fields() {
    let mut accepted = event(1, 3, 5.0, 0.0);
    accepted.accepted = true;
    accepted.closed = true;
    let log: HistoryLog = vec![accepted].into_iter().collect();

    let snap = snapshot_at(&log, IssueId(1), date(3), VersionId(7), StatusFilter::Any).unwrap();
    assert_eq!(
        snap,
        Snapshot {
            story_points: 5.0,
            estimated_hours_remaining: 0.0,
            counts_as_accepted: true,
            is_closed: true,
        }
    );
}

#[test]
fn snapshot_absent_for_other_sprint() {
    let log: HistoryLog = vec![event(1, 3, 5.0, 1.0)].into_iter().collect();
    assert!(snapshot_at(&log, IssueId(1), date(3), VersionId(8), StatusFilter::Any).is_none());
}

#[test]
fn snapshot_absent_for_tasks() {
    let mut task = event(1, 3, 5.0, 1.0);
    task.kind = ItemKind::Task;
    let log: HistoryLog = vec![task].into_iter().collect();
    assert!(snapshot_at(&log, IssueId(1), date(3), VersionId(7), StatusFilter::Any).is_none());
}

#[test]
fn snapshot_absent_before_first_record() {
    let log: HistoryLog = vec![event(1, 3, 5.0, 1.0)].into_iter().collect();
    assert!(snapshot_at(&log, IssueId(1), date(2), VersionId(7), StatusFilter::Any).is_none());
}

#[test]
fn missing_hours_and_points_read_as_zero() {
    let mut bare = event(1, 3, 0.0, 0.0);
    bare.points = StoryPoints::Unset;
    bare.estimated_hours = None;
    let log: HistoryLog = vec![bare].into_iter().collect();
    let snap = snapshot_at(&log, IssueId(1), date(3), VersionId(7), StatusFilter::Any).unwrap();
    assert_eq!(snap.story_points, 0.0);
    assert_eq!(snap.estimated_hours_remaining, 0.0);
}

#[parameterized(
    any_open = { StatusFilter::Any, false, true },
    any_closed = { StatusFilter::Any, true, true },
    open_open = { StatusFilter::Open, false, true },
    open_closed = { StatusFilter::Open, true, false },
    closed_open = { StatusFilter::Closed, false, false },
    closed_closed = { StatusFilter::Closed, true, true },
)]
fn status_filter_admits(filter: StatusFilter, closed: bool, expected: bool) {
    let mut e = event(1, 3, 1.0, 1.0);
    e.closed = closed;
    assert_eq!(filter.admits(&e), expected);
}

#[test]
fn status_filter_parses() {
    assert_eq!("open".parse::<StatusFilter>().unwrap(), StatusFilter::Open);
    assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::Any);
    assert!("resolved".parse::<StatusFilter>().is_err());
}

#[test]
fn history_event_deserializes_with_defaults() {
    let e: HistoryEvent = serde_json::from_str(
        r#"{"issue": 4, "day": "2024-06-03", "sprint": 7, "kind": "story", "points": 3}"#,
    )
    .unwrap();
    assert_eq!(e.points, StoryPoints::Points(3.0));
    assert!(!e.closed && !e.accepted);
    assert_eq!(e.estimated_hours, None);
}

#[parameterized(
    recorded_sprint = { 1, 7, true },
    later_sprint = { 1, 8, true },
    never_there = { 1, 9, false },
    unknown_item = { 2, 7, false },
)]
fn ever_in_checks_every_recorded_day(issue: i64, sprint: i64, expected: bool) {
    let mut moved = event(1, 4, 5.0, 1.0);
    moved.sprint = Some(VersionId(8));
    let log: HistoryLog = vec![event(1, 3, 5.0, 1.0), moved].into_iter().collect();
    assert_eq!(log.ever_in(IssueId(issue), VersionId(sprint)), expected);
}
