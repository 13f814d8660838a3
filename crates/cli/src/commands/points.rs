// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bl_core::{Database, IssueId, StoryPoints};
use chrono::NaiveDate;

use crate::error::Result;

use super::{open_db, resolve_today};

pub fn run(story: i64, value: &str, today: Option<&str>) -> Result<()> {
    let (db, _, _) = open_db()?;
    let today = resolve_today(today)?;
    let points = run_impl(&db, story, value, today)?;
    println!("#{story} sized {}", points.display("-"));
    Ok(())
}

/// Parse and store the size of `story`.
pub(crate) fn run_impl(db: &Database, story: i64, value: &str, today: NaiveDate) -> Result<StoryPoints> {
    let points: StoryPoints = value.parse()?;
    db.set_points(IssueId(story), points, today)?;
    Ok(points)
}

#[cfg(test)]
#[path = "points_tests.rs"]
mod tests;
