// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bl_core::{Database, IssueId};
use chrono::NaiveDate;

use crate::config::Config;
use crate::error::Result;

use super::{open_db, resolve_today};

pub fn run(id: i64, today: Option<&str>) -> Result<()> {
    let (db, config, _) = open_db()?;
    let today = resolve_today(today)?;
    for closed in run_impl(&db, &config, id, today)? {
        println!("Closed #{closed}");
    }
    Ok(())
}

/// Close an item; a story whose last task closes may follow it.
pub(crate) fn run_impl(db: &Database, config: &Config, id: i64, today: NaiveDate) -> Result<Vec<IssueId>> {
    Ok(db.close_issue(IssueId(id), today, &config.backlogs)?)
}

#[cfg(test)]
#[path = "close_tests.rs"]
mod tests;
