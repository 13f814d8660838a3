// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bl_core::{stats, Database, VersionId};
use chrono::NaiveDate;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::schema::EtaJson;

use super::{health, open_db, resolve_today, Snapshot};

pub fn run(sprint: i64, today: Option<&str>, format: OutputFormat) -> Result<()> {
    let (db, config, _) = open_db()?;
    let today = resolve_today(today)?;
    let eta = run_impl(&db, &config, sprint, today)?;
    match format {
        OutputFormat::Text => match eta.eta {
            Some(date) => println!("Sprint {sprint}: {} points, done around {date}", eta.points),
            None => println!("Sprint {sprint}: {} points, no estimate", eta.points),
        },
        OutputFormat::Json => println!("{}", serde_json::to_string(&eta)?),
    }
    Ok(())
}

/// Project when `sprint` finishes at its owner's past pace.
pub(crate) fn run_impl(db: &Database, config: &Config, sprint: i64, today: NaiveDate) -> Result<EtaJson> {
    let snapshot = Snapshot::load(db)?;
    let resolver = snapshot.resolver(&config.backlogs);
    let version = resolver.version(VersionId(sprint))?;
    let points = resolver
        .sprint_backlog(version.id, version.project, &snapshot.issues)
        .points();

    let report = health::run_impl(db, config, version.project.get(), today)?;
    let eta = report
        .days_per_point
        .and_then(|pace| stats::eta(version, points, pace, &config.backlogs));
    tracing::debug!(sprint, points, days_per_point = ?report.days_per_point, ?eta, "projected sprint end");
    Ok(EtaJson {
        sprint,
        points,
        days_per_point: report.days_per_point,
        eta,
    })
}

#[cfg(test)]
#[path = "eta_tests.rs"]
mod tests;
