// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bl_core::{Database, IssueId, Move, PositionChange, ProjectId};

use crate::config::Config;
use crate::error::{Error, Result};

use super::{open_db, Snapshot};

pub fn run(story: i64, project: i64, placement: Option<Move>) -> Result<()> {
    let (db, config, _) = open_db()?;
    let mv = placement.ok_or_else(|| {
        Error::InvalidInput("one of --top, --bottom, --before or --after is required".to_string())
    })?;
    let rank = run_impl(&db, &config, story, project, mv)?;
    println!("Moved #{story} to rank {rank}");
    Ok(())
}

/// Move `story` within the backlog it belongs to from `project`'s view,
/// returning its new 1-based rank.
pub(crate) fn run_impl(
    db: &Database,
    config: &Config,
    story: i64,
    project: i64,
    mv: Move,
) -> Result<usize> {
    let story_id = IssueId(story);
    let issue = db.get_issue(story_id)?;
    let scope = {
        let snapshot = Snapshot::load(db)?;
        snapshot
            .resolver(&config.backlogs)
            .scope_of(&issue, ProjectId(project))?
    };

    let changes: Vec<PositionChange> = db.move_story(scope.clone(), story_id, mv)?;
    tracing::debug!(story, changed = changes.len(), "positions written");

    let issues = db.issues()?;
    let list = bl_core::RankedList::new(scope, &issues);
    let rank = list
        .rank_of(story_id)
        .ok_or_else(|| Error::InvalidInput(format!("story {story} vanished from its backlog")))?;
    Ok(rank)
}

#[cfg(test)]
#[path = "rank_tests.rs"]
mod tests;
