// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bl_core::{Database, Issue, IssueId, Move, ProjectId, RankedList, StoryPoints, VersionId};
use chrono::NaiveDate;

use crate::config::Config;
use crate::error::Result;

use super::{open_db, resolve_today, Snapshot};

/// Arguments of `bl new`.
#[derive(Debug, Clone, Default)]
pub struct NewStory {
    pub project: i64,
    pub subject: String,
    pub sprint: Option<i64>,
    pub points: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
}

pub fn run(args: NewStory, today: Option<&str>) -> Result<()> {
    let (db, config, _) = open_db()?;
    let today = resolve_today(today)?;
    let (id, rank) = run_impl(&db, &config, &args, today)?;
    match rank {
        Some(rank) => println!("Created #{id} at rank {rank}"),
        None => println!("Created #{id}"),
    }
    Ok(())
}

/// A `--prev`/`--next` value: empty means the end of the list.
fn neighbour(value: Option<&str>) -> Result<Option<Option<IssueId>>> {
    match value.map(str::trim) {
        None => Ok(None),
        Some("") => Ok(Some(None)),
        Some(id) => Ok(Some(Some(id.parse()?))),
    }
}

/// Create a story and rank it; returns its id and rank, if it is ranked.
pub(crate) fn run_impl(
    db: &Database,
    config: &Config,
    args: &NewStory,
    today: NaiveDate,
) -> Result<(IssueId, Option<usize>)> {
    if args.subject.trim().is_empty() {
        return Err(bl_core::Error::validation("subject", "cannot be empty").into());
    }
    let points: StoryPoints = match &args.points {
        Some(value) => value.parse()?,
        None => StoryPoints::Unset,
    };
    let placement = Move::from_neighbours(neighbour(args.prev.as_deref())?, neighbour(args.next.as_deref())?);

    let project = ProjectId(args.project);
    let scope = {
        let snapshot = Snapshot::load(db)?;
        let resolver = snapshot.resolver(&config.backlogs);
        resolver.tree().project(project)?;
        match args.sprint {
            Some(sprint) => {
                let sprint = resolver.version(VersionId(sprint))?.id;
                resolver.sprint_backlog_scope(sprint, project)
            }
            None => resolver.product_backlog_scope(project)?,
        }
    };

    let id = db.next_issue_id()?;
    let mut story = Issue::story(id.get(), args.project, args.subject.trim(), today);
    story.version = args.sprint.map(VersionId);
    story.points = points;

    db.create_story(&story, scope.clone(), placement)?;
    let rank = RankedList::new(scope, &db.issues()?).rank_of(id);
    Ok((id, rank))
}

#[cfg(test)]
#[path = "new_tests.rs"]
mod tests;
