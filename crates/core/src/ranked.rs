// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Manual ordering of stories within a backlog.
//!
//! A [`RankedList`] holds the stories of one [`BacklogScope`] ordered by their
//! stored position. Moves are computed on a copy of the order and return the
//! [`PositionChange`]s needed to make the stored positions `1..=N` again; the
//! list itself only changes when the whole move succeeded.
//!
//! [`Backlog`] is the read side: stories in rank order, with rank and
//! neighbours derived from the slice index rather than stored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::id::{IssueId, ProjectId, VersionId};
use crate::issue::Issue;

/// Which versions belong to a product backlog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionFilter {
    /// Only stories without a version.
    Unassigned,
    /// Stories without a version plus the listed versions.
    UnassignedOr(BTreeSet<VersionId>),
    /// Only the listed versions.
    Only(BTreeSet<VersionId>),
}

impl VersionFilter {
    pub fn matches(&self, version: Option<VersionId>) -> bool {
        match (self, version) {
            (VersionFilter::Unassigned, v) => v.is_none(),
            (VersionFilter::UnassignedOr(_), None) => true,
            (VersionFilter::UnassignedOr(ids), Some(v)) => ids.contains(&v),
            (VersionFilter::Only(_), None) => false,
            (VersionFilter::Only(ids), Some(v)) => ids.contains(&v),
        }
    }
}

/// The set of stories sharing one manual order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BacklogScope {
    /// Open stories waiting for a sprint.
    Product {
        owner: ProjectId,
        projects: BTreeSet<ProjectId>,
        versions: VersionFilter,
    },
    /// Stories committed to one sprint, optionally restricted to a project.
    Sprint {
        sprint: VersionId,
        project: Option<ProjectId>,
    },
}

impl BacklogScope {
    /// Whether `issue` is ranked in this backlog.
    pub fn contains(&self, issue: &Issue) -> bool {
        if !issue.is_story() {
            return false;
        }
        match self {
            BacklogScope::Product {
                projects, versions, ..
            } => {
                !issue.closed
                    && projects.contains(&issue.project)
                    && versions.matches(issue.version)
            }
            BacklogScope::Sprint { sprint, project } => {
                issue.version == Some(*sprint) && project.map_or(true, |p| issue.project == p)
            }
        }
    }
}

impl fmt::Display for BacklogScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BacklogScope::Product { owner, .. } => write!(f, "the product backlog of project {owner}"),
            BacklogScope::Sprint { sprint, .. } => write!(f, "the backlog of sprint {sprint}"),
        }
    }
}

/// A reposition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "to", content = "pivot")]
pub enum Move {
    Top,
    Bottom,
    Before(IssueId),
    After(IssueId),
}

impl Move {
    /// Maps the `prev`/`next` form used by drag-and-drop clients.
    ///
    /// `prev` wins when both are given. An empty `prev` means top and an
    /// empty `next` means bottom; neither given means no move.
    pub fn from_neighbours(
        prev: Option<Option<IssueId>>,
        next: Option<Option<IssueId>>,
    ) -> Option<Move> {
        match (prev, next) {
            (Some(None), _) => Some(Move::Top),
            (Some(Some(id)), _) => Some(Move::After(id)),
            (None, Some(None)) => Some(Move::Bottom),
            (None, Some(Some(id))) => Some(Move::Before(id)),
            (None, None) => None,
        }
    }

    fn pivot(&self) -> Option<IssueId> {
        match self {
            Move::Before(p) | Move::After(p) => Some(*p),
            Move::Top | Move::Bottom => None,
        }
    }
}

/// A stored position that has to be rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionChange {
    pub issue: IssueId,
    pub position: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    id: IssueId,
    stored: i64,
}

/// The manual order of one backlog.
#[derive(Debug, Clone)]
pub struct RankedList {
    scope: BacklogScope,
    entries: Vec<Entry>,
}

impl RankedList {
    /// Collects the stories of `scope` from `issues`, ordered by stored
    /// position with ties broken by id.
    pub fn new(scope: BacklogScope, issues: &[Issue]) -> Self {
        let mut entries: Vec<Entry> = issues
            .iter()
            .filter(|issue| scope.contains(issue))
            .map(|issue| Entry {
                id: issue.id,
                stored: issue.position,
            })
            .collect();
        entries.sort_by_key(|e| (e.stored, e.id));
        RankedList { scope, entries }
    }

    /// Reads the stories of `scope` in rank order.
    pub fn fetch_ordered(scope: BacklogScope, issues: &[Issue], limit: Option<usize>) -> Backlog {
        Backlog::new(scope, issues, limit)
    }

    pub fn scope(&self) -> &BacklogScope {
        &self.scope
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: IssueId) -> bool {
        self.index_of(id).is_some()
    }

    /// Ids in rank order.
    pub fn ids(&self) -> Vec<IssueId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// The 1-based rank of `id`.
    pub fn rank_of(&self, id: IssueId) -> Option<usize> {
        self.index_of(id).map(|i| i + 1)
    }

    /// Stored positions, in rank order.
    pub fn positions(&self) -> Vec<i64> {
        self.entries.iter().map(|e| e.stored).collect()
    }

    fn index_of(&self, id: IssueId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn move_to_top(&mut self, id: IssueId) -> Result<Vec<PositionChange>> {
        self.apply(id, Move::Top)
    }

    pub fn move_to_bottom(&mut self, id: IssueId) -> Result<Vec<PositionChange>> {
        self.apply(id, Move::Bottom)
    }

    pub fn move_before(&mut self, id: IssueId, pivot: IssueId) -> Result<Vec<PositionChange>> {
        self.apply(id, Move::Before(pivot))
    }

    pub fn move_after(&mut self, id: IssueId, pivot: IssueId) -> Result<Vec<PositionChange>> {
        self.apply(id, Move::After(pivot))
    }

    /// Checks that a move could be applied without performing it.
    pub fn check(&self, id: IssueId, mv: Move) -> Result<()> {
        if !self.contains(id) {
            return Err(Error::NotInBacklog {
                story: id.to_string(),
                scope: self.scope.to_string(),
            });
        }
        self.check_pivot(mv)
    }

    /// Fails with [`Error::InvalidPivot`] when the move's pivot is not ranked here.
    pub fn check_pivot(&self, mv: Move) -> Result<()> {
        match mv.pivot() {
            Some(pivot) if !self.contains(pivot) => Err(Error::InvalidPivot {
                pivot: pivot.to_string(),
                scope: self.scope.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Relocates `id` and returns the positions to persist.
    ///
    /// On error the list is left exactly as it was.
    pub fn apply(&mut self, id: IssueId, mv: Move) -> Result<Vec<PositionChange>> {
        self.check(id, mv)?;
        if mv.pivot() == Some(id) {
            return Ok(self.renumber());
        }

        let mut order = self.entries.clone();
        let from = order.iter().position(|e| e.id == id).ok_or_else(|| Error::NotInBacklog {
            story: id.to_string(),
            scope: self.scope.to_string(),
        })?;
        let entry = order.remove(from);
        let to = match mv {
            Move::Top => 0,
            Move::Bottom => order.len(),
            Move::Before(pivot) | Move::After(pivot) => {
                let at = order.iter().position(|e| e.id == pivot).ok_or_else(|| Error::InvalidPivot {
                    pivot: pivot.to_string(),
                    scope: self.scope.to_string(),
                })?;
                if matches!(mv, Move::After(_)) {
                    at + 1
                } else {
                    at
                }
            }
        };
        order.insert(to, entry);
        tracing::debug!(story = %id, from = from + 1, to = to + 1, scope = %self.scope, "reposition");

        self.entries = order;
        Ok(self.renumber())
    }

    /// Adds a freshly created story at the bottom.
    pub fn append(&mut self, id: IssueId, stored: i64) -> Vec<PositionChange> {
        self.entries.push(Entry { id, stored });
        self.renumber()
    }

    /// Rewrites stored positions to `1..=N`, returning only those that changed.
    pub fn renumber(&mut self) -> Vec<PositionChange> {
        let mut changes = Vec::new();
        for (i, entry) in self.entries.iter_mut().enumerate() {
            let want = i as i64 + 1;
            if entry.stored != want {
                entry.stored = want;
                changes.push(PositionChange {
                    issue: entry.id,
                    position: want,
                });
            }
        }
        changes
    }
}

/// One story of a fetched backlog with its derived navigation.
#[derive(Debug, Clone, Copy)]
pub struct RankedStory<'a> {
    pub story: &'a Issue,
    /// 1-based rank within this fetch.
    pub rank: usize,
    pub previous: Option<&'a Issue>,
    pub next: Option<&'a Issue>,
}

/// Stories of one backlog in rank order.
#[derive(Debug, Clone)]
pub struct Backlog {
    scope: BacklogScope,
    stories: Vec<Issue>,
}

impl Backlog {
    fn new(scope: BacklogScope, issues: &[Issue], limit: Option<usize>) -> Self {
        let mut stories: Vec<Issue> = issues
            .iter()
            .filter(|issue| scope.contains(issue))
            .cloned()
            .collect();
        stories.sort_by_key(|s| (s.position, s.id));
        if let Some(limit) = limit {
            stories.truncate(limit);
        }
        Backlog { scope, stories }
    }

    pub fn scope(&self) -> &BacklogScope {
        &self.scope
    }

    pub fn stories(&self) -> &[Issue] {
        &self.stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// The ranked view of the story at slice index `i`.
    pub fn at(&self, i: usize) -> Option<RankedStory<'_>> {
        let story = self.stories.get(i)?;
        Some(RankedStory {
            story,
            rank: i + 1,
            previous: i.checked_sub(1).and_then(|p| self.stories.get(p)),
            next: self.stories.get(i + 1),
        })
    }

    /// Looks up a story by id.
    pub fn get(&self, id: IssueId) -> Option<RankedStory<'_>> {
        let i = self.stories.iter().position(|s| s.id == id)?;
        self.at(i)
    }

    pub fn entries(&self) -> impl Iterator<Item = RankedStory<'_>> {
        (0..self.stories.len()).filter_map(move |i| self.at(i))
    }

    /// Sum of numeric story points.
    pub fn points(&self) -> f64 {
        self.stories.iter().map(|s| s.points.value()).sum()
    }
}

#[cfg(test)]
#[path = "ranked_tests.rs"]
mod tests;
