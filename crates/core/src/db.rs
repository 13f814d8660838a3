// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed store for projects, versions, items, settings and history.
//!
//! The [`Database`] struct loads the snapshots the resolvers work on and
//! persists the few mutations the core performs: position changes, new
//! stories, story points and settings rows.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::BacklogsConfig;
use crate::error::{Error, Result};
use crate::history::{HistoryEvent, HistoryLog};
use crate::id::{IssueId, ProjectId, VersionId};
use crate::issue::{format_number, story_ready_to_close, Issue, StoryPoints};
use crate::project::{Project, ProjectTree};
use crate::ranked::{BacklogScope, Move, PositionChange, RankedList};
use crate::settings::{ProjectSettings, SettingsIndex};
use crate::version::Version;
use crate::version_set::VersionSet;

/// SQL schema for the backlogs database.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    parent_id INTEGER,
    active INTEGER NOT NULL DEFAULT 1,
    FOREIGN KEY (parent_id) REFERENCES projects(id)
);

-- Versions; the ones with a date range are sprints
CREATE TABLE IF NOT EXISTS versions (
    id INTEGER PRIMARY KEY,
    project_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'open',
    sharing TEXT NOT NULL DEFAULT 'none',
    start_date TEXT,
    end_date TEXT,
    has_notes INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (project_id) REFERENCES projects(id)
);

-- Stories and tasks
CREATE TABLE IF NOT EXISTS issues (
    id INTEGER PRIMARY KEY,
    project_id INTEGER NOT NULL,
    version_id INTEGER,
    kind TEXT NOT NULL,
    subject TEXT NOT NULL,
    story_points TEXT,          -- NULL unset, '?' unknown, else a number
    estimated_hours REAL,
    position INTEGER NOT NULL DEFAULT 0,
    closed INTEGER NOT NULL DEFAULT 0,
    parent_id INTEGER,
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL,
    FOREIGN KEY (project_id) REFERENCES projects(id),
    FOREIGN KEY (version_id) REFERENCES versions(id),
    FOREIGN KEY (parent_id) REFERENCES issues(id)
);

-- One row per project, created on first access
CREATE TABLE IF NOT EXISTS project_settings (
    project_id INTEGER PRIMARY KEY,
    show_stories_from_subprojects INTEGER NOT NULL DEFAULT 0,
    show_in_scrum_stats INTEGER NOT NULL DEFAULT 0,
    ignored_versions TEXT,      -- JSON array of version ids
    backlog_versions TEXT,      -- JSON array, 0 = unassigned
    FOREIGN KEY (project_id) REFERENCES projects(id)
);

-- Recorded state of items per day
CREATE TABLE IF NOT EXISTS history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_id INTEGER NOT NULL,
    day TEXT NOT NULL,
    version_id INTEGER,
    kind TEXT NOT NULL,
    story_points TEXT,
    estimated_hours REAL,
    closed INTEGER NOT NULL DEFAULT 0,
    accepted INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (issue_id) REFERENCES issues(id)
);

CREATE INDEX IF NOT EXISTS idx_versions_project ON versions(project_id);
CREATE INDEX IF NOT EXISTS idx_issues_version ON issues(version_id);
CREATE INDEX IF NOT EXISTS idx_issues_project ON issues(project_id);
CREATE INDEX IF NOT EXISTS idx_history_issue_day ON history(issue_id, day);
"#;

const ISSUE_COLUMNS: &str = "id, project_id, version_id, kind, subject, story_points,
    estimated_hours, position, closed, parent_id, created_on, updated_on";

const VERSION_COLUMNS: &str =
    "id, project_id, name, status, sharing, start_date, end_date, has_notes";

fn corrupted(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value
        .parse()
        .map_err(|_| corrupted(format!("invalid value '{value}' in column '{column}'")))
}

fn parse_date_opt(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<NaiveDate>, rusqlite::Error> {
    value.map(|v| parse_db(&v, column)).transpose()
}

fn parse_points(value: Option<String>) -> std::result::Result<StoryPoints, rusqlite::Error> {
    match value {
        None => Ok(StoryPoints::Unset),
        Some(v) => parse_db(&v, "story_points"),
    }
}

fn parse_version_list(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<VersionSet>, rusqlite::Error> {
    value
        .map(|v| {
            serde_json::from_str::<VersionSet>(&v)
                .map_err(|_| corrupted(format!("invalid version list '{v}' in column '{column}'")))
        })
        .transpose()
}

fn points_column(points: StoryPoints) -> Option<String> {
    match points {
        StoryPoints::Unset => None,
        StoryPoints::Unknown => Some("?".to_string()),
        StoryPoints::Points(p) => Some(format_number(p)),
    }
}

fn version_id_column(id: Option<VersionId>) -> Option<i64> {
    id.map(VersionId::get)
}

fn issue_from_row(row: &Row<'_>) -> std::result::Result<Issue, rusqlite::Error> {
    let kind: String = row.get(3)?;
    let created: String = row.get(10)?;
    let updated: String = row.get(11)?;
    Ok(Issue {
        id: IssueId(row.get(0)?),
        project: ProjectId(row.get(1)?),
        version: row.get::<_, Option<i64>>(2)?.map(VersionId),
        kind: parse_db(&kind, "kind")?,
        subject: row.get(4)?,
        points: parse_points(row.get(5)?)?,
        estimated_hours: row.get(6)?,
        position: row.get(7)?,
        closed: row.get(8)?,
        parent: row.get::<_, Option<i64>>(9)?.map(IssueId),
        created_on: parse_db(&created, "created_on")?,
        updated_on: parse_db(&updated, "updated_on")?,
    })
}

fn version_from_row(row: &Row<'_>) -> std::result::Result<Version, rusqlite::Error> {
    let status: String = row.get(3)?;
    let sharing: String = row.get(4)?;
    Ok(Version {
        id: VersionId(row.get(0)?),
        project: ProjectId(row.get(1)?),
        name: row.get(2)?,
        status: parse_db(&status, "status")?,
        sharing: parse_db(&sharing, "sharing")?,
        start_date: parse_date_opt(row.get(5)?, "start_date")?,
        end_date: parse_date_opt(row.get(6)?, "end_date")?,
        has_notes: row.get(7)?,
    })
}

/// Run schema creation and all migrations on a database connection.
///
/// Applies the canonical schema, then idempotent migrations that upgrade
/// databases created before a column existed.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_version_filters(conn)?;
    Ok(())
}

/// Migration: add the ignored/backlog version lists to project settings.
fn migrate_add_version_filters(conn: &Connection) -> Result<()> {
    for column in ["ignored_versions", "backlog_versions"] {
        let has_column: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM pragma_table_info('project_settings') WHERE name = ?1",
                [column],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if !has_column {
            let sql = format!("ALTER TABLE project_settings ADD COLUMN {column} TEXT");
            conn.execute(&sql, [])?;
        }
    }
    Ok(())
}

/// SQLite database connection with backlog operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    pub fn insert_project(&self, project: &Project) -> Result<()> {
        self.conn.execute(
            "INSERT INTO projects (id, name, parent_id, active) VALUES (?1, ?2, ?3, ?4)",
            params![
                project.id.get(),
                project.name,
                project.parent.map(ProjectId::get),
                project.active,
            ],
        )?;
        Ok(())
    }

    /// Load every project as a tree.
    pub fn project_tree(&self) -> Result<ProjectTree> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, parent_id, active FROM projects ORDER BY id")?;
        let projects = stmt
            .query_map([], |row| {
                Ok(Project {
                    id: ProjectId(row.get(0)?),
                    name: row.get(1)?,
                    parent: row.get::<_, Option<i64>>(2)?.map(ProjectId),
                    active: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        ProjectTree::new(projects)
    }

    /// Insert a version after checking its date range.
    pub fn insert_version(&self, version: &Version) -> Result<()> {
        version.validate()?;
        self.conn.execute(
            "INSERT INTO versions (id, project_id, name, status, sharing, start_date, end_date, has_notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                version.id.get(),
                version.project.get(),
                version.name,
                version.status.as_str(),
                version.sharing.as_str(),
                version.start_date.map(|d| d.to_string()),
                version.end_date.map(|d| d.to_string()),
                version.has_notes,
            ],
        )?;
        Ok(())
    }

    pub fn versions(&self) -> Result<Vec<Version>> {
        let sql = format!("SELECT {VERSION_COLUMNS} FROM versions ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let versions = stmt
            .query_map([], version_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(versions)
    }

    pub fn get_version(&self, id: VersionId) -> Result<Version> {
        let sql = format!("SELECT {VERSION_COLUMNS} FROM versions WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id.get()], version_from_row)
            .optional()?
            .ok_or_else(|| Error::VersionNotFound(id.to_string()))
    }

    pub fn insert_issue(&self, issue: &Issue) -> Result<()> {
        self.conn.execute(
            "INSERT INTO issues (id, project_id, version_id, kind, subject, story_points,
             estimated_hours, position, closed, parent_id, created_on, updated_on)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                issue.id.get(),
                issue.project.get(),
                version_id_column(issue.version),
                issue.kind.as_str(),
                issue.subject,
                points_column(issue.points),
                issue.estimated_hours,
                issue.position,
                issue.closed,
                issue.parent.map(IssueId::get),
                issue.created_on.to_string(),
                issue.updated_on.to_string(),
            ],
        )?;
        Ok(())
    }

    pub fn issues(&self) -> Result<Vec<Issue>> {
        let sql = format!("SELECT {ISSUE_COLUMNS} FROM issues ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let issues = stmt
            .query_map([], issue_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(issues)
    }

    pub fn get_issue(&self, id: IssueId) -> Result<Issue> {
        let sql = format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id.get()], issue_from_row)
            .optional()?
            .ok_or_else(|| Error::IssueNotFound(id.to_string()))
    }

    /// The id the next created item will get.
    pub fn next_issue_id(&self) -> Result<IssueId> {
        let max: Option<i64> = self
            .conn
            .query_row("SELECT MAX(id) FROM issues", [], |row| row.get(0))?;
        Ok(IssueId(max.unwrap_or(0) + 1))
    }

    /// Set story points, parsed with the usual rules.
    pub fn set_points(&self, id: IssueId, points: StoryPoints, today: NaiveDate) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE issues SET story_points = ?1, updated_on = ?2 WHERE id = ?3",
            params![points_column(points), today.to_string(), id.get()],
        )?;
        if affected == 0 {
            return Err(Error::IssueNotFound(id.to_string()));
        }
        tracing::info!(issue = %id, points = %points, "set story points");
        Ok(())
    }

    /// Close an item. Closing the last open task of a story also closes the
    /// story when stories follow their tasks.
    ///
    /// Returns every item that was closed.
    pub fn close_issue(&self, id: IssueId, today: NaiveDate, config: &BacklogsConfig) -> Result<Vec<IssueId>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut closed = vec![id];
        let affected = tx.execute(
            "UPDATE issues SET closed = 1, updated_on = ?1 WHERE id = ?2",
            params![today.to_string(), id.get()],
        )?;
        if affected == 0 {
            return Err(Error::IssueNotFound(id.to_string()));
        }

        let item = self.get_issue(id)?;
        if let Some(parent) = item.parent {
            let story = self.get_issue(parent)?;
            let tasks: Vec<Issue> = self
                .issues()?
                .into_iter()
                .filter(|i| i.parent == Some(parent))
                .collect();
            if story.is_story() && story_ready_to_close(&story, &tasks, config) {
                tx.execute(
                    "UPDATE issues SET closed = 1, updated_on = ?1 WHERE id = ?2",
                    params![today.to_string(), parent.get()],
                )?;
                closed.push(parent);
            }
        }
        tx.commit()?;
        tracing::info!(issues = ?closed, "closed");
        Ok(closed)
    }

    pub fn insert_history(&self, event: &HistoryEvent) -> Result<()> {
        self.conn.execute(
            "INSERT INTO history (issue_id, day, version_id, kind, story_points,
             estimated_hours, closed, accepted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                event.issue.get(),
                event.day.to_string(),
                version_id_column(event.sprint),
                event.kind.as_str(),
                points_column(event.points),
                event.estimated_hours,
                event.closed,
                event.accepted,
            ],
        )?;
        Ok(())
    }

    /// Load all recorded history, in recording order per day.
    pub fn history_log(&self) -> Result<HistoryLog> {
        let mut stmt = self.conn.prepare(
            "SELECT issue_id, day, version_id, kind, story_points, estimated_hours, closed, accepted
             FROM history ORDER BY day, id",
        )?;
        let events = stmt
            .query_map([], |row| {
                let day: String = row.get(1)?;
                let kind: String = row.get(3)?;
                Ok(HistoryEvent {
                    issue: IssueId(row.get(0)?),
                    day: parse_db(&day, "day")?,
                    sprint: row.get::<_, Option<i64>>(2)?.map(VersionId),
                    kind: parse_db(&kind, "kind")?,
                    points: parse_points(row.get(4)?)?,
                    estimated_hours: row.get(5)?,
                    closed: row.get(6)?,
                    accepted: row.get(7)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(events.into_iter().collect())
    }

    fn read_settings(&self, project: ProjectId) -> Result<Option<ProjectSettings>> {
        let settings = self
            .conn
            .query_row(
                "SELECT project_id, show_stories_from_subprojects, show_in_scrum_stats,
                        ignored_versions, backlog_versions
                 FROM project_settings WHERE project_id = ?1",
                params![project.get()],
                settings_from_row,
            )
            .optional()?;
        Ok(settings)
    }

    /// Settings of `project`, materialising a default row on first access.
    pub fn project_settings(&self, project: ProjectId) -> Result<ProjectSettings> {
        if let Some(settings) = self.read_settings(project)? {
            return Ok(settings);
        }
        let exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM projects WHERE id = ?1",
            params![project.get()],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(Error::ProjectNotFound(project.to_string()));
        }
        let settings = ProjectSettings::new(project);
        self.save_project_settings(&settings)?;
        tracing::debug!(project = %project, "created default project settings");
        Ok(settings)
    }

    pub fn save_project_settings(&self, settings: &ProjectSettings) -> Result<()> {
        self.conn.execute(
            "INSERT INTO project_settings (project_id, show_stories_from_subprojects,
             show_in_scrum_stats, ignored_versions, backlog_versions)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(project_id) DO UPDATE SET
                 show_stories_from_subprojects = excluded.show_stories_from_subprojects,
                 show_in_scrum_stats = excluded.show_in_scrum_stats,
                 ignored_versions = excluded.ignored_versions,
                 backlog_versions = excluded.backlog_versions",
            params![
                settings.project.get(),
                settings.show_stories_from_subprojects,
                settings.show_in_scrum_stats,
                serde_json::to_string(&settings.ignored_versions)?,
                serde_json::to_string(&settings.backlog_versions)?,
            ],
        )?;
        Ok(())
    }

    /// Every stored settings row; projects without one read as defaults.
    pub fn settings_index(&self) -> Result<SettingsIndex> {
        let mut stmt = self.conn.prepare(
            "SELECT project_id, show_stories_from_subprojects, show_in_scrum_stats,
                    ignored_versions, backlog_versions
             FROM project_settings",
        )?;
        let rows = stmt
            .query_map([], settings_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows.into_iter().collect())
    }

    fn write_positions(tx: &rusqlite::Transaction<'_>, changes: &[PositionChange]) -> Result<()> {
        let mut stmt = tx.prepare("UPDATE issues SET position = ?1 WHERE id = ?2")?;
        for change in changes {
            stmt.execute(params![change.position, change.issue.get()])?;
        }
        Ok(())
    }

    /// Reposition a story within `scope` in one transaction.
    ///
    /// Nothing is written when the move is rejected.
    pub fn move_story(&self, scope: BacklogScope, id: IssueId, mv: Move) -> Result<Vec<PositionChange>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut list = RankedList::new(scope, &self.issues()?);
        let changes = list.apply(id, mv)?;
        Self::write_positions(&tx, &changes)?;
        tx.commit()?;
        tracing::info!(story = %id, ?mv, updated = changes.len(), "moved story");
        Ok(changes)
    }

    /// Insert a story at the bottom of `scope`, then apply `placement`.
    ///
    /// A rejected placement leaves the database untouched. A story that
    /// does not belong to `scope` is inserted unranked.
    pub fn create_story(
        &self,
        story: &Issue,
        scope: BacklogScope,
        placement: Option<Move>,
    ) -> Result<Vec<PositionChange>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut list = RankedList::new(scope, &self.issues()?);
        if let Some(mv) = placement {
            list.check_pivot(mv)?;
        }
        self.insert_issue(story)?;

        if !list.scope().contains(story) {
            tracing::warn!(story = %story.id, scope = %list.scope(), "new story is outside the backlog, placement ignored");
            tx.commit()?;
            return Ok(Vec::new());
        }

        let mut positions: BTreeMap<IssueId, i64> = BTreeMap::new();
        for change in list.append(story.id, story.position) {
            positions.insert(change.issue, change.position);
        }
        if let Some(mv) = placement {
            for change in list.apply(story.id, mv)? {
                positions.insert(change.issue, change.position);
            }
        }
        let changes: Vec<PositionChange> = positions
            .into_iter()
            .map(|(issue, position)| PositionChange { issue, position })
            .collect();
        Self::write_positions(&tx, &changes)?;
        tx.commit()?;
        tracing::info!(story = %story.id, ?placement, "created story");
        Ok(changes)
    }
}

fn settings_from_row(row: &Row<'_>) -> std::result::Result<ProjectSettings, rusqlite::Error> {
    let project = ProjectId(row.get(0)?);
    Ok(ProjectSettings {
        project,
        show_stories_from_subprojects: row.get(1)?,
        show_in_scrum_stats: row.get(2)?,
        ignored_versions: parse_version_list(row.get(3)?, "ignored_versions")?.unwrap_or_default(),
        backlog_versions: parse_version_list(row.get(4)?, "backlog_versions")?
            .unwrap_or_else(VersionSet::unassigned),
    })
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
