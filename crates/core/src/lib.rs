// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bl-core: Shared library for the bl agile backlog tool
//!
//! This crate provides the data model, backlog ranking, sprint scoping,
//! burndown replay and health statistics used by the bl CLI, together with
//! the SQLite store they are loaded from.

pub mod burndown;
pub mod config;
pub mod db;
pub mod error;
pub mod history;
pub mod id;
pub mod issue;
pub mod project;
pub mod ranked;
pub mod scope;
pub mod settings;
pub mod stats;
pub mod version;
pub mod version_set;

pub use burndown::{Burndown, Direction, Series};
pub use config::{BacklogsConfig, FollowTaskStatus};
pub use db::Database;
pub use error::{Error, Result};
pub use history::{HistoryEvent, HistoryLog, HistorySource, StatusFilter};
pub use id::{IssueId, ProjectId, VersionId};
pub use issue::{Issue, ItemKind, StoryPoints};
pub use project::{Project, ProjectTree};
pub use ranked::{Backlog, BacklogScope, Move, PositionChange, RankedList, VersionFilter};
pub use scope::{ScopeResolver, SprintStatus};
pub use settings::{ProjectSettings, SettingsIndex};
pub use stats::{HealthInput, HealthReport, HealthStatistics};
pub use version::{Sharing, Version, VersionStatus};
pub use version_set::VersionSet;
