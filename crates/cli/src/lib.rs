// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! blrs - agile backlogs on a local SQLite store.
//!
//! This crate provides the `bl` CLI on top of `bl-core`: sprint resolution,
//! ranked backlogs, burndowns and scrum health for a tree of projects.
//!
//! # Initialization
//!
//! Use [`init_work_dir`] to create a `.backlogs/` directory, then open the database:
//!
//! ```rust,ignore
//! use blrs::{find_work_dir, get_db_path, Config, Database};
//!
//! let work_dir = find_work_dir()?;
//! let config = Config::load(&work_dir)?;
//! let db = Database::open(&get_db_path(&work_dir, &config))?;
//! ```

mod cli;
mod commands;
mod display;
pub mod logging;
mod schema;

pub mod config;
pub mod error;

pub use bl_core::Database;
pub use cli::{Cli, Command, OutputArgs, OutputFormat, PlacementArgs, SchemaCommand, TodayArgs};
pub use config::{find_work_dir, get_db_path, init_work_dir, Config};
pub use error::{Error, Result};

use commands::new::NewStory;
use commands::settings::SettingsUpdate;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Backlog {
            project,
            sprint,
            limit,
            output,
        } => commands::backlog::run(project, sprint, limit, output.output),
        Command::Move {
            story,
            project,
            placement,
        } => commands::rank::run(story, project, placement.to_move()),
        Command::New {
            project,
            subject,
            sprint,
            points,
            prev,
            next,
            today,
        } => commands::new::run(
            NewStory {
                project,
                subject,
                sprint,
                points,
                prev,
                next,
            },
            today.today.as_deref(),
        ),
        Command::Points {
            story,
            value,
            today,
        } => commands::points::run(story, &value, today.today.as_deref()),
        Command::Close { id, today } => commands::close::run(id, today.today.as_deref()),
        Command::Sprints {
            project,
            closed,
            output,
        } => commands::sprints::run(project, closed, output.output),
        Command::Burndown {
            sprint,
            direction,
            status,
            output,
        } => commands::burndown::run(sprint, &direction, &status, output.output),
        Command::Eta {
            sprint,
            today,
            output,
        } => commands::eta::run(sprint, today.today.as_deref(), output.output),
        Command::Health {
            project,
            today,
            output,
        } => commands::health::run(project, today.today.as_deref(), output.output),
        Command::Init { path, sharing } => commands::init::run(path, sharing),
        Command::Import { file } => commands::import::run(&file),
        Command::Settings {
            project,
            ignored,
            backlog,
            show_subprojects,
            scrum_stats,
            output,
        } => commands::settings::run(
            project,
            SettingsUpdate {
                ignored,
                backlog,
                show_subprojects,
                scrum_stats,
            },
            output.output,
        ),
        Command::Schema(cmd) => commands::schema::run(cmd),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
