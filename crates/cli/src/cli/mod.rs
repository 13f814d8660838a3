// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use clap::{Parser, Subcommand, ValueEnum};

pub use args::{OutputArgs, PlacementArgs, TodayArgs};

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// Custom help template that groups commands into sections
const HELP_TEMPLATE: &str = "{about-with-newline}
{usage-heading} {usage}

{before-help}Options:
{options}{after-help}";

const COMMANDS_HELP: &str = "\
Backlogs:
  backlog     Show a ranked product or sprint backlog
  move        Reposition a story within its backlog
  new         Create a story
  points      Set story points
  close       Close a story or task

Sprints:
  sprints     List the sprints a project sees
  burndown    Show a sprint burndown
  eta         Projected end date of a sprint
  health      Score a project's scrum health

Setup & Configuration:
  init        Initialize a backlogs directory
  import      Load projects, versions and items from JSON
  settings    Show or change project backlog settings
  schema      Show JSON schema for command output";

const QUICKSTART_HELP: &str = "\
Get started:
  bl init                     Initialize backlogs
  bl import data.json         Load a dataset
  bl backlog 1                Show the product backlog of project 1
  bl move 12 --top -p 1       Rank story 12 first
  bl burndown 5               Show the burndown of sprint 5";

#[derive(Parser)]
#[command(name = "bl")]
#[command(about = "Agile backlogs: ranked stories, sprints, burndowns and scrum health")]
#[command(help_template = HELP_TEMPLATE)]
#[command(before_help = COMMANDS_HELP)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    // ─────────────────────────────────────────────────────────────────────────
    // Backlogs
    // ─────────────────────────────────────────────────────────────────────────
    /// Show the ranked product backlog of a project, or one sprint's backlog
    #[command(after_help = "Examples:\n  \
        bl backlog 1               Product backlog of project 1\n  \
        bl backlog 1 -n 10         First ten stories only\n  \
        bl backlog 1 --sprint 5    Sprint 5 as seen from project 1\n  \
        bl backlog 1 -o json       Output in JSON format")]
    Backlog {
        /// Project ID
        project: i64,

        /// Show this sprint's backlog instead of the product backlog
        #[arg(long, value_name = "ID")]
        sprint: Option<i64>,

        /// Maximum number of stories
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Reposition a story within its backlog
    #[command(after_help = "Examples:\n  \
        bl move 12 --top -p 1          Rank story 12 first\n  \
        bl move 12 --after 10 -p 1     Place story 12 right below 10")]
    Move {
        /// Story ID
        story: i64,

        /// Project whose view of the backlog is used
        #[arg(long, short = 'p')]
        project: i64,

        #[command(flatten)]
        placement: PlacementArgs,
    },

    /// Create a story, optionally placed relative to its neighbours
    #[command(after_help = "Examples:\n  \
        bl new 1 \"Login page\"                 Append to the product backlog\n  \
        bl new 1 \"Login page\" --prev \"\"       Put it on top\n  \
        bl new 1 \"Login page\" --next 12       Put it above story 12\n  \
        bl new 1 \"Fix crash\" --sprint 5 --points 3")]
    New {
        /// Project ID
        project: i64,

        /// Story subject
        subject: String,

        /// Sprint to plan the story into
        #[arg(long, value_name = "ID")]
        sprint: Option<i64>,

        /// Story points (number, 's' for small, '?' for unknown)
        #[arg(long)]
        points: Option<String>,

        /// Story to place the new one after; empty for the top
        #[arg(long, value_name = "ID", conflicts_with = "next")]
        prev: Option<String>,

        /// Story to place the new one before; empty for the bottom
        #[arg(long, value_name = "ID")]
        next: Option<String>,

        #[command(flatten)]
        today: TodayArgs,
    },

    /// Set the story points of a story
    #[command(after_help = "Examples:\n  \
        bl points 12 3      Three points\n  \
        bl points 12 s      Small\n  \
        bl points 12 ?      Sized, value unknown\n  \
        bl points 12 -      Clear")]
    Points {
        /// Story ID
        story: i64,

        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,

        #[command(flatten)]
        today: TodayArgs,
    },

    /// Close a story or task
    Close {
        /// Item ID
        id: i64,

        #[command(flatten)]
        today: TodayArgs,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Sprints
    // ─────────────────────────────────────────────────────────────────────────
    /// List the sprints a project sees, in sprint order
    Sprints {
        /// Project ID
        project: i64,

        /// List closed sprints instead of open ones
        #[arg(long)]
        closed: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the day-by-day burndown of a sprint
    #[command(after_help = "Examples:\n  \
        bl burndown 5                      Remaining work per day\n  \
        bl burndown 5 --direction up       Burned hours instead of remaining\n  \
        bl burndown 5 --status closed      Only count closed stories")]
    Burndown {
        /// Sprint ID
        sprint: i64,

        /// Plot direction (down, up)
        #[arg(long, default_value = "down")]
        direction: String,

        /// Only count stories in this state (any, open, closed)
        #[arg(long, default_value = "any")]
        status: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Projected end date of a sprint from past velocity
    Eta {
        /// Sprint ID
        sprint: i64,

        #[command(flatten)]
        today: TodayArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Score the scrum health of a project
    Health {
        /// Project ID
        project: i64,

        #[command(flatten)]
        today: TodayArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Setup & Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Initialize a .backlogs directory with config and database
    Init {
        /// Directory to initialize (defaults to the current directory)
        #[arg(long)]
        path: Option<String>,

        /// Enable sprint and backlog sharing across project trees
        #[arg(long)]
        sharing: bool,
    },

    /// Load a JSON dataset (projects, versions, items, settings, history)
    #[command(arg_required_else_help = true)]
    Import {
        /// Dataset file
        file: String,
    },

    /// Show or change the backlog settings of a project
    #[command(after_help = "Examples:\n  \
        bl settings 1                         Show settings\n  \
        bl settings 1 --ignored 7,8           Never offer versions 7 and 8 as sprints\n  \
        bl settings 1 --backlog 0,9           Unassigned stories plus version 9\n  \
        bl settings 1 --show-subprojects true")]
    Settings {
        /// Project ID
        project: i64,

        /// Comma-separated versions never offered as sprints
        #[arg(long, value_name = "IDS")]
        ignored: Option<String>,

        /// Comma-separated versions forming the product backlog (0 = unassigned)
        #[arg(long, value_name = "IDS")]
        backlog: Option<String>,

        /// Include subproject stories in the product backlog
        #[arg(long, value_name = "BOOL")]
        show_subprojects: Option<bool>,

        /// Include the project in scrum statistics
        #[arg(long, value_name = "BOOL")]
        scrum_stats: Option<bool>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Output JSON Schema for commands that support JSON output
    #[command(subcommand)]
    Schema(SchemaCommand),
}

/// JSON Schema output commands.
#[derive(Subcommand, Clone, Copy, Debug)]
pub enum SchemaCommand {
    /// Schema for `bl backlog -o json`
    Backlog,
    /// Schema for `bl sprints -o json`
    Sprints,
    /// Schema for `bl burndown -o json`
    Burndown,
    /// Schema for `bl health -o json`
    Health,
    /// Schema for `bl eta -o json`
    Eta,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
