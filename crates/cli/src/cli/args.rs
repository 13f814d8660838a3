// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.

use bl_core::{IssueId, Move};
use clap::Args;

use super::OutputFormat;

/// Where to put a story in its backlog. Exactly one is required.
#[derive(Args, Clone, Debug, Default)]
#[group(required = true, multiple = false)]
pub struct PlacementArgs {
    /// Move to the top of the backlog
    #[arg(long)]
    pub top: bool,

    /// Move to the bottom of the backlog
    #[arg(long)]
    pub bottom: bool,

    /// Move directly above this story
    #[arg(long, value_name = "ID")]
    pub before: Option<i64>,

    /// Move directly below this story
    #[arg(long, value_name = "ID")]
    pub after: Option<i64>,
}

impl PlacementArgs {
    pub fn to_move(&self) -> Option<Move> {
        if self.top {
            Some(Move::Top)
        } else if self.bottom {
            Some(Move::Bottom)
        } else if let Some(id) = self.before {
            Some(Move::Before(IssueId(id)))
        } else {
            self.after.map(|id| Move::After(IssueId(id)))
        }
    }
}

/// Date that stands in for today.
#[derive(Args, Clone, Debug, Default)]
pub struct TodayArgs {
    /// Evaluate as of this date (YYYY-MM-DD) instead of today
    #[arg(long, value_name = "DATE")]
    pub today: Option<String>,
}

/// Output format selection.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct OutputArgs {
    /// Output format (text, json)
    #[arg(long, short = 'o', value_enum, default_value = "text")]
    pub output: OutputFormat,
}
