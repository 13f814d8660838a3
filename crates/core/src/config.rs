// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide backlog behaviour, passed explicitly into every call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// What happens to a story when its tasks change state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowTaskStatus {
    /// Stories are never touched.
    #[default]
    Off,
    /// A story is closed once all of its tasks are closed.
    Close,
}

impl FollowTaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowTaskStatus::Off => "off",
            FollowTaskStatus::Close => "close",
        }
    }
}

impl fmt::Display for FollowTaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FollowTaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "off" => Ok(FollowTaskStatus::Off),
            "close" => Ok(FollowTaskStatus::Close),
            _ => Err(Error::validation(
                "story_follow_task_status",
                format!("'{s}' is not one of: off, close"),
            )),
        }
    }
}

/// Settings shared by every project.
///
/// Every field defaults, so a partial `[backlogs]` table deserializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacklogsConfig {
    /// Share sprints and product backlogs across project subtrees.
    pub sharing_enabled: bool,
    /// Hide closed shared sprints from master backlogs.
    pub disable_closed_sprints_to_master_backlogs: bool,
    /// Only count Monday to Friday as sprint days.
    pub skip_weekends: bool,
    /// Health checks excluded from scoring, by name.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub disabled_checks: BTreeSet<String>,
    pub story_follow_task_status: FollowTaskStatus,
}

impl BacklogsConfig {
    /// Enables sharing mode (builder pattern).
    pub fn with_sharing(mut self) -> Self {
        self.sharing_enabled = true;
        self
    }

    /// Returns true unless the named check was disabled.
    pub fn check_enabled(&self, name: &str) -> bool {
        !self.disabled_checks.contains(name)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
