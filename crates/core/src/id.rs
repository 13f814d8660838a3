// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Strongly typed record identifiers.
//!
//! Projects, versions and issues are all keyed by integers in the
//! collaborator store; the newtypes keep them from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Returns the raw integer key.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                $name(value)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Error> {
                let trimmed = s.trim().trim_start_matches('#');
                trimmed
                    .parse::<i64>()
                    .map($name)
                    .map_err(|_| Error::validation($label, format!("'{s}' is not an integer id")))
            }
        }
    };
}

record_id!(
    /// Identifier of a project.
    ProjectId,
    "project id"
);

record_id!(
    /// Identifier of a version (sprint).
    VersionId,
    "version id"
);

record_id!(
    /// Identifier of an issue (story or task).
    IssueId,
    "issue id"
);

impl VersionId {
    /// Sentinel meaning "no specific version", i.e. the generic backlog.
    pub const UNASSIGNED: VersionId = VersionId(0);

    /// Returns true for the unassigned sentinel.
    pub fn is_unassigned(self) -> bool {
        self == Self::UNASSIGNED
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
