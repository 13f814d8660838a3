// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for bl-core operations.

use thiserror::Error;

/// All possible errors that can occur in bl-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("invalid pivot: story {pivot} is not in {scope}\n  hint: stories can only be moved relative to stories of the same backlog")]
    InvalidPivot { pivot: String, scope: String },

    #[error("story {story} is not in {scope}")]
    NotInBacklog { story: String, scope: String },

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("version not found: {0}")]
    VersionNotFound(String),

    #[error("issue not found: {0}")]
    IssueNotFound(String),

    #[error("invalid version status: '{0}'\n  hint: valid statuses are: open, locked, closed")]
    InvalidStatus(String),

    #[error("invalid sharing: '{0}'\n  hint: valid values are: none, descendants, hierarchy, tree, system")]
    InvalidSharing(String),

    #[error("invalid story points: '{0}'\n  hint: use a non-negative number, 's' for small, '?' for unknown or '-' to clear")]
    InvalidPoints(String),

    #[error("invalid item kind: '{0}'\n  hint: valid kinds are: story, task")]
    InvalidItemKind(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] failure.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for bl-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
