// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sets of version identifiers used by project settings.
//!
//! A [`VersionSet`] may hold the sentinel [`VersionId::UNASSIGNED`] (`0`),
//! which stands for "items with no assigned version" rather than a real
//! version. The sentinel never matches a stored version.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::id::VersionId;

/// An ordered set of version ids, possibly containing the unassigned sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct VersionSet(BTreeSet<VersionId>);

impl VersionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        VersionSet(BTreeSet::new())
    }

    /// The default backlog designation: only unassigned items.
    pub fn unassigned() -> Self {
        VersionSet(BTreeSet::from([VersionId::UNASSIGNED]))
    }

    /// Builds a set from raw integers, rejecting negative ids.
    pub fn from_ids<I>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut set = BTreeSet::new();
        for id in ids {
            if id < 0 {
                return Err(Error::validation(
                    "version list",
                    format!("must be a list of version ids, got {id}"),
                ));
            }
            set.insert(VersionId(id));
        }
        Ok(VersionSet(set))
    }

    /// Parses a comma-separated id list such as `"0,12,15"`.
    pub fn parse_list(input: &str) -> Result<Self> {
        let mut ids = Vec::new();
        for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let id = part.parse::<i64>().map_err(|_| {
                Error::validation(
                    "version list",
                    format!("must be a list of version ids, got '{part}'"),
                )
            })?;
            ids.push(id);
        }
        Self::from_ids(ids)
    }

    pub fn contains(&self, id: VersionId) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn insert(&mut self, id: VersionId) -> bool {
        self.0.insert(id)
    }

    /// Returns true when the set is exactly `{0}`.
    pub fn is_only_unassigned(&self) -> bool {
        self.0.len() == 1 && self.0.contains(&VersionId::UNASSIGNED)
    }

    /// Returns true when the sentinel is a member.
    pub fn includes_unassigned(&self) -> bool {
        self.0.contains(&VersionId::UNASSIGNED)
    }

    /// Iterates over the real (non-sentinel) versions.
    pub fn specific(&self) -> impl Iterator<Item = VersionId> + '_ {
        self.0.iter().copied().filter(|id| !id.is_unassigned())
    }

    pub fn iter(&self) -> impl Iterator<Item = VersionId> + '_ {
        self.0.iter().copied()
    }

    /// Adds every member of `other` to this set.
    pub fn extend_from(&mut self, other: &VersionSet) {
        self.0.extend(other.0.iter().copied());
    }
}

impl FromIterator<VersionId> for VersionSet {
    fn from_iter<T: IntoIterator<Item = VersionId>>(iter: T) -> Self {
        VersionSet(iter.into_iter().collect())
    }
}

impl TryFrom<Vec<i64>> for VersionSet {
    type Error = Error;

    fn try_from(value: Vec<i64>) -> Result<Self> {
        Self::from_ids(value)
    }
}

impl From<VersionSet> for Vec<i64> {
    fn from(value: VersionSet) -> Self {
        value.0.into_iter().map(VersionId::get).collect()
    }
}

impl fmt::Display for VersionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.0.iter().map(|id| id.to_string()).collect();
        write!(f, "{}", ids.join(","))
    }
}

#[cfg(test)]
#[path = "version_set_tests.rs"]
mod tests;
