// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Projects and the project hierarchy.
//!
//! [`ProjectTree`] stores projects in an arena and precomputes a pre-order
//! numbering once, so a subtree is a contiguous slice of that order and
//! ancestry checks are range comparisons instead of recursive walks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::id::ProjectId;

/// A project as supplied by the surrounding application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Parent project, `None` for roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ProjectId>,
    /// Archived or closed projects are inactive.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Project {
    pub fn new(id: i64, name: &str) -> Self {
        Project {
            id: ProjectId(id),
            name: name.to_string(),
            parent: None,
            active: true,
        }
    }

    /// Sets the parent project (builder pattern).
    pub fn with_parent(mut self, parent: i64) -> Self {
        self.parent = Some(ProjectId(parent));
        self
    }

    /// Marks the project inactive (builder pattern).
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Arena-backed project hierarchy with a precomputed pre-order index.
#[derive(Debug, Clone, Default)]
pub struct ProjectTree {
    projects: Vec<Project>,
    index: HashMap<ProjectId, usize>,
    /// Arena slots in pre-order.
    preorder: Vec<usize>,
    /// Pre-order position of each arena slot.
    pre: Vec<usize>,
    /// Subtree size (including the node) of each arena slot.
    size: Vec<usize>,
}

impl ProjectTree {
    /// Builds the tree, failing on unknown parents or parent cycles.
    pub fn new(projects: Vec<Project>) -> Result<Self> {
        let mut index = HashMap::with_capacity(projects.len());
        for (slot, project) in projects.iter().enumerate() {
            if index.insert(project.id, slot).is_some() {
                return Err(Error::validation(
                    "project tree",
                    format!("duplicate project {}", project.id),
                ));
            }
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); projects.len()];
        let mut roots = Vec::new();
        for (slot, project) in projects.iter().enumerate() {
            match project.parent {
                None => roots.push(slot),
                Some(parent) => {
                    let parent_slot = *index
                        .get(&parent)
                        .ok_or_else(|| Error::ProjectNotFound(parent.to_string()))?;
                    children[parent_slot].push(slot);
                }
            }
        }
        let by_id = |slot: &usize| projects[*slot].id;
        roots.sort_by_key(by_id);
        for list in &mut children {
            list.sort_by_key(by_id);
        }

        let mut preorder = Vec::with_capacity(projects.len());
        let mut pre = vec![usize::MAX; projects.len()];
        let mut size = vec![1; projects.len()];
        // Iterative DFS; a slot is pushed again as "exit" to close its subtree.
        let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&s| (s, false)).collect();
        while let Some((slot, exiting)) = stack.pop() {
            if exiting {
                size[slot] = preorder.len() - pre[slot];
                continue;
            }
            pre[slot] = preorder.len();
            preorder.push(slot);
            stack.push((slot, true));
            for &child in children[slot].iter().rev() {
                stack.push((child, false));
            }
        }

        if preorder.len() != projects.len() {
            return Err(Error::validation(
                "project tree",
                "parent links form a cycle",
            ));
        }

        Ok(ProjectTree {
            projects,
            index,
            preorder,
            pre,
            size,
        })
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.index.get(&id).map(|&slot| &self.projects[slot])
    }

    /// Looks up a project, failing with [`Error::ProjectNotFound`].
    pub fn project(&self, id: ProjectId) -> Result<&Project> {
        self.get(id)
            .ok_or_else(|| Error::ProjectNotFound(id.to_string()))
    }

    /// All projects in pre-order (parents before children, siblings by id).
    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.preorder.iter().map(|&slot| &self.projects[slot])
    }

    fn slot(&self, id: ProjectId) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or_else(|| Error::ProjectNotFound(id.to_string()))
    }

    /// The project followed by all of its descendants, in pre-order.
    pub fn self_and_descendants(&self, id: ProjectId) -> Result<Vec<&Project>> {
        let slot = self.slot(id)?;
        let start = self.pre[slot];
        Ok(self.preorder[start..start + self.size[slot]]
            .iter()
            .map(|&s| &self.projects[s])
            .collect())
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self, id: ProjectId) -> Result<Vec<&Project>> {
        let mut current = self.project(id)?;
        let mut out = Vec::new();
        while let Some(parent) = current.parent {
            current = self.project(parent)?;
            out.push(current);
        }
        Ok(out)
    }

    /// The root of the tree containing `id`.
    pub fn root_of(&self, id: ProjectId) -> Result<ProjectId> {
        Ok(self
            .ancestors(id)?
            .last()
            .map(|p| p.id)
            .unwrap_or(id))
    }

    /// True when `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: ProjectId, id: ProjectId) -> Result<bool> {
        let a = self.slot(ancestor)?;
        let b = self.slot(id)?;
        Ok(self.pre[a] < self.pre[b] && self.pre[b] < self.pre[a] + self.size[a])
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
