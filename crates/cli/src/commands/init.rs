// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use bl_core::Database;

use crate::config::{get_db_path, init_work_dir, Config};
use crate::error::Result;

pub fn run(path: Option<String>, sharing: bool) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };

    let work_dir = run_impl(&target_path, sharing)?;
    println!("Initialized backlogs at {}", work_dir.display());
    if sharing {
        println!("Sharing: enabled");
    }
    Ok(())
}

/// Create `.backlogs/` with its config and an empty, migrated database.
pub(crate) fn run_impl(target_path: &Path, sharing: bool) -> Result<PathBuf> {
    let mut config = Config::default();
    config.backlogs.sharing_enabled = sharing;

    let work_dir = init_work_dir(target_path, &config)?;
    Database::open(&get_db_path(&work_dir, &config))?;
    tracing::info!(path = %work_dir.display(), sharing, "initialized");
    Ok(work_dir)
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
