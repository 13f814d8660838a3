// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration management.
//!
//! Configuration is stored in `.backlogs/config.toml` and includes:
//! - `database`: Optional path to store the database elsewhere
//! - `[backlogs]`: Behaviour switches passed to every resolver and builder

use bl_core::BacklogsConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const WORK_DIR_NAME: &str = ".backlogs";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "backlogs.db";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Project configuration stored in `.backlogs/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Optional path for the database (relative to project root or absolute).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    pub backlogs: BacklogsConfig,
}

impl Config {
    /// Loads configuration from the given `.backlogs/` directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let content = fs::read_to_string(work_dir.join(CONFIG_FILE_NAME))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to the given `.backlogs/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(work_dir.join(CONFIG_FILE_NAME), content)?;
        Ok(())
    }
}

/// Find the .backlogs directory by walking up from the current directory
pub fn find_work_dir() -> Result<PathBuf> {
    find_work_dir_from(&std::env::current_dir()?)
}

/// Find the .backlogs directory by walking up from `start`
pub fn find_work_dir_from(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.join(CONFIG_FILE_NAME).is_file() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Get the database path from config
pub fn get_db_path(work_dir: &Path, config: &Config) -> PathBuf {
    match &config.database {
        Some(database) => {
            let path = Path::new(database);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                // Relative to work_dir's parent (the project root)
                work_dir.parent().unwrap_or(work_dir).join(path)
            }
        }
        None => work_dir.join(DB_FILE_NAME),
    }
}

/// Initialize a new .backlogs directory at the given path
pub fn init_work_dir(path: &Path, config: &Config) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.join(CONFIG_FILE_NAME).exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    fs::create_dir_all(&work_dir)?;
    config.save(&work_dir)?;
    write_gitignore(&work_dir)?;

    Ok(work_dir)
}

/// Write a .gitignore file that keeps the database out of version control.
pub fn write_gitignore(work_dir: &Path) -> Result<()> {
    let content = format!("# Database\n{DB_FILE_NAME}\n{DB_FILE_NAME}-wal\n{DB_FILE_NAME}-shm\n");
    fs::write(work_dir.join(GITIGNORE_FILE_NAME), content)?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
