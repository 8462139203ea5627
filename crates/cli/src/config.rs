// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Locating the repository and loading its configuration.
//!
//! bb keeps its state in `.betterbeads/` at the repository root. Settings
//! live in `.betterbeads/config.toml`; every key is optional:
//!
//! ```toml
//! [dependencies]
//! section_header = "## Dependencies"
//! separator = "---"
//!
//! [blocked]
//! labels = ["blocked", "on-hold"]
//! statuses = ["Blocked"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use bb_core::{Config, STATE_DIR};

use crate::env;
use crate::error::{Error, Result};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Finds the repository root for the current directory.
///
/// `BB_ROOT` takes precedence over discovery.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Some(root) = env::root_override() {
        return Ok(root);
    }
    find_repo_root_from(&std::env::current_dir()?)
}

/// Walks up from `start` to the first directory holding `.betterbeads/`
/// or `.git`.
pub fn find_repo_root_from(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(STATE_DIR).is_dir() || current.join(".git").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(Error::NotInRepository);
        }
    }
}

pub fn state_dir(root: &Path) -> PathBuf {
    root.join(STATE_DIR)
}

/// Creates `.betterbeads/` if absent. Returns true if it was created.
pub fn init_state_dir(root: &Path) -> Result<bool> {
    let dir = state_dir(root);
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(&dir)?;
    Ok(true)
}

/// Loads `.betterbeads/config.toml`, falling back to defaults when absent.
pub fn load_config(root: &Path) -> Result<Config> {
    let path = state_dir(root).join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
