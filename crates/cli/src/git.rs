// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git integration: merge driver registration and commit timestamps.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use bb_core::operation::parse_timestamp;
use bb_core::{LEDGER_FILE, STATE_DIR};
use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// Name of the merge driver in git config and `.gitattributes`.
pub const MERGE_DRIVER: &str = "betterbeads-log";

const MERGE_DRIVER_NAME: &str = "bb history ledger merge";

/// Git substitutes `%O %A %B`; the merged result must land in `%A`.
const MERGE_DRIVER_COMMAND: &str = "bb merge-log %O %A %B";

/// The `.gitattributes` line routing the ledger through the driver.
pub fn attributes_line() -> String {
    format!("{STATE_DIR}/{LEDGER_FILE} merge={MERGE_DRIVER}")
}

fn git(repo: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .current_dir(repo)
        .args(args)
        .output()
        .map_err(|e| Error::Git(format!("failed to run git: {}", e)))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::Git(stderr));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Find the .git directory for a repository.
pub fn find_git_dir(from: &Path) -> Result<PathBuf> {
    let git_dir = git(from, &["rev-parse", "--git-dir"])
        .map_err(|_| Error::Git("not a git repository".to_string()))?;
    let path = PathBuf::from(&git_dir);
    Ok(if path.is_absolute() {
        path
    } else {
        from.join(path)
    })
}

/// Appends the ledger's merge attribute to `.gitattributes` unless present.
///
/// Returns true if the file was changed.
pub fn ensure_gitattributes(root: &Path) -> Result<bool> {
    let path = root.join(".gitattributes");
    let line = attributes_line();
    let existing = if path.exists() {
        fs::read_to_string(&path)?
    } else {
        String::new()
    };
    if existing.lines().any(|l| l.trim() == line) {
        return Ok(false);
    }

    let mut content = existing;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(&line);
    content.push('\n');
    fs::write(&path, content)?;
    Ok(true)
}

/// Registers the ledger merge driver in the repository's git config and
/// `.gitattributes`. Safe to run repeatedly.
pub fn install_merge_driver(root: &Path) -> Result<bool> {
    find_git_dir(root)?;
    let attributes_added = ensure_gitattributes(root)?;
    git(
        root,
        &["config", &format!("merge.{MERGE_DRIVER}.name"), MERGE_DRIVER_NAME],
    )?;
    git(
        root,
        &["config", &format!("merge.{MERGE_DRIVER}.driver"), MERGE_DRIVER_COMMAND],
    )?;
    tracing::info!(root = %root.display(), attributes_added, "installed merge driver");
    Ok(attributes_added)
}

/// True if the merge driver is configured in git.
pub fn merge_driver_installed(root: &Path) -> bool {
    git(root, &["config", "--get", &format!("merge.{MERGE_DRIVER}.driver")])
        .is_ok_and(|driver| driver == MERGE_DRIVER_COMMAND)
}

/// Committer timestamp of `HEAD`.
pub fn last_commit_time(root: &Path) -> Result<DateTime<Utc>> {
    let raw = git(root, &["log", "-1", "--format=%cI"])
        .map_err(|_| Error::Git("no git commits found".to_string()))?;
    if raw.is_empty() {
        return Err(Error::Git("no git commits found".to_string()));
    }
    Ok(parse_timestamp(&raw)?)
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
