// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only history ledger.
//!
//! The ledger is a JSONL file at `.betterbeads/history.jsonl`, one
//! [`Operation`] per line. Appends open the file in append mode and sync it
//! before returning. Reads are tolerant: blank or malformed lines are
//! skipped so a damaged line never hides the rest of the history.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::operation::Operation;

/// Directory holding bb state inside a repository.
pub const STATE_DIR: &str = ".betterbeads";

/// Ledger file name inside [`STATE_DIR`].
pub const LEDGER_FILE: &str = "history.jsonl";

/// Selection applied by [`Ledger::read`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Only operations on this issue or PR number.
    pub number: Option<u64>,
    /// Only operations on this repository.
    pub target: Option<String>,
    /// Only operations at or after this instant.
    pub since: Option<DateTime<Utc>>,
    /// Keep at most this many of the newest matches. Zero means no limit.
    pub limit: Option<usize>,
}

impl HistoryFilter {
    pub fn matches(&self, op: &Operation) -> bool {
        self.number.is_none_or(|n| op.number == n)
            && self.target.as_deref().is_none_or(|t| op.target == t)
            && self.since.is_none_or(|since| op.ts >= since)
    }
}

/// Handle on a ledger file. The file need not exist yet.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn open(path: impl AsRef<Path>) -> Self {
        Ledger {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The ledger of the repository rooted at `root`.
    pub fn in_repo(root: impl AsRef<Path>) -> Self {
        Ledger::open(root.as_ref().join(STATE_DIR).join(LEDGER_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one operation, creating the state directory if needed.
    pub fn append(&self, op: &Operation) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let line = op.to_line()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        file.sync_all()?;

        tracing::info!(
            id = %op.id,
            action = %op.action,
            target = %op.target,
            num = op.number,
            dry_run = op.dry_run,
            "recorded operation"
        );
        Ok(())
    }

    /// Every well-formed operation, in file order.
    pub fn read_all(&self) -> Result<Vec<Operation>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path)?;
        Ok(parse_lines(&String::from_utf8_lossy(&bytes)))
    }

    /// Operations matching `filter`, newest first, truncated to its limit.
    pub fn read(&self, filter: &HistoryFilter) -> Result<Vec<Operation>> {
        let mut ops: Vec<Operation> = self
            .read_all()?
            .into_iter()
            .filter(|op| filter.matches(op))
            .collect();
        ops.sort_by(|a, b| b.ts.cmp(&a.ts));
        if let Some(limit) = filter.limit.filter(|limit| *limit > 0) {
            ops.truncate(limit);
        }
        Ok(ops)
    }

    /// The first operation in file order with the given id.
    pub fn get(&self, id: &str) -> Result<Option<Operation>> {
        Ok(self.read_all()?.into_iter().find(|op| op.id == id))
    }
}

/// Parses ledger text, skipping blank and malformed lines.
pub fn parse_lines(text: &str) -> Vec<Operation> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match Operation::from_line(line) {
            Ok(op) => Some(op),
            Err(e) => {
                tracing::debug!(line = index + 1, error = %e, "skipping malformed ledger line");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
