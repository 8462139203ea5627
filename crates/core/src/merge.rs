// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Three-way union merge of history ledgers.
//!
//! Operations are immutable once written, so a merge never has to resolve
//! field conflicts: the result is the union of base, ours and theirs keyed
//! by operation id, ordered by timestamp. When the same id appears in more
//! than one input the later input wins (theirs over ours over base).
//!
//! This is what runs as the git merge driver for `history.jsonl`.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::ledger::parse_lines;
use crate::operation::Operation;

/// Operations keyed by id with a timestamp-ordered index.
#[derive(Debug, Default)]
pub struct OperationIndex {
    by_id: HashMap<String, Operation>,
    by_time: BTreeSet<(DateTime<Utc>, String)>,
}

impl OperationIndex {
    pub fn new() -> Self {
        OperationIndex::default()
    }

    /// Inserts `op`, replacing any operation with the same id.
    ///
    /// Returns true if an existing operation was replaced.
    pub fn insert(&mut self, op: Operation) -> bool {
        let key = (op.ts, op.id.clone());
        let replaced = match self.by_id.insert(op.id.clone(), op) {
            Some(previous) => {
                self.by_time.remove(&(previous.ts, previous.id));
                true
            }
            None => false,
        };
        self.by_time.insert(key);
        replaced
    }

    pub fn extend(&mut self, ops: impl IntoIterator<Item = Operation>) {
        for op in ops {
            self.insert(op);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Operation> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Operations ordered by (timestamp, id), oldest first.
    pub fn ascending(&self) -> impl Iterator<Item = &Operation> {
        self.by_time.iter().filter_map(|(_, id)| self.by_id.get(id))
    }

    /// Serializes the index as ledger text, one line per operation.
    ///
    /// An empty index yields an empty string.
    pub fn to_ledger_text(&self) -> Result<String> {
        let mut out = String::new();
        for op in self.ascending() {
            out.push_str(&op.to_line()?);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Merges three ledger texts. Malformed lines in any input are dropped.
pub fn merge_ledgers(base: &str, ours: &str, theirs: &str) -> Result<String> {
    let mut index = OperationIndex::new();
    index.extend(parse_lines(base));
    index.extend(parse_lines(ours));
    index.extend(parse_lines(theirs));
    index.to_ledger_text()
}

/// Counts reported after a file merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub base: usize,
    pub ours: usize,
    pub theirs: usize,
    pub merged: usize,
}

/// Merges three ledger files into `output`.
///
/// Missing inputs are treated as empty, matching a file that is absent on
/// one side of the merge.
pub fn merge_files(base: &Path, ours: &Path, theirs: &Path, output: &Path) -> Result<MergeStats> {
    let base_ops = read_lossy(base)?;
    let ours_ops = read_lossy(ours)?;
    let theirs_ops = read_lossy(theirs)?;
    let stats_in = (base_ops.len(), ours_ops.len(), theirs_ops.len());

    let mut index = OperationIndex::new();
    index.extend(base_ops);
    index.extend(ours_ops);
    index.extend(theirs_ops);
    fs::write(output, index.to_ledger_text()?)?;

    let stats = MergeStats {
        base: stats_in.0,
        ours: stats_in.1,
        theirs: stats_in.2,
        merged: index.len(),
    };
    tracing::debug!(?stats, output = %output.display(), "merged history ledgers");
    Ok(stats)
}

fn read_lossy(path: &Path) -> Result<Vec<Operation>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let bytes = fs::read(path)?;
    Ok(parse_lines(&String::from_utf8_lossy(&bytes)))
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
