// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `bb undo`: plans the tracker calls that would revert operations.
//!
//! The CLI has no tracker client, so plans are printed rather than applied.

use bb_core::undo::{candidates, candidates_since};
use bb_core::{EntityType, HistoryFilter, Ledger, Operation, UndoPlan};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::git::last_commit_time;

use super::{open_ledger, print_json};

/// Which operations to plan an undo for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Selection {
    Id(String),
    Last(usize),
    Since(DateTime<Utc>),
}

/// One planned undo, as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct UndoPreview {
    pub dry_run: bool,
    pub undoing: String,
    pub target: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub number: u64,
    pub undo_changes: UndoPlan,
}

impl From<&Operation> for UndoPreview {
    fn from(op: &Operation) -> Self {
        UndoPreview {
            dry_run: true,
            undoing: op.id.clone(),
            target: op.target.clone(),
            entity_type: op.entity_type,
            number: op.number,
            undo_changes: UndoPlan::for_operation(op),
        }
    }
}

pub fn run(id: Option<String>, last: usize, since_commit: bool) -> Result<()> {
    let (ledger, root) = open_ledger()?;
    let selection = match (id, since_commit) {
        (Some(id), _) => Selection::Id(id),
        (None, true) => Selection::Since(last_commit_time(&root)?),
        (None, false) => Selection::Last(last),
    };

    let previews = run_impl(&ledger, &selection)?;
    if previews.is_empty() {
        if let Selection::Since(ts) = selection {
            eprintln!("No operations to undo since last commit ({})", ts.to_rfc3339());
        }
    }
    for preview in &previews {
        if !preview.undo_changes.unsupported.is_empty() {
            eprintln!(
                "warning: {} records fields that cannot be reverted: {}",
                preview.undoing,
                preview.undo_changes.unsupported.join(", ")
            );
        }
    }
    print_json(&previews)
}

/// Internal implementation that accepts the ledger for testing.
pub(crate) fn run_impl(ledger: &Ledger, selection: &Selection) -> Result<Vec<UndoPreview>> {
    let ops = select(ledger, selection)?;
    Ok(ops.iter().map(UndoPreview::from).collect())
}

pub(crate) fn select(ledger: &Ledger, selection: &Selection) -> Result<Vec<Operation>> {
    match selection {
        Selection::Id(id) => match ledger.get(id)? {
            Some(op) => Ok(vec![op]),
            None => Err(Error::OperationNotFound(id.clone())),
        },
        Selection::Last(n) => {
            let newest_first = ledger.read(&HistoryFilter::default())?;
            let picked: Vec<Operation> = candidates(newest_first).into_iter().take(*n).collect();
            if picked.is_empty() {
                return Err(Error::NothingToUndo);
            }
            Ok(picked)
        }
        Selection::Since(ts) => Ok(candidates_since(ledger.read_all()?, *ts)),
    }
}

#[cfg(test)]
#[path = "undo_tests.rs"]
mod tests;
