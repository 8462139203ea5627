// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reverting recorded operations.
//!
//! An [`UndoPlan`] is derived purely from an operation's before/after
//! snapshots. Applying it drives a [`Tracker`] and records the inverse
//! operation (`undo:<id>`, snapshots swapped) in the ledger, so undos are
//! themselves part of the history.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::operation::{Fields, Operation, UNDO_PREFIX};
use crate::tracker::{EntityEdit, Tracker};

const INVERTIBLE_FIELDS: [&str; 5] = ["state", "labels", "assignees", "title", "body"];

/// State change that reverts a recorded transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateAction {
    Reopen,
    Close,
}

/// Tracker calls that revert one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UndoPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateAction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_labels: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove_labels: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_assignees: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove_assignees: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Recorded fields this plan cannot revert.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unsupported: Vec<String>,
}

impl UndoPlan {
    pub fn for_operation(op: &Operation) -> Self {
        let mut plan = UndoPlan::default();
        let before = &op.before;
        let after = &op.after;

        if let (Some(from), Some(to)) = (state_of(before), state_of(after)) {
            match (from.as_str(), to.as_str()) {
                ("open", "closed") => plan.state = Some(StateAction::Reopen),
                ("closed", "open") => plan.state = Some(StateAction::Close),
                (a, b) if a == b => {}
                _ => plan.unsupported.push("state".to_string()),
            }
        } else if before.contains_key("state") || after.contains_key("state") {
            plan.unsupported.push("state".to_string());
        }

        if before.contains_key("labels") || after.contains_key("labels") {
            let (add, remove) = set_delta(before, after, "labels");
            plan.add_labels = add;
            plan.remove_labels = remove;
        }
        if before.contains_key("assignees") || after.contains_key("assignees") {
            let (add, remove) = set_delta(before, after, "assignees");
            plan.add_assignees = add;
            plan.remove_assignees = remove;
        }

        for (field, slot) in [("title", &mut plan.title), ("body", &mut plan.body)] {
            match before.get(field) {
                Some(Value::String(s)) => *slot = Some(s.clone()),
                Some(Value::Null) => *slot = Some(String::new()),
                Some(_) => plan.unsupported.push(field.to_string()),
                None => {}
            }
        }

        let extra: BTreeSet<&String> = before
            .keys()
            .chain(after.keys())
            .filter(|k| !INVERTIBLE_FIELDS.contains(&k.as_str()))
            .collect();
        plan.unsupported.extend(extra.into_iter().cloned());
        plan
    }

    /// True if applying the plan would make no tracker calls.
    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.edit().is_empty()
    }

    /// The field edit part of the plan.
    pub fn edit(&self) -> EntityEdit {
        EntityEdit {
            title: self.title.clone(),
            body: self.body.clone(),
            add_labels: self.add_labels.clone(),
            remove_labels: self.remove_labels.clone(),
            add_assignees: self.add_assignees.clone(),
            remove_assignees: self.remove_assignees.clone(),
        }
    }
}

fn state_of(fields: &Fields) -> Option<String> {
    fields
        .get("state")
        .and_then(Value::as_str)
        .map(str::to_lowercase)
}

fn string_set(fields: &Fields, key: &str) -> BTreeSet<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Returns (to add back, to remove) for a set-valued field.
fn set_delta(before: &Fields, after: &Fields, key: &str) -> (Vec<String>, Vec<String>) {
    let old = string_set(before, key);
    let new = string_set(after, key);
    let removed = old.difference(&new).cloned().collect();
    let added = new.difference(&old).cloned().collect();
    (removed, added)
}

/// The operation recorded when `op` is reverted.
pub fn inverse_operation(op: &Operation) -> Operation {
    Operation::new(
        op.target.clone(),
        op.entity_type,
        op.number,
        format!("{UNDO_PREFIX}{}", op.id),
    )
    .with_change(op.after.clone(), op.before.clone())
}

/// Operations eligible for undo, in input order.
///
/// Dry runs are dropped, as is any operation already reverted by an undo
/// still in effect. Undos themselves stay eligible, so reverting an undo
/// makes its original eligible again.
pub fn candidates(ops: Vec<Operation>) -> Vec<Operation> {
    let reverted = reverted_ids(&ops);
    ops.into_iter()
        .filter(|op| !op.dry_run && !reverted.contains(op.id.as_str()))
        .collect()
}

/// Ids reverted by an undo that has not itself been reverted.
fn reverted_ids(ops: &[Operation]) -> HashSet<String> {
    let mut newest_first: Vec<&Operation> = ops.iter().filter(|op| !op.dry_run).collect();
    newest_first.sort_by(|a, b| b.ts.cmp(&a.ts));

    let mut reverted = HashSet::new();
    for op in newest_first {
        if reverted.contains(op.id.as_str()) {
            continue;
        }
        if let Some(target) = op.undoes() {
            reverted.insert(target.to_string());
        }
    }
    reverted
}

/// Candidates recorded at or after `since`, newest first.
pub fn candidates_since(ops: Vec<Operation>, since: DateTime<Utc>) -> Vec<Operation> {
    let mut selected: Vec<Operation> = candidates(ops)
        .into_iter()
        .filter(|op| op.ts >= since)
        .collect();
    selected.sort_by(|a, b| b.ts.cmp(&a.ts));
    selected
}

/// Reverts `op` through `tracker` and records the inverse in `ledger`.
///
/// The state change runs before field edits. Nothing is recorded if a
/// tracker call fails.
pub fn apply<T: Tracker + ?Sized>(
    tracker: &mut T,
    ledger: &Ledger,
    op: &Operation,
) -> Result<Operation> {
    let plan = UndoPlan::for_operation(op);
    let entity = op.entity();

    if !plan.unsupported.is_empty() {
        tracing::warn!(id = %op.id, fields = ?plan.unsupported, "fields cannot be reverted");
    }

    match plan.state {
        Some(StateAction::Reopen) => tracker.reopen(&entity)?,
        Some(StateAction::Close) => tracker.close(&entity)?,
        None => {}
    }
    let edit = plan.edit();
    if !edit.is_empty() {
        tracker.edit(&entity, &edit)?;
    }

    let undo = inverse_operation(op);
    ledger.append(&undo)?;
    tracing::info!(id = %op.id, undo = %undo.id, "reverted operation");
    Ok(undo)
}

#[cfg(test)]
#[path = "undo_tests.rs"]
mod tests;
