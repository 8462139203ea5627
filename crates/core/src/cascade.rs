// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Checking off references to a closed issue.
//!
//! When issue `N` closes, every open issue listing `#N` as a task item gets
//! its checkbox ticked. Each changed body is recorded as a `body:auto-check`
//! operation.

use serde::Serialize;

use crate::body::{set_task_complete, BodyChange};
use crate::dependency::DependencyRef;
use crate::ledger::Ledger;
use crate::operation::Operation;
use crate::tracker::{EntityEdit, EntityRef, EntityType, Tracker};

pub const AUTO_CHECK_ACTION: &str = "body:auto-check";

/// Outcome of a cascade. Failures are collected, never raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    /// Issues whose body was (or in dry-run would be) updated.
    pub updated: Vec<u64>,
    /// Per-issue failures as (number, message).
    pub errors: Vec<(u64, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_error: Option<String>,
}

pub fn check_off_references<T: Tracker + ?Sized>(
    tracker: &mut T,
    ledger: &Ledger,
    repo: &str,
    number: u64,
    dry_run: bool,
) -> CascadeReport {
    let mut report = CascadeReport::default();
    let referencing = match tracker.search_referencing(repo, number) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(repo, number, error = %e, "reference search failed");
            report.search_error = Some(e.to_string());
            return report;
        }
    };

    let dep = DependencyRef::local(number);
    for other in referencing.into_iter().filter(|n| *n != number) {
        let entity = EntityRef::issue(repo, other);
        match check_off_one(tracker, ledger, &entity, &dep, dry_run) {
            Ok(true) => report.updated.push(other),
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(%entity, error = %e, "could not check off reference");
                report.errors.push((other, e.to_string()));
            }
        }
    }
    report
}

fn check_off_one<T: Tracker + ?Sized>(
    tracker: &mut T,
    ledger: &Ledger,
    entity: &EntityRef,
    dep: &DependencyRef,
    dry_run: bool,
) -> crate::Result<bool> {
    let current = tracker.view(entity)?;
    let change = BodyChange::new(
        current.body.clone(),
        set_task_complete(&current.body, dep, true),
    );
    if change.is_noop() {
        return Ok(false);
    }
    if !dry_run {
        tracker.edit(entity, &EntityEdit::body(change.after.clone()))?;
    }
    let (before, after) = change.to_fields();
    let op = Operation::new(
        entity.repo.clone(),
        EntityType::Issue,
        entity.number,
        AUTO_CHECK_ACTION,
    )
    .with_change(before, after)
    .with_dry_run(dry_run);
    ledger.append(&op)?;
    Ok(true)
}

#[cfg(test)]
#[path = "cascade_tests.rs"]
mod tests;
