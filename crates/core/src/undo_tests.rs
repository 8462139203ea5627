// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::operation::parse_timestamp;
use crate::tracker::testing::MemoryTracker;
use crate::tracker::{EntityState, EntityType};
use serde_json::json;
use tempfile::TempDir;

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}

fn op(action: &str, before: Value, after: Value) -> Operation {
    Operation::new("acme/app", EntityType::Issue, 5, action)
        .with_change(fields(before), fields(after))
}

#[test]
fn close_is_reverted_by_reopen() {
    let plan = UndoPlan::for_operation(&op(
        "close",
        json!({"state": "open"}),
        json!({"state": "closed"}),
    ));
    assert_eq!(plan.state, Some(StateAction::Reopen));
    assert!(plan.edit().is_empty());
}

#[test]
fn reopen_is_reverted_by_close() {
    let plan = UndoPlan::for_operation(&op(
        "reopen",
        json!({"state": "CLOSED"}),
        json!({"state": "OPEN"}),
    ));
    assert_eq!(plan.state, Some(StateAction::Close));
}

#[test]
fn merged_state_cannot_be_reverted() {
    let plan = UndoPlan::for_operation(&op(
        "merge",
        json!({"state": "open"}),
        json!({"state": "merged"}),
    ));
    assert_eq!(plan.state, None);
    assert_eq!(plan.unsupported, vec!["state"]);
}

#[test]
fn label_delta_is_inverted() {
    let plan = UndoPlan::for_operation(&op(
        "label",
        json!({"labels": ["bug", "p1"]}),
        json!({"labels": ["bug", "blocked"]}),
    ));
    assert_eq!(plan.add_labels, vec!["p1"]);
    assert_eq!(plan.remove_labels, vec!["blocked"]);
}

#[test]
fn assignee_added_from_nothing() {
    let plan = UndoPlan::for_operation(&op("assign", json!({}), json!({"assignees": ["ada"]})));
    assert_eq!(plan.remove_assignees, vec!["ada"]);
    assert!(plan.add_assignees.is_empty());
}

#[test]
fn title_and_body_restore_before_values() {
    let plan = UndoPlan::for_operation(&op(
        "edit",
        json!({"title": "Old", "body": null}),
        json!({"title": "New", "body": "text"}),
    ));
    assert_eq!(plan.title.as_deref(), Some("Old"));
    assert_eq!(plan.body.as_deref(), Some(""));
}

#[test]
fn unknown_fields_are_reported() {
    let plan = UndoPlan::for_operation(&op(
        "project",
        json!({"project_status": "Todo"}),
        json!({"project_status": "Done"}),
    ));
    assert!(plan.is_empty());
    assert_eq!(plan.unsupported, vec!["project_status"]);
}

#[test]
fn plan_serializes_compactly() {
    let plan = UndoPlan::for_operation(&op(
        "close",
        json!({"state": "open"}),
        json!({"state": "closed"}),
    ));
    assert_eq!(serde_json::to_string(&plan).unwrap(), r#"{"state":"reopen"}"#);
}

#[test]
fn inverse_swaps_snapshots() {
    let original = op("label", json!({"labels": []}), json!({"labels": ["bug"]}));
    let undo = inverse_operation(&original);
    assert_eq!(undo.action, format!("undo:{}", original.id));
    assert_eq!(undo.before, original.after);
    assert_eq!(undo.after, original.before);
    assert_eq!(undo.entity(), original.entity());
    assert_ne!(undo.id, original.id);
    assert!(!undo.dry_run);
}

fn op_at(ts: &str, action: &str) -> Operation {
    let mut op = op(action, json!({}), json!({}));
    op.ts = parse_timestamp(ts).unwrap();
    op
}

fn undo_at(ts: &str, target: &Operation) -> Operation {
    let mut undo = inverse_operation(target);
    undo.ts = parse_timestamp(ts).unwrap();
    undo
}

#[test]
fn candidates_skip_dry_runs() {
    let real = op("label", json!({}), json!({}));
    let dry = op("label", json!({}), json!({})).with_dry_run(true);
    assert_eq!(candidates(vec![real.clone(), dry]), vec![real]);
}

#[test]
fn reverted_operation_is_replaced_by_its_undo() {
    let close = op_at("2026-03-01T10:00:00Z", "close");
    let undo = undo_at("2026-03-01T11:00:00Z", &close);
    let kept = candidates(vec![undo.clone(), close]);
    assert_eq!(kept, vec![undo]);
}

#[test]
fn reverting_an_undo_restores_the_original() {
    let close = op_at("2026-03-01T10:00:00Z", "close");
    let undo = undo_at("2026-03-01T11:00:00Z", &close);
    let redo = undo_at("2026-03-01T12:00:00Z", &undo);
    let kept = candidates(vec![close.clone(), undo, redo.clone()]);
    assert_eq!(kept, vec![close, redo]);
}

#[test]
fn dry_run_undo_does_not_revert() {
    let close = op_at("2026-03-01T10:00:00Z", "close");
    let dry = undo_at("2026-03-01T11:00:00Z", &close).with_dry_run(true);
    assert_eq!(candidates(vec![close.clone(), dry]), vec![close]);
}

#[test]
fn candidates_since_filters_and_orders() {
    let mut old = op("a", json!({}), json!({}));
    old.ts = parse_timestamp("2026-01-01T00:00:00Z").unwrap();
    let mut mid = op("b", json!({}), json!({}));
    mid.ts = parse_timestamp("2026-01-02T00:00:00Z").unwrap();
    let mut new = op("c", json!({}), json!({}));
    new.ts = parse_timestamp("2026-01-03T00:00:00Z").unwrap();

    let since = parse_timestamp("2026-01-02T00:00:00Z").unwrap();
    let picked: Vec<String> = candidates_since(vec![old, mid, new], since)
        .into_iter()
        .map(|o| o.action)
        .collect();
    assert_eq!(picked, vec!["c", "b"]);
}

#[test]
fn apply_drives_tracker_and_records_inverse() {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::in_repo(dir.path());
    let mut tracker = MemoryTracker::new().with_issue("acme/app", 5, "body");
    tracker.entities.get_mut(&("acme/app".to_string(), 5)).unwrap().state = EntityState::Closed;
    tracker
        .entities
        .get_mut(&("acme/app".to_string(), 5))
        .unwrap()
        .labels = vec!["wontfix".into()];

    let original = op(
        "close",
        json!({"state": "open", "labels": []}),
        json!({"state": "closed", "labels": ["wontfix"]}),
    );
    let undo = apply(&mut tracker, &ledger, &original).unwrap();

    assert_eq!(tracker.calls, vec!["reopen 5", "edit 5"]);
    let entity = tracker.entity("acme/app", 5);
    assert_eq!(entity.state, EntityState::Open);
    assert!(entity.labels.is_empty());

    let recorded = ledger.read_all().unwrap();
    assert_eq!(recorded, vec![undo]);
    assert!(recorded[0].is_undo());
}

#[test]
fn apply_records_nothing_when_tracker_fails() {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::in_repo(dir.path());
    let mut tracker = MemoryTracker::new().with_issue("acme/app", 5, "body");
    tracker.fail_edits = true;

    let original = op("edit", json!({"title": "Old"}), json!({"title": "New"}));
    assert!(apply(&mut tracker, &ledger, &original).is_err());
    assert!(ledger.read_all().unwrap().is_empty());
}
