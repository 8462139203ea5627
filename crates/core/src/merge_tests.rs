// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::operation::parse_timestamp;
use crate::tracker::EntityType;
use tempfile::TempDir;

fn op(id: &str, ts: &str, action: &str) -> Operation {
    let mut op = Operation::new("acme/app", EntityType::Issue, 1, action);
    op.id = id.to_string();
    op.ts = parse_timestamp(ts).unwrap();
    op
}

fn text(ops: &[&Operation]) -> String {
    ops.iter()
        .map(|o| format!("{}\n", o.to_line().unwrap()))
        .collect()
}

fn ids(merged: &str) -> Vec<String> {
    parse_lines(merged).into_iter().map(|o| o.id).collect()
}

#[test]
fn union_sorted_by_timestamp() {
    let a = op("op_0000000a", "2026-01-01T00:00:00Z", "label");
    let b = op("op_0000000b", "2026-01-02T00:00:00Z", "title");
    let c = op("op_0000000c", "2026-01-03T00:00:00Z", "body:add");

    let merged = merge_ledgers(&text(&[&a]), &text(&[&a, &c]), &text(&[&a, &b])).unwrap();
    assert_eq!(ids(&merged), vec!["op_0000000a", "op_0000000b", "op_0000000c"]);
    assert!(merged.ends_with('\n'));
}

#[test]
fn shared_ids_appear_once() {
    let a = op("op_0000000a", "2026-01-01T00:00:00Z", "label");
    let merged = merge_ledgers(&text(&[&a]), &text(&[&a]), &text(&[&a])).unwrap();
    assert_eq!(merged.lines().count(), 1);
}

#[test]
fn later_input_wins_for_same_id() {
    let ours = op("op_0000000a", "2026-01-01T00:00:00Z", "ours");
    let theirs = op("op_0000000a", "2026-01-01T00:00:00Z", "theirs");
    let merged = merge_ledgers("", &text(&[&ours]), &text(&[&theirs])).unwrap();
    let ops = parse_lines(&merged);
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].action, "theirs");
}

#[test]
fn replaced_op_moves_in_time_index() {
    let early = op("op_0000000a", "2026-01-01T00:00:00Z", "early");
    let late = op("op_0000000a", "2026-01-05T00:00:00Z", "late");
    let other = op("op_0000000b", "2026-01-03T00:00:00Z", "other");
    let mut index = OperationIndex::new();
    assert!(!index.insert(early));
    index.insert(other);
    assert!(index.insert(late));
    let order: Vec<&str> = index.ascending().map(|o| o.action.as_str()).collect();
    assert_eq!(order, vec!["other", "late"]);
    assert_eq!(index.len(), 2);
}

#[test]
fn equal_timestamps_ordered_by_id() {
    let b = op("op_0000000b", "2026-01-01T00:00:00Z", "b");
    let a = op("op_0000000a", "2026-01-01T00:00:00Z", "a");
    let merged = merge_ledgers("", &text(&[&b]), &text(&[&a])).unwrap();
    assert_eq!(ids(&merged), vec!["op_0000000a", "op_0000000b"]);
}

#[test]
fn malformed_lines_dropped() {
    let a = op("op_0000000a", "2026-01-01T00:00:00Z", "label");
    let ours = format!("{}garbage\n\n", text(&[&a]));
    let merged = merge_ledgers("not json", &ours, "").unwrap();
    assert_eq!(merged.lines().count(), 1);
}

#[test]
fn all_empty_merges_to_empty() {
    assert_eq!(merge_ledgers("", "", "").unwrap(), "");
}

#[test]
fn merge_is_symmetric_in_sides() {
    let a = op("op_0000000a", "2026-01-01T00:00:00Z", "label");
    let b = op("op_0000000b", "2026-01-02T00:00:00Z", "title");
    let left = merge_ledgers("", &text(&[&a]), &text(&[&b])).unwrap();
    let right = merge_ledgers("", &text(&[&b]), &text(&[&a])).unwrap();
    assert_eq!(left, right);
}

#[test]
fn merge_files_writes_output_and_counts() {
    let dir = TempDir::new().unwrap();
    let a = op("op_0000000a", "2026-01-01T00:00:00Z", "label");
    let b = op("op_0000000b", "2026-01-02T00:00:00Z", "title");
    let base = dir.path().join("base");
    let ours = dir.path().join("ours");
    let theirs = dir.path().join("theirs");
    fs::write(&base, text(&[&a])).unwrap();
    fs::write(&ours, text(&[&a, &b])).unwrap();

    let stats = merge_files(&base, &ours, &theirs, &ours).unwrap();
    assert_eq!(
        stats,
        MergeStats {
            base: 1,
            ours: 2,
            theirs: 0,
            merged: 2
        }
    );
    assert_eq!(ids(&fs::read_to_string(&ours).unwrap()), vec!["op_0000000a", "op_0000000b"]);
}
