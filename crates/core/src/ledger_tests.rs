// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::operation::parse_timestamp;
use crate::tracker::EntityType;
use tempfile::TempDir;

fn op_at(ts: &str, target: &str, number: u64, action: &str) -> Operation {
    let mut op = Operation::new(target, EntityType::Issue, number, action);
    op.ts = parse_timestamp(ts).unwrap();
    op
}

fn seeded() -> (TempDir, Ledger, Vec<Operation>) {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::in_repo(dir.path());
    let ops = vec![
        op_at("2026-01-01T00:00:00Z", "acme/app", 1, "label"),
        op_at("2026-01-03T00:00:00Z", "acme/app", 2, "title"),
        op_at("2026-01-02T00:00:00Z", "acme/lib", 1, "body:add"),
    ];
    for op in &ops {
        ledger.append(op).unwrap();
    }
    (dir, ledger, ops)
}

#[test]
fn in_repo_path_layout() {
    let ledger = Ledger::in_repo("/repo");
    assert_eq!(
        ledger.path(),
        Path::new("/repo/.betterbeads/history.jsonl")
    );
}

#[test]
fn missing_file_reads_empty() {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::in_repo(dir.path());
    assert!(ledger.read_all().unwrap().is_empty());
    assert!(ledger.get("op_00000000").unwrap().is_none());
}

#[test]
fn append_creates_directory_and_one_line_per_op() {
    let (_dir, ledger, ops) = seeded();
    let text = fs::read_to_string(ledger.path()).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.ends_with('\n'));
    assert_eq!(ledger.read_all().unwrap(), ops);
}

#[test]
fn read_sorts_newest_first() {
    let (_dir, ledger, _) = seeded();
    let ops = ledger.read(&HistoryFilter::default()).unwrap();
    let numbers: Vec<(String, u64)> = ops.iter().map(|o| (o.target.clone(), o.number)).collect();
    assert_eq!(
        numbers,
        vec![
            ("acme/app".to_string(), 2),
            ("acme/lib".to_string(), 1),
            ("acme/app".to_string(), 1),
        ]
    );
}

#[test]
fn read_filters_compose() {
    let (_dir, ledger, _) = seeded();
    let filter = HistoryFilter {
        number: Some(1),
        target: Some("acme/app".into()),
        ..Default::default()
    };
    let ops = ledger.read(&filter).unwrap();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].action, "label");
}

#[test]
fn since_is_inclusive() {
    let (_dir, ledger, _) = seeded();
    let filter = HistoryFilter {
        since: Some(parse_timestamp("2026-01-02T00:00:00Z").unwrap()),
        ..Default::default()
    };
    let ops = ledger.read(&filter).unwrap();
    assert_eq!(ops.len(), 2);
}

#[test]
fn limit_keeps_newest() {
    let (_dir, ledger, _) = seeded();
    let filter = HistoryFilter {
        limit: Some(1),
        ..Default::default()
    };
    let ops = ledger.read(&filter).unwrap();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].action, "title");
}

#[test]
fn zero_limit_keeps_everything() {
    let (_dir, ledger, _) = seeded();
    let filter = HistoryFilter {
        limit: Some(0),
        ..Default::default()
    };
    assert_eq!(ledger.read(&filter).unwrap().len(), 3);
}

#[test]
fn malformed_lines_are_skipped() {
    let (_dir, ledger, _) = seeded();
    let mut text = fs::read_to_string(ledger.path()).unwrap();
    text.push_str("{not json\n\n   \n{\"id\":\"op_1\"}\n");
    fs::write(ledger.path(), text).unwrap();
    assert_eq!(ledger.read_all().unwrap().len(), 3);
}

#[test]
fn get_finds_first_match() {
    let (_dir, ledger, ops) = seeded();
    let found = ledger.get(&ops[1].id).unwrap().unwrap();
    assert_eq!(found, ops[1]);
    assert!(ledger.get("op_ffffffff").unwrap().is_none());
}

#[test]
fn parse_lines_tolerates_trailing_garbage() {
    let op = op_at("2026-01-01T00:00:00Z", "a/b", 1, "x");
    let text = format!("{}\ngarbage", op.to_line().unwrap());
    assert_eq!(parse_lines(&text), vec![op]);
}
