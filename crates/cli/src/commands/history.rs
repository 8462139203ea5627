// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bb_core::operation::{format_timestamp, parse_timestamp};
use bb_core::{EntityType, HistoryFilter, Ledger, Operation};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{Error, Result};

use super::{open_ledger, print_json};

/// One row of `bb history` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct HistoryEntry {
    pub id: String,
    pub timestamp: String,
    pub target: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub number: u64,
    pub action: String,
    pub dry_run: bool,
}

impl From<&Operation> for HistoryEntry {
    fn from(op: &Operation) -> Self {
        HistoryEntry {
            id: op.id.clone(),
            timestamp: format_timestamp(&op.ts),
            target: op.target.clone(),
            entity_type: op.entity_type,
            number: op.number,
            action: op.action.clone(),
            dry_run: op.dry_run,
        }
    }
}

pub fn run(
    limit: usize,
    issue: Option<u64>,
    target: Option<String>,
    since: Option<String>,
) -> Result<()> {
    let (ledger, _) = open_ledger()?;
    let filter = HistoryFilter {
        number: issue,
        target,
        since: since.as_deref().map(parse_since).transpose()?,
        limit: Some(limit),
    };
    print_json(&run_impl(&ledger, &filter)?)
}

/// Internal implementation that accepts the ledger for testing.
pub(crate) fn run_impl(ledger: &Ledger, filter: &HistoryFilter) -> Result<Vec<HistoryEntry>> {
    Ok(ledger.read(filter)?.iter().map(HistoryEntry::from).collect())
}

/// Accepts an RFC 3339 timestamp or a bare date (midnight UTC).
pub(crate) fn parse_since(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = parse_timestamp(input) {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| Error::InvalidTimestamp(input.to_string()))
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
