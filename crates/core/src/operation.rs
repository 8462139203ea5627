// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recorded mutations.
//!
//! Every change made through bb is captured as an [`Operation`]: which
//! entity it touched, what the touched fields held before and after, and
//! whether it was only simulated. Operations are serialized one per line
//! into the history ledger.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::tracker::{EntityRef, EntityType};

/// Action prefix marking an operation that reverted another one.
pub const UNDO_PREFIX: &str = "undo:";

/// Field snapshot stored in `before` / `after`.
pub type Fields = Map<String, Value>;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// One recorded mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// `op_` followed by eight lowercase hex characters.
    pub id: String,
    #[serde(with = "timestamp")]
    pub ts: DateTime<Utc>,
    /// Repository as `owner/repo`.
    pub target: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(rename = "num")]
    pub number: u64,
    /// Short action label, e.g. `body:add`, `label`, `undo:op_1a2b3c4d`.
    pub action: String,
    pub before: Fields,
    pub after: Fields,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dry_run: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Operation {
    /// Creates an operation stamped with the current time and a fresh id.
    ///
    /// `before` and `after` start empty; see [`Operation::with_change`].
    pub fn new(
        target: impl Into<String>,
        entity_type: EntityType,
        number: u64,
        action: impl Into<String>,
    ) -> Self {
        let target = target.into();
        let action = action.into();
        let id = generate_id(&target, number, &action);
        Operation {
            id,
            ts: Utc::now().trunc_subsecs(3),
            target,
            entity_type,
            number,
            action,
            before: Fields::new(),
            after: Fields::new(),
            dry_run: false,
        }
    }

    pub fn with_change(mut self, before: Fields, after: Fields) -> Self {
        self.before = before;
        self.after = after;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The entity this operation touched.
    pub fn entity(&self) -> EntityRef {
        EntityRef {
            repo: self.target.clone(),
            entity_type: self.entity_type,
            number: self.number,
        }
    }

    /// True if this operation reverted another one.
    pub fn is_undo(&self) -> bool {
        self.action.starts_with(UNDO_PREFIX)
    }

    /// Id of the operation this one reverted.
    pub fn undoes(&self) -> Option<&str> {
        self.action.strip_prefix(UNDO_PREFIX)
    }

    /// Serializes to a single ledger line (no trailing newline).
    pub fn to_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_line(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }
}

/// Generates an operation id: `op_` plus the first four bytes of a SHA-256
/// over the wall clock, process id, a per-process sequence and the
/// operation's identity, hex encoded.
pub fn generate_id(target: &str, number: u64, action: &str) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(nanos.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    hasher.update(seq.to_le_bytes());
    hasher.update(target.as_bytes());
    hasher.update(number.to_le_bytes());
    hasher.update(action.as_bytes());
    let hash = hasher.finalize();
    format!("op_{}", hex::encode(&hash[..4]))
}

/// Formats a timestamp the way the ledger stores it.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, false)
}

/// Parses an RFC 3339 timestamp with any offset, normalized to UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::InvalidTimestamp(input.to_string()))
}

mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        ts: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
