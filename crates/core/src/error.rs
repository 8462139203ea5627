// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for bb-core operations.
//!
//! A missing section, checklist item or dependency is not an error: body
//! mutations return their input unchanged instead.

use thiserror::Error;

/// All possible errors that can occur in bb-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid dependency reference: '{0}'\n  hint: use a number, #number, or owner/repo#number")]
    InvalidDependency(String),

    #[error("invalid entity type: '{0}'\n  hint: valid types are: issue, pr")]
    InvalidEntityType(String),

    #[error("invalid timestamp: '{0}'\n  hint: use an RFC 3339 timestamp such as 2026-01-31T12:00:00Z")]
    InvalidTimestamp(String),

    #[error("tracker error: {0}")]
    Tracker(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for bb-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
