// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the bb CLI.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not in a repository\n  hint: run bb inside a git repository or set BB_ROOT")]
    NotInRepository,

    #[error("operation not found: {0}")]
    OperationNotFound(String),

    #[error("no operations to undo")]
    NothingToUndo,

    #[error("invalid dependency reference: '{0}'\n  hint: use a number, #number, or owner/repo#number")]
    InvalidDependency(String),

    #[error("invalid entity type: '{0}'\n  hint: valid types are: issue, pr")]
    InvalidEntityType(String),

    #[error("invalid timestamp: '{0}'\n  hint: use an RFC 3339 timestamp such as 2026-01-31T12:00:00Z")]
    InvalidTimestamp(String),

    #[error("{field} is required for {operation}")]
    RequiredFor {
        field: &'static str,
        operation: &'static str,
    },

    #[error("tracker error: {0}")]
    Tracker(String),

    #[error("git error: {0}")]
    Git(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// A specialized Result type for bb CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<bb_core::Error> for Error {
    fn from(e: bb_core::Error) -> Self {
        match e {
            bb_core::Error::InvalidDependency(s) => Error::InvalidDependency(s),
            bb_core::Error::InvalidEntityType(s) => Error::InvalidEntityType(s),
            bb_core::Error::InvalidTimestamp(s) => Error::InvalidTimestamp(s),
            bb_core::Error::Tracker(s) => Error::Tracker(s),
            bb_core::Error::Io(e) => Error::Io(e),
            bb_core::Error::Json(e) => Error::Json(e),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
