// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod body;
pub mod history;
pub mod init;
pub mod merge_log;
pub mod undo;

use std::path::PathBuf;

use bb_core::Ledger;
use serde::Serialize;

use crate::config::find_repo_root;
use crate::error::Result;

/// Helper to open the ledger of the current repository.
pub fn open_ledger() -> Result<(Ledger, PathBuf)> {
    let root = find_repo_root()?;
    Ok((Ledger::in_repo(&root), root))
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
