// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use bb_core::{merge_files, MergeStats};

use crate::error::Result;

/// Runs as the git merge driver; the result defaults to OURS (`%A`).
pub fn run(base: PathBuf, ours: PathBuf, theirs: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| ours.clone());
    run_impl(&base, &ours, &theirs, &output)?;
    Ok(())
}

pub(crate) fn run_impl(
    base: &Path,
    ours: &Path,
    theirs: &Path,
    output: &Path,
) -> Result<MergeStats> {
    Ok(merge_files(base, ours, theirs, output)?)
}

#[cfg(test)]
#[path = "merge_log_tests.rs"]
mod tests;
