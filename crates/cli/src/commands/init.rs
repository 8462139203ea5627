// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use crate::config::{find_repo_root, init_state_dir, state_dir};
use crate::error::{Error, Result};
use crate::git::{install_merge_driver, merge_driver_installed};

pub fn run() -> Result<()> {
    let root = find_repo_root()?;
    run_impl(&root)
}

/// Internal implementation that accepts the root for testing.
///
/// A failure to register the merge driver is a warning: the state
/// directory is still usable without it.
pub(crate) fn run_impl(root: &Path) -> Result<()> {
    let created = init_state_dir(root)?;
    let dir = state_dir(root);
    if created {
        println!("Created {}", dir.display());
    } else {
        println!("Using existing {}", dir.display());
    }

    match setup_merge_driver(root) {
        DriverSetup::Configured => println!("Configured merge driver for history.jsonl"),
        DriverSetup::AlreadyConfigured => println!("Merge driver already configured"),
        DriverSetup::Failed(e) => eprintln!("warning: could not configure merge driver: {}", e),
    }
    Ok(())
}

#[derive(Debug)]
pub(crate) enum DriverSetup {
    Configured,
    AlreadyConfigured,
    Failed(Error),
}

pub(crate) fn setup_merge_driver(root: &Path) -> DriverSetup {
    let was_installed = merge_driver_installed(root);
    match install_merge_driver(root) {
        Ok(false) if was_installed => DriverSetup::AlreadyConfigured,
        Ok(_) => DriverSetup::Configured,
        Err(e) => DriverSetup::Failed(e),
    }
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
