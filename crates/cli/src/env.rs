// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! Variable name constants are generated by `build.rs` into [`vars`].

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Log filter directives from `BB_LOG` (e.g. `debug`, `bb_core=trace`).
pub fn log_filter() -> Option<String> {
    std::env::var(vars::BB_LOG).ok().filter(|v| !v.trim().is_empty())
}

/// Repository root override from `BB_ROOT`.
pub fn root_override() -> Option<PathBuf> {
    std::env::var(vars::BB_ROOT)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
