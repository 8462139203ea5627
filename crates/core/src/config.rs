// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit configuration passed to the components that need it.
//!
//! There is no process-wide cache: callers build a [`Config`] once (usually
//! from `.betterbeads/config.toml`) and hand references to the body mutator
//! and readiness checks.

use serde::{Deserialize, Serialize};

/// Top-level configuration value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How the Dependencies section is written and located.
    pub dependencies: DependencyConfig,
    /// Labels and project statuses that mark an item as blocked.
    pub blocked: BlockedIndicators,
}

/// Location of the Dependencies section inside a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    /// Full header line, including the leading hashes.
    pub section_header: String,
    /// Line placed directly above the header when the section is created.
    pub separator: String,
}

impl Default for DependencyConfig {
    fn default() -> Self {
        DependencyConfig {
            section_header: "## Dependencies".to_string(),
            separator: "---".to_string(),
        }
    }
}

impl DependencyConfig {
    /// Deepest heading level that closes the Dependencies section.
    ///
    /// Headings at the section header's own level or shallower end it, and
    /// a level-2 heading always does. `"### Blocked by"` yields 3,
    /// `"# Deps"` and `"Dependencies"` yield 2.
    pub fn closing_level(&self) -> usize {
        let hashes = self
            .section_header
            .chars()
            .take_while(|c| *c == '#')
            .count();
        hashes.max(2)
    }
}

/// Signals that an item is blocked regardless of its dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockedIndicators {
    pub labels: Vec<String>,
    pub statuses: Vec<String>,
}

impl Default for BlockedIndicators {
    fn default() -> Self {
        BlockedIndicators {
            labels: vec![
                "blocked".to_string(),
                "on-hold".to_string(),
                "waiting-on-external".to_string(),
            ],
            statuses: vec![
                "Blocked".to_string(),
                "On Hold".to_string(),
                "Waiting".to_string(),
            ],
        }
    }
}

impl BlockedIndicators {
    /// Case-insensitive match against the blocked label set.
    pub fn is_blocked_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.eq_ignore_ascii_case(label))
    }

    /// Case-insensitive match against the blocked project statuses.
    pub fn is_blocked_status(&self, status: &str) -> bool {
        self.statuses.iter().any(|s| s.eq_ignore_ascii_case(status))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
