// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed view of "depends-on" references embedded in item bodies.
//!
//! A reference is `#123` for the current repository or `owner/repo#123`
//! for another one. Identity is the `(repo, number)` pair.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Identity of a dependency: optional foreign repository plus item number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyRef {
    /// `None` means the repository that owns the body.
    pub repo: Option<String>,
    pub number: u64,
}

impl DependencyRef {
    /// A reference into the current repository.
    pub fn local(number: u64) -> Self {
        DependencyRef { repo: None, number }
    }

    /// A reference into `owner/repo`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDependency`] if `repo` is not `owner/repo`.
    pub fn in_repo(repo: &str, number: u64) -> Result<Self> {
        if !is_valid_repo(repo) {
            return Err(Error::InvalidDependency(format!("{repo}#{number}")));
        }
        Ok(DependencyRef {
            repo: Some(repo.to_string()),
            number,
        })
    }
}

impl From<u64> for DependencyRef {
    fn from(number: u64) -> Self {
        DependencyRef::local(number)
    }
}

impl FromStr for DependencyRef {
    type Err = Error;

    /// Accepts `owner/repo#123`, `#123` and `123`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let invalid = || Error::InvalidDependency(s.to_string());

        let (repo, number) = match trimmed.split_once('#') {
            Some((repo, number)) => (repo, number),
            None => ("", trimmed),
        };

        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let number: u64 = number.parse().map_err(|_| invalid())?;

        if repo.is_empty() {
            Ok(DependencyRef::local(number))
        } else {
            DependencyRef::in_repo(repo, number).map_err(|_| invalid())
        }
    }
}

impl fmt::Display for DependencyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repo {
            Some(repo) => write!(f, "{}#{}", repo, self.number),
            None => write!(f, "#{}", self.number),
        }
    }
}

/// A dependency line as found in (or written to) a Dependencies section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyItem {
    pub number: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    pub complete: bool,
    /// Free text after the reference, trimmed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DependencyItem {
    /// An incomplete item without description.
    pub fn new(dep: DependencyRef) -> Self {
        DependencyItem {
            number: dep.number,
            repo: dep.repo,
            complete: false,
            description: None,
        }
    }

    /// The `(repo, number)` identity of this item.
    pub fn reference(&self) -> DependencyRef {
        DependencyRef {
            repo: self.repo.clone(),
            number: self.number,
        }
    }

    /// Returns true if this item points at `dep`.
    pub fn refers_to(&self, dep: &DependencyRef) -> bool {
        self.number == dep.number && self.repo == dep.repo
    }
}

/// Renders the markdown checklist line, without a trailing newline.
impl fmt::Display for DependencyItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let checkbox = if self.complete { "[x]" } else { "[ ]" };
        write!(f, "- {} {}", checkbox, self.reference())?;
        if let Some(description) = &self.description {
            write!(f, " {description}")?;
        }
        Ok(())
    }
}

/// Checks the `owner/repo` shape accepted by the dependency line pattern.
pub(crate) fn is_valid_repo(repo: &str) -> bool {
    let valid_part = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    };
    match repo.split_once('/') {
        Some((owner, name)) => valid_part(owner) && valid_part(name),
        None => false,
    }
}

#[cfg(test)]
#[path = "dependency_tests.rs"]
mod tests;
