// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capability interface of the remote issue/PR tracker.
//!
//! The core never talks to a tracker service itself. Callers supply an
//! implementation of [`Tracker`] (a CLI wrapper, an API client, a test
//! double) and the undo engine, readiness queries and reference cascade
//! drive it. Failures are reported as [`Error::Tracker`] and never retried
//! here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Kind of tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Issue,
    Pr,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Issue => "issue",
            EntityType::Pr => "pr",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "issue" => Ok(EntityType::Issue),
            "pr" => Ok(EntityType::Pr),
            _ => Err(Error::InvalidEntityType(s.to_string())),
        }
    }
}

/// Open/closed state as reported by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityState {
    Open,
    Closed,
    Merged,
}

impl EntityState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityState::Open => "open",
            EntityState::Closed => "closed",
            EntityState::Merged => "merged",
        }
    }
}

impl FromStr for EntityState {
    type Err = Error;

    /// Trackers report states in various cases (`OPEN`, `open`).
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(EntityState::Open),
            "closed" => Ok(EntityState::Closed),
            "merged" => Ok(EntityState::Merged),
            _ => Err(Error::Tracker(format!("unknown entity state '{s}'"))),
        }
    }
}

/// Address of one issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    /// `owner/repo`.
    pub repo: String,
    pub entity_type: EntityType,
    pub number: u64,
}

impl EntityRef {
    pub fn issue(repo: impl Into<String>, number: u64) -> Self {
        EntityRef {
            repo: repo.into(),
            entity_type: EntityType::Issue,
            number,
        }
    }

    pub fn pr(repo: impl Into<String>, number: u64) -> Self {
        EntityRef {
            repo: repo.into(),
            entity_type: EntityType::Pr,
            number,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}#{}", self.entity_type, self.repo, self.number)
    }
}

/// Entity fields the core reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub number: u64,
    pub entity_type: EntityType,
    pub title: String,
    pub state: EntityState,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub assignees: Vec<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_status: Option<String>,
}

/// A field-level edit sent to the tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntityEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_labels: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove_labels: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_assignees: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove_assignees: Vec<String>,
}

impl EntityEdit {
    /// An edit that only replaces the body.
    pub fn body(body: impl Into<String>) -> Self {
        EntityEdit {
            body: Some(body.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.add_labels.is_empty()
            && self.remove_labels.is_empty()
            && self.add_assignees.is_empty()
            && self.remove_assignees.is_empty()
    }
}

/// Operations the core needs from an issue/PR tracker.
pub trait Tracker {
    /// Fetches one entity.
    fn view(&self, entity: &EntityRef) -> Result<Entity>;

    /// Lists open entities of one type in `repo`.
    fn list_open(&self, repo: &str, entity_type: EntityType) -> Result<Vec<Entity>>;

    /// Numbers of open issues in `repo` whose body mentions `#number`.
    fn search_referencing(&self, repo: &str, number: u64) -> Result<Vec<u64>>;

    fn edit(&mut self, entity: &EntityRef, edit: &EntityEdit) -> Result<()>;

    fn close(&mut self, entity: &EntityRef) -> Result<()>;

    fn reopen(&mut self, entity: &EntityRef) -> Result<()>;
}

#[cfg(test)]
#[path = "tracker_testing.rs"]
pub(crate) mod testing;

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
