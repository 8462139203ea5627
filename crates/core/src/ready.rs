// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Readiness queries over tracker listings.

use serde::Serialize;

use crate::config::Config;
use crate::span::parse_dependencies;
use crate::tracker::{Entity, EntityState};

/// Why an entity is blocked, if it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockedStatus {
    /// A blocked label or project status is set.
    pub directly: bool,
    /// At least one listed dependency is incomplete.
    pub by_dependencies: bool,
    pub reasons: Vec<String>,
}

impl BlockedStatus {
    pub fn is_blocked(&self) -> bool {
        self.directly || self.by_dependencies
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readiness {
    pub blocked: BlockedStatus,
    pub ready: bool,
}

pub fn assess(entity: &Entity, config: &Config) -> Readiness {
    let mut blocked = BlockedStatus::default();

    for label in &entity.labels {
        if config.blocked.is_blocked_label(label) {
            blocked.directly = true;
            blocked.reasons.push(format!("has blocked label '{label}'"));
        }
    }
    if let Some(status) = &entity.project_status {
        if config.blocked.is_blocked_status(status) {
            blocked.directly = true;
            blocked.reasons.push(format!("project status is '{status}'"));
        }
    }

    for item in parse_dependencies(&entity.body, &config.dependencies) {
        if !item.complete {
            blocked.by_dependencies = true;
            blocked
                .reasons
                .push(format!("dependency {} is incomplete", item.reference()));
        }
    }

    let ready = entity.state == EntityState::Open && !blocked.is_blocked();
    Readiness { blocked, ready }
}

/// Entities that are ready to work on, in listing order.
pub fn ready_items<'a>(entities: &'a [Entity], config: &Config) -> Vec<&'a Entity> {
    entities
        .iter()
        .filter(|entity| assess(entity, config).ready)
        .collect()
}

#[cfg(test)]
#[path = "ready_tests.rs"]
mod tests;
