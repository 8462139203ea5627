// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory [`Tracker`] used by the core's tests.

use std::collections::BTreeMap;

use super::*;

#[derive(Debug, Default)]
pub(crate) struct MemoryTracker {
    pub entities: BTreeMap<(String, u64), Entity>,
    /// Human-readable log of mutating calls, in order.
    pub calls: Vec<String>,
    pub fail_search: bool,
    pub fail_edits: bool,
}

impl MemoryTracker {
    pub fn new() -> Self {
        MemoryTracker::default()
    }

    pub fn with_issue(mut self, repo: &str, number: u64, body: &str) -> Self {
        self.entities.insert(
            (repo.to_string(), number),
            Entity {
                number,
                entity_type: EntityType::Issue,
                title: format!("Issue {number}"),
                state: EntityState::Open,
                labels: Vec::new(),
                assignees: Vec::new(),
                body: body.to_string(),
                project_status: None,
            },
        );
        self
    }

    pub fn entity(&self, repo: &str, number: u64) -> &Entity {
        match self.entities.get(&(repo.to_string(), number)) {
            Some(entity) => entity,
            None => unreachable!("test entity {repo}#{number} missing"),
        }
    }

    fn entity_mut(&mut self, entity: &EntityRef) -> Result<&mut Entity> {
        self.entities
            .get_mut(&(entity.repo.clone(), entity.number))
            .ok_or_else(|| Error::Tracker(format!("{entity} not found")))
    }
}

impl Tracker for MemoryTracker {
    fn view(&self, entity: &EntityRef) -> Result<Entity> {
        self.entities
            .get(&(entity.repo.clone(), entity.number))
            .cloned()
            .ok_or_else(|| Error::Tracker(format!("{entity} not found")))
    }

    fn list_open(&self, repo: &str, entity_type: EntityType) -> Result<Vec<Entity>> {
        Ok(self
            .entities
            .iter()
            .filter(|((r, _), e)| r == repo && e.entity_type == entity_type)
            .filter(|(_, e)| e.state == EntityState::Open)
            .map(|(_, e)| e.clone())
            .collect())
    }

    fn search_referencing(&self, repo: &str, number: u64) -> Result<Vec<u64>> {
        if self.fail_search {
            return Err(Error::Tracker("search unavailable".into()));
        }
        let needle = format!("#{number}");
        Ok(self
            .entities
            .iter()
            .filter(|((r, _), e)| r == repo && e.state == EntityState::Open)
            .filter(|(_, e)| e.body.contains(&needle))
            .map(|((_, n), _)| *n)
            .collect())
    }

    fn edit(&mut self, entity: &EntityRef, edit: &EntityEdit) -> Result<()> {
        if self.fail_edits {
            return Err(Error::Tracker("rate limited".into()));
        }
        self.calls.push(format!("edit {}", entity.number));
        let target = self.entity_mut(entity)?;
        if let Some(title) = &edit.title {
            target.title = title.clone();
        }
        if let Some(body) = &edit.body {
            target.body = body.clone();
        }
        target.labels.retain(|l| !edit.remove_labels.contains(l));
        target.labels.extend(edit.add_labels.iter().cloned());
        target.assignees.retain(|a| !edit.remove_assignees.contains(a));
        target.assignees.extend(edit.add_assignees.iter().cloned());
        Ok(())
    }

    fn close(&mut self, entity: &EntityRef) -> Result<()> {
        self.calls.push(format!("close {}", entity.number));
        self.entity_mut(entity)?.state = EntityState::Closed;
        Ok(())
    }

    fn reopen(&mut self, entity: &EntityRef) -> Result<()> {
        self.calls.push(format!("reopen {}", entity.number));
        self.entity_mut(entity)?.state = EntityState::Open;
        Ok(())
    }
}
