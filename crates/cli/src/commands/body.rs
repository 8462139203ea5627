// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `bb body`: dependency, checklist and section edits on a body file.
//!
//! The edited body goes to stdout (or back to the file with `--write`).
//! Unchanged bodies are reported on stderr as a warning and never recorded.

use std::fs;
use std::io::Read;

use bb_core::body::{
    add_dependencies, append_to_section, remove_dependencies, replace_section_content,
    set_task_complete, toggle_task_at_line, toggle_task_by_text,
};
use bb_core::span::{find_section, parse_dependencies};
use bb_core::{BodyChange, Config, DependencyRef, EntityType, Ledger, Operation};

use crate::cli::{BodyCommand, DepsCommand, RecordArgs, SectionCommand, TaskCommand, TaskTarget};
use crate::config::{find_repo_root, load_config};
use crate::error::{Error, Result};

/// Result of applying a body command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Read-only output, with an optional warning.
    Query {
        text: String,
        warning: Option<String>,
    },
    /// A body mutation. `unchanged` describes why a no-op happened.
    Edit {
        verb: &'static str,
        change: BodyChange,
        unchanged: String,
    },
}

/// Ledger coordinates for a recorded change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordTarget {
    pub target: String,
    pub entity_type: EntityType,
    pub number: u64,
    pub dry_run: bool,
}

pub fn run(file: String, write: bool, record: RecordArgs, action: BodyCommand) -> Result<()> {
    let record_target = record_target(&record)?;
    let root = find_repo_root().ok();
    let config = match &root {
        Some(root) => load_config(root)?,
        None => Config::default(),
    };

    let body = read_input(&file)?;
    match apply(&body, &action, &config)? {
        Outcome::Query { text, warning } => {
            if let Some(warning) = warning {
                eprintln!("warning: {}", warning);
            }
            print!("{}", text);
        }
        Outcome::Edit {
            verb,
            change,
            unchanged,
        } => {
            if change.is_noop() {
                eprintln!("warning: {} (no changes)", unchanged);
            }
            let ledger = match (&record_target, &root) {
                (Some(_), Some(root)) => Some(Ledger::in_repo(root)),
                (Some(_), None) if !change.is_noop() => return Err(Error::NotInRepository),
                _ => None,
            };
            let output = (write && file != "-").then_some(file.as_str());
            let recorded = deliver(
                output,
                &change,
                ledger.as_ref().zip(record_target.as_ref()),
                verb,
            )?;
            if let Some(op) = recorded {
                eprintln!("Recorded {} ({})", op.id, op.action);
            }
        }
    }
    Ok(())
}

/// Validates the recording flags. `None` means the change is not recorded.
pub(crate) fn record_target(record: &RecordArgs) -> Result<Option<RecordTarget>> {
    if !record.record {
        if record.dry_run {
            return Err(Error::RequiredFor {
                field: "--record",
                operation: "--dry-run",
            });
        }
        return Ok(None);
    }
    let target = record.target.clone().ok_or(Error::RequiredFor {
        field: "--target",
        operation: "--record",
    })?;
    let number = record.number.ok_or(Error::RequiredFor {
        field: "--number",
        operation: "--record",
    })?;
    Ok(Some(RecordTarget {
        target,
        entity_type: if record.pr {
            EntityType::Pr
        } else {
            EntityType::Issue
        },
        number,
        dry_run: record.dry_run,
    }))
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        Ok(fs::read_to_string(file)?)
    }
}

fn parse_refs(refs: &[String]) -> Result<Vec<DependencyRef>> {
    refs.iter()
        .map(|r| r.parse::<DependencyRef>().map_err(Error::from))
        .collect()
}

fn edit(verb: &'static str, before: &str, after: String, unchanged: String) -> Outcome {
    Outcome::Edit {
        verb,
        change: BodyChange::new(before, after),
        unchanged,
    }
}

/// Applies `action` to `body` without touching the filesystem.
pub(crate) fn apply(body: &str, action: &BodyCommand, config: &Config) -> Result<Outcome> {
    let deps_config = &config.dependencies;
    let outcome = match action {
        BodyCommand::Deps(DepsCommand::Add { refs }) => {
            let refs = parse_refs(refs)?;
            edit(
                "deps-add",
                body,
                add_dependencies(body, &refs, deps_config),
                "all dependencies already present".to_string(),
            )
        }
        BodyCommand::Deps(DepsCommand::Remove { refs }) => {
            let refs = parse_refs(refs)?;
            edit(
                "deps-remove",
                body,
                remove_dependencies(body, &refs, deps_config),
                "no matching dependencies".to_string(),
            )
        }
        BodyCommand::Deps(DepsCommand::Check { refs }) => {
            set_refs("deps-check", body, &parse_refs(refs)?, true)
        }
        BodyCommand::Deps(DepsCommand::Uncheck { refs }) => {
            set_refs("deps-uncheck", body, &parse_refs(refs)?, false)
        }
        BodyCommand::Deps(DepsCommand::List) => {
            let items = parse_dependencies(body, deps_config);
            Outcome::Query {
                text: format!("{}\n", serde_json::to_string_pretty(&items)?),
                warning: None,
            }
        }
        BodyCommand::Task(TaskCommand::Check(which)) => toggle("task-check", body, which, true),
        BodyCommand::Task(TaskCommand::Uncheck(which)) => {
            toggle("task-uncheck", body, which, false)
        }
        BodyCommand::Section(SectionCommand::Show { header }) => match find_section(body, header) {
            Some(section) => Outcome::Query {
                text: section.content,
                warning: None,
            },
            None => Outcome::Query {
                text: String::new(),
                warning: Some(format!("section '{}' not found", header)),
            },
        },
        BodyCommand::Section(SectionCommand::Replace { header, text }) => edit(
            "section-replace",
            body,
            replace_section_content(body, header, text),
            format!("section '{}' not found or already matches", header),
        ),
        BodyCommand::Section(SectionCommand::Append { header, text }) => edit(
            "section-append",
            body,
            append_to_section(body, header, text),
            format!("section '{}' not found", header),
        ),
    };
    Ok(outcome)
}

fn set_refs(verb: &'static str, body: &str, refs: &[DependencyRef], complete: bool) -> Outcome {
    let after = refs
        .iter()
        .fold(body.to_string(), |acc, dep| set_task_complete(&acc, dep, complete));
    let state = if complete { "checked" } else { "unchecked" };
    edit(
        verb,
        body,
        after,
        format!("no dependency items to mark {}", state),
    )
}

fn toggle(verb: &'static str, body: &str, which: &TaskTarget, complete: bool) -> Outcome {
    match (&which.text, which.line) {
        (Some(text), _) => {
            let (after, _) = toggle_task_by_text(body, text, complete, which.case_sensitive);
            edit(
                verb,
                body,
                after,
                format!("no checklist item matching '{}' to change", text),
            )
        }
        (None, Some(line)) => {
            let (after, _) = toggle_task_at_line(body, line, complete);
            edit(
                verb,
                body,
                after,
                format!("no checklist item to change on line {}", line),
            )
        }
        (None, None) => Outcome::Query {
            text: body.to_string(),
            warning: Some("no checklist item selected".to_string()),
        },
    }
}

/// Appends a `body:<verb>` operation for `change` to `ledger`.
/// Writes the edited body to `output` (stdout when `None`), then records it.
///
/// The ledger only sees changes that reached their destination. No-ops are
/// never recorded.
pub(crate) fn deliver(
    output: Option<&str>,
    change: &BodyChange,
    record: Option<(&Ledger, &RecordTarget)>,
    verb: &str,
) -> Result<Option<Operation>> {
    match output {
        Some(path) => fs::write(path, &change.after)?,
        None => print!("{}", change.after),
    }
    match record {
        Some((ledger, target)) if !change.is_noop() => {
            record_operation(ledger, target, verb, change).map(Some)
        }
        _ => Ok(None),
    }
}

pub(crate) fn record_operation(
    ledger: &Ledger,
    target: &RecordTarget,
    verb: &str,
    change: &BodyChange,
) -> Result<Operation> {
    let (before, after) = change.to_fields();
    let op = Operation::new(
        target.target.clone(),
        target.entity_type,
        target.number,
        format!("body:{verb}"),
    )
    .with_change(before, after)
    .with_dry_run(target.dry_run);
    ledger.append(&op)?;
    Ok(op)
}

#[cfg(test)]
#[path = "body_tests.rs"]
mod tests;
