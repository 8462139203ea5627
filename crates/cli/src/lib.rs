// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bbrs - the library behind the `bb` CLI.
//!
//! `bb` edits issue and pull request bodies (dependency sections,
//! checklists, markdown sections) and keeps an undoable history of those
//! edits in `.betterbeads/history.jsonl`. The heavy lifting lives in
//! `bb-core`; this crate adds repository discovery, configuration, git
//! integration and the command-line surface.

mod cli;
mod commands;
pub mod config;
mod env;
pub mod error;
mod git;

pub use cli::{
    BodyCommand, Cli, Command, DepsCommand, RecordArgs, SectionCommand, TaskCommand, TaskTarget,
};
pub use error::{Error, Result};

/// Returns the log filter directives requested through `BB_LOG`.
pub fn log_filter() -> Option<String> {
    env::log_filter()
}

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Init => commands::init::run(),
        Command::History {
            limit,
            issue,
            target,
            since,
        } => commands::history::run(limit, issue, target, since),
        Command::Undo {
            id,
            last,
            since_commit,
        } => commands::undo::run(id, last, since_commit),
        Command::MergeLog {
            base,
            ours,
            theirs,
            output,
        } => commands::merge_log::run(base, ours, theirs, output),
        Command::Body {
            file,
            write,
            record,
            action,
        } => commands::body::run(file, write, record, action),
    }
}
