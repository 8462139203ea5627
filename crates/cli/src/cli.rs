// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

const QUICKSTART_HELP: &str = "\
Get started:
  bb init                                   Set up .betterbeads/ and the merge driver
  bb body issue.md deps add 12 acme/lib#4   Add dependencies to a body
  bb history -n 5                           Show the last five operations
  bb undo --since-commit                    Plan undo of everything since HEAD";

#[derive(Parser)]
#[command(name = "bb", version)]
#[command(about = "Dependency-aware issue bodies with an undoable operation history")]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize bb in the current repository
    Init,

    /// Show recorded operations, newest first
    #[command(after_help = "Examples:\n  \
        bb history                          Last 20 operations\n  \
        bb history --issue 12               Operations on #12\n  \
        bb history --since 2026-01-31       Operations since a date")]
    History {
        /// Maximum number of operations to show (0 for all)
        #[arg(long, short = 'n', default_value_t = 20)]
        limit: usize,

        /// Only operations on this issue or PR number
        #[arg(long)]
        issue: Option<u64>,

        /// Only operations on this repository (owner/repo)
        #[arg(long)]
        target: Option<String>,

        /// Only operations at or after this time (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
    },

    /// Show the tracker changes that would revert recorded operations
    Undo {
        /// Operation id (op_xxxxxxxx)
        id: Option<String>,

        /// Plan undo of the last N operations
        #[arg(long, short = 'n', default_value_t = 1, conflicts_with = "id")]
        last: usize,

        /// Plan undo of every operation since the last git commit
        #[arg(long, conflicts_with_all = ["id", "last"])]
        since_commit: bool,
    },

    /// Git merge driver for the history ledger
    #[command(name = "merge-log")]
    MergeLog {
        base: PathBuf,
        ours: PathBuf,
        theirs: PathBuf,
        /// Where to write the result (defaults to OURS)
        output: Option<PathBuf>,
    },

    /// Edit an issue or PR body
    #[command(arg_required_else_help = true)]
    Body {
        /// Body file, or - for stdin
        #[arg(value_name = "FILE")]
        file: String,

        /// Write the result back to FILE instead of stdout
        #[arg(long, short, global = true)]
        write: bool,

        #[command(flatten)]
        record: RecordArgs,

        #[command(subcommand)]
        action: BodyCommand,
    },
}

/// Options for recording a body change in the history ledger.
#[derive(Args, Clone, Debug, Default)]
pub struct RecordArgs {
    /// Record the change in the history ledger
    #[arg(long, global = true)]
    pub record: bool,

    /// Repository the body belongs to (owner/repo)
    #[arg(long, global = true, value_name = "OWNER/REPO")]
    pub target: Option<String>,

    /// Issue or PR number the body belongs to
    #[arg(long, global = true)]
    pub number: Option<u64>,

    /// The body belongs to a pull request
    #[arg(long, global = true)]
    pub pr: bool,

    /// Record the change as a dry run
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum BodyCommand {
    /// Manage the dependency section
    #[command(subcommand)]
    Deps(DepsCommand),

    /// Check or uncheck checklist items
    #[command(subcommand)]
    Task(TaskCommand),

    /// Read or rewrite a markdown section
    #[command(subcommand)]
    Section(SectionCommand),
}

#[derive(Subcommand)]
pub enum DepsCommand {
    /// Add dependencies (number, #number or owner/repo#number)
    Add {
        #[arg(required = true)]
        refs: Vec<String>,
    },
    /// Remove dependencies
    Remove {
        #[arg(required = true)]
        refs: Vec<String>,
    },
    /// Mark dependencies complete
    Check {
        #[arg(required = true)]
        refs: Vec<String>,
    },
    /// Mark dependencies incomplete
    Uncheck {
        #[arg(required = true)]
        refs: Vec<String>,
    },
    /// List dependencies as JSON
    List,
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// Check matching checklist items
    Check(TaskTarget),
    /// Uncheck matching checklist items
    Uncheck(TaskTarget),
}

/// Which checklist items a task command touches.
#[derive(Args, Clone, Debug)]
#[command(group(ArgGroup::new("which").required(true).args(["text", "line"])))]
pub struct TaskTarget {
    /// Items whose text contains this substring
    #[arg(long)]
    pub text: Option<String>,

    /// Match --text case-sensitively
    #[arg(long, requires = "text", conflicts_with = "line")]
    pub case_sensitive: bool,

    /// The item on this line (1-based)
    #[arg(long)]
    pub line: Option<usize>,
}

#[derive(Subcommand)]
pub enum SectionCommand {
    /// Print a section's content
    Show { header: String },
    /// Replace a section's content
    Replace {
        header: String,
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Append a line to a section
    Append {
        header: String,
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
}

#[cfg(test)]
#[path = "cli_tests/mod.rs"]
mod tests;
