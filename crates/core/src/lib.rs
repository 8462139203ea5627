// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bb-core: dependency-aware body editing and mutation history for
//! issue/PR trackers.
//!
//! This crate holds the pieces shared by the bb CLI and any other caller:
//! byte-span parsing of markdown bodies, pure body mutations, the append-only
//! history ledger with its three-way merge, undo planning, and readiness
//! queries. Talking to a tracker is left to an implementation of
//! [`Tracker`].

pub mod body;
pub mod cascade;
pub mod config;
pub mod dependency;
pub mod error;
pub mod ledger;
pub mod merge;
pub mod operation;
pub mod ready;
pub mod span;
pub mod tracker;
pub mod undo;

pub use body::BodyChange;
pub use cascade::{check_off_references, CascadeReport};
pub use config::{BlockedIndicators, Config, DependencyConfig};
pub use dependency::{DependencyItem, DependencyRef};
pub use error::{Error, Result};
pub use ledger::{HistoryFilter, Ledger, LEDGER_FILE, STATE_DIR};
pub use merge::{merge_files, merge_ledgers, MergeStats, OperationIndex};
pub use operation::{Fields, Operation};
pub use ready::{assess, ready_items, BlockedStatus, Readiness};
pub use span::{ChecklistItem, DependencySection, Section};
pub use tracker::{Entity, EntityEdit, EntityRef, EntityState, EntityType, Tracker};
pub use undo::{StateAction, UndoPlan};
