// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::fs;
use std::path::PathBuf;
use std::process::Command as StdCommand;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn bb() -> Command {
    let mut cmd = cargo_bin_cmd!("bb");
    cmd.env_remove("BB_ROOT").env_remove("BB_LOG");
    cmd
}

/// Helper to create a git repository with bb initialized
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    StdCommand::new("git")
        .arg("init")
        .current_dir(temp.path())
        .output()
        .unwrap();
    bb().arg("init").current_dir(temp.path()).assert().success();
    temp
}

/// Helper to write a body file and return its path
pub fn write_body(temp: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

/// Helper to read `bb history` output as JSON
pub fn history(temp: &TempDir) -> Vec<serde_json::Value> {
    let output = bb()
        .arg("history")
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

pub fn ledger_path(temp: &TempDir) -> PathBuf {
    temp.path().join(".betterbeads").join("history.jsonl")
}
