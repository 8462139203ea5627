// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    not_in_repo = { Error::NotInRepository, "BB_ROOT" },
    op_not_found = { Error::OperationNotFound("op_12345678".into()), "op_12345678" },
    nothing = { Error::NothingToUndo, "no operations to undo" },
    required = { Error::RequiredFor { field: "--target", operation: "--record" }, "--target is required for --record" },
    git = { Error::Git("not a git repository".into()), "git error: not a git repository" },
)]
fn error_display(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected), "{err}");
}

#[test]
fn core_errors_map_to_matching_variants() {
    let err: Error = bb_core::Error::InvalidDependency("x#y".into()).into();
    assert!(matches!(err, Error::InvalidDependency(ref s) if s == "x#y"));

    let err: Error = bb_core::Error::Tracker("rate limited".into()).into();
    assert!(matches!(err, Error::Tracker(_)));

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: Error = bb_core::Error::Io(io).into();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn core_error_hints_survive_conversion() {
    let err: Error = bb_core::Error::InvalidTimestamp("yesterday".into()).into();
    assert!(err.to_string().contains("hint:"));
}
