// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    bare_number = { "42", None, 42 },
    hash_number = { "#42", None, 42 },
    padded = { "  #7 ", None, 7 },
    foreign = { "acme/lib#7", Some("acme/lib"), 7 },
    dotted_repo = { "my-org/repo.rs#101", Some("my-org/repo.rs"), 101 },
)]
fn parse_valid_reference(input: &str, repo: Option<&str>, number: u64) {
    let dep: DependencyRef = input.parse().unwrap();
    assert_eq!(dep.repo.as_deref(), repo);
    assert_eq!(dep.number, number);
}

#[parameterized(
    empty = { "" },
    word = { "abc" },
    hash_only = { "#" },
    hash_word = { "#x" },
    no_owner = { "lib#7" },
    trailing_text = { "#7 later" },
    negative = { "-3" },
)]
fn parse_invalid_reference(input: &str) {
    let err = input.parse::<DependencyRef>().unwrap_err();
    assert!(matches!(err, Error::InvalidDependency(_)));
}

#[test]
fn from_number_is_local() {
    assert_eq!(DependencyRef::from(42), DependencyRef::local(42));
}

#[test]
fn in_repo_rejects_bad_shape() {
    assert!(DependencyRef::in_repo("acme", 1).is_err());
    assert!(DependencyRef::in_repo("acme/lib/extra", 1).is_err());
    assert!(DependencyRef::in_repo("acme/lib", 1).is_ok());
}

#[parameterized(
    local = { DependencyRef::local(42), "#42" },
    foreign = { DependencyRef { repo: Some("acme/lib".into()), number: 7 }, "acme/lib#7" },
)]
fn reference_display(dep: DependencyRef, expected: &str) {
    assert_eq!(dep.to_string(), expected);
}

#[test]
fn item_markdown_line() {
    let mut item = DependencyItem::new(DependencyRef::local(42));
    assert_eq!(item.to_string(), "- [ ] #42");

    item.complete = true;
    item.description = Some("Parser rewrite".into());
    assert_eq!(item.to_string(), "- [x] #42 Parser rewrite");
}

#[test]
fn item_identity_ignores_completion() {
    let mut item = DependencyItem::new("acme/lib#7".parse().unwrap());
    item.complete = true;
    assert!(item.refers_to(&"acme/lib#7".parse().unwrap()));
    assert!(!item.refers_to(&DependencyRef::local(7)));
}
