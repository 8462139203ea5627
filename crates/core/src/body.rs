// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pure text-to-text edits over item bodies.
//!
//! Every function here takes the full body and returns the full new body.
//! When the target (section, line, dependency) is absent the input comes
//! back unchanged; callers detect a no-op by comparing the two. Nothing in
//! this module returns an error.
//!
//! Multi-span edits are collected first and applied from the highest start
//! offset down, so spans not yet rewritten keep valid offsets.

use regex::Captures;
use serde_json::{Map, Value};
use std::ops::Range;

use crate::config::DependencyConfig;
use crate::dependency::{DependencyItem, DependencyRef};
use crate::span::{
    checklist_items, dependency_section, find_section, parse_task_items,
    task_item_from_captures, ChecklistItem, TASK_ITEM_RE,
};

/// Before/after text of one body mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyChange {
    pub before: String,
    pub after: String,
}

impl BodyChange {
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        BodyChange {
            before: before.into(),
            after: after.into(),
        }
    }

    /// True when the mutation left the text untouched.
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }

    /// Partial `before`/`after` maps for an operation record.
    pub fn to_fields(&self) -> (Map<String, Value>, Map<String, Value>) {
        let mut before = Map::new();
        let mut after = Map::new();
        before.insert("body".to_string(), Value::String(self.before.clone()));
        after.insert("body".to_string(), Value::String(self.after.clone()));
        (before, after)
    }
}

/// Applies non-overlapping replacements, last span first.
pub fn apply_edits(text: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));
    let mut result = text.to_string();
    for (range, replacement) in edits {
        result.replace_range(range, &replacement);
    }
    result
}

fn splice(text: &str, range: Range<usize>, replacement: &str) -> String {
    apply_edits(text, vec![(range, replacement.to_string())])
}

/// The whitespace run that followed trimmed content, starting at its first
/// newline. Content that ended without a newline gets one.
fn line_ending_run(trailing: &str) -> &str {
    match trailing.find('\n') {
        Some(idx) => &trailing[idx..],
        None => "\n",
    }
}

/// Content with `lines` placed after its last non-whitespace text.
fn append_lines(content: &str, lines: &str) -> String {
    let kept = content.trim_end();
    let mut result = String::with_capacity(content.len() + lines.len() + 1);
    if !kept.is_empty() {
        result.push_str(kept);
        result.push('\n');
    }
    result.push_str(lines);
    result.push_str(line_ending_run(&content[kept.len()..]));
    result
}

/// Adds dependency lines, creating the section when needed.
///
/// References already present in the section (by `(repo, number)`) are
/// skipped; if nothing is new the body is returned unchanged.
pub fn add_dependencies(body: &str, deps: &[DependencyRef], config: &DependencyConfig) -> String {
    let mut wanted: Vec<&DependencyRef> = Vec::new();
    for dep in deps {
        if !wanted.contains(&dep) {
            wanted.push(dep);
        }
    }

    match dependency_section(body, config) {
        Some(section) => {
            let content = section.content(body);
            let existing = parse_task_items(content);
            let new_lines: Vec<String> = wanted
                .into_iter()
                .filter(|dep| !existing.iter().any(|item| item.refers_to(dep)))
                .map(|dep| DependencyItem::new(dep.clone()).to_string())
                .collect();
            if new_lines.is_empty() {
                return body.to_string();
            }
            let new_content = append_lines(content, &new_lines.join("\n"));
            splice(body, section.content_start..section.end, &new_content)
        }
        None => {
            if wanted.is_empty() {
                return body.to_string();
            }
            let mut result = body.trim_end().to_string();
            if !result.is_empty() {
                result.push_str("\n\n");
            }
            result.push_str(&config.separator);
            result.push('\n');
            result.push_str(&config.section_header);
            result.push('\n');
            for dep in wanted {
                result.push_str(&DependencyItem::new(dep.clone()).to_string());
                result.push('\n');
            }
            result
        }
    }
}

/// Removes the lines referencing any of `deps` from the section.
///
/// When no content is left the header and its separator go too.
pub fn remove_dependencies(
    body: &str,
    deps: &[DependencyRef],
    config: &DependencyConfig,
) -> String {
    let Some(section) = dependency_section(body, config) else {
        return body.to_string();
    };
    let content = section.content(body);

    let kept: Vec<&str> = content
        .split('\n')
        .filter(|line| {
            let item = TASK_ITEM_RE
                .captures(line)
                .and_then(|caps| task_item_from_captures(&caps));
            match item {
                Some(item) => !deps.iter().any(|dep| item.refers_to(dep)),
                None => true,
            }
        })
        .collect();
    let new_content = kept.join("\n");
    if new_content == content {
        return body.to_string();
    }

    if new_content.trim().is_empty() {
        let before = &body[..section.start];
        let after = &body[section.end..];
        if after.is_empty() {
            return before.trim_end().to_string();
        }
        return format!("{before}{after}");
    }

    splice(body, section.content_start..section.end, &new_content)
}

/// Sets the checkbox of every line referencing `dep`, anywhere in the body.
///
/// Only the checkbox character changes; references and descriptions are
/// left byte-for-byte as written.
pub fn set_task_complete(body: &str, dep: &DependencyRef, complete: bool) -> String {
    let mark = if complete { 'x' } else { ' ' };
    TASK_ITEM_RE
        .replace_all(body, |caps: &Captures<'_>| {
            let whole = &caps[0];
            match task_item_from_captures(caps) {
                Some(item) if item.refers_to(dep) => format!("- [{mark}] {}", &whole[6..]),
                _ => whole.to_string(),
            }
        })
        .into_owned()
}

/// Sets every checklist item whose text contains `pattern`.
///
/// Returns the new text and the matched items (with `complete` updated and
/// spans valid for both the old and new text, since line lengths do not
/// change).
pub fn toggle_task_by_text(
    content: &str,
    pattern: &str,
    complete: bool,
    case_sensitive: bool,
) -> (String, Vec<ChecklistItem>) {
    let needle = if case_sensitive {
        pattern.to_string()
    } else {
        pattern.to_lowercase()
    };
    let matched: Vec<ChecklistItem> = checklist_items(content)
        .into_iter()
        .filter(|item| {
            if case_sensitive {
                item.text.contains(&needle)
            } else {
                item.text.to_lowercase().contains(&needle)
            }
        })
        .collect();

    if matched.is_empty() {
        return (content.to_string(), Vec::new());
    }

    let edits = matched
        .iter()
        .map(|item| (item.span(), item.render(complete)))
        .collect();
    let result = apply_edits(content, edits);

    let toggled = matched
        .into_iter()
        .map(|mut item| {
            item.complete = complete;
            item
        })
        .collect();
    (result, toggled)
}

/// Sets the checklist item on `line_number` (1-based).
pub fn toggle_task_at_line(
    content: &str,
    line_number: usize,
    complete: bool,
) -> (String, Option<ChecklistItem>) {
    let Some(mut item) = checklist_items(content)
        .into_iter()
        .find(|item| item.line_number == line_number)
    else {
        return (content.to_string(), None);
    };

    let result = splice(content, item.span(), &item.render(complete));
    item.complete = complete;
    (result, Some(item))
}

/// Replaces a section's content, keeping its header line as written.
///
/// A newline is added to non-empty content only when more text follows the
/// section, so the next heading stays on its own line.
pub fn replace_section_content(content: &str, header: &str, new_content: &str) -> String {
    let Some(section) = find_section(content, header) else {
        return content.to_string();
    };

    let mut replacement = new_content.to_string();
    if !replacement.is_empty() && !replacement.ends_with('\n') && section.end < content.len() {
        replacement.push('\n');
    }
    splice(content, section.content_start..section.end, &replacement)
}

/// Appends `text` as a new line after the section's last non-blank line.
pub fn append_to_section(content: &str, header: &str, text: &str) -> String {
    let Some(section) = find_section(content, header) else {
        return content.to_string();
    };
    let new_content = append_lines(&section.content, text);
    replace_section_content(content, header, &new_content)
}

#[cfg(test)]
#[path = "body_tests.rs"]
mod tests;
