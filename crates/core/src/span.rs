// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Locates structured spans inside free-text bodies.
//!
//! Three structures are recognised, all reported as byte offsets into the
//! same `&str` so edits computed from one scan can be composed:
//!
//! - dependency lines (`- [ ] #12`, `- [x] owner/repo#34 text`), scoped to
//!   the configured Dependencies section,
//! - generic checklist lines (`- [ ] anything`) anywhere in the body,
//! - headed sections at levels 1-6.
//!
//! A section's content stops at the next heading of *any* level, so a
//! sub-heading ends its parent rather than nesting inside it.

use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::LazyLock;

use crate::config::DependencyConfig;
use crate::dependency::DependencyItem;

// Compile-time constant patterns, verified by the tests in span_tests.rs.
pub(crate) static TASK_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"(?m)^- \[([ xX])\] (?:([a-zA-Z0-9_.-]+/[a-zA-Z0-9_.-]+))?#([0-9]+)(.*)$") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
});
static CHECKLIST_RE: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"^- \[([ xX])\] (.+)$") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });

/// A checklist line anywhere in a body. Recomputed on every scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    /// Visible text after the checkbox.
    pub text: String,
    pub complete: bool,
    /// 1-based line number.
    pub line_number: usize,
    /// Byte offset of the line start.
    pub start: usize,
    /// Byte offset of the line end, excluding the newline.
    pub end: usize,
}

impl ChecklistItem {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The line as it reads with the checkbox set to `complete`.
    pub fn render(&self, complete: bool) -> String {
        format!("- [{}] {}", if complete { 'x' } else { ' ' }, self.text)
    }
}

/// A headed section of a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Header text without hashes, trimmed.
    pub header: String,
    /// Heading level, 1-6.
    pub level: usize,
    /// Everything between the header line and the next heading.
    pub content: String,
    /// Offset of the header line.
    pub start: usize,
    /// Offset just past the header line's newline.
    pub content_start: usize,
    /// Offset where the next heading (or the document) begins.
    pub end: usize,
}

impl Section {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Position of the Dependencies section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencySection {
    /// Offset of the separator line if present, else of the header line.
    pub start: usize,
    pub header_start: usize,
    pub content_start: usize,
    pub end: usize,
    pub has_separator: bool,
}

impl DependencySection {
    /// The section body after the header line.
    pub fn content<'a>(&self, text: &'a str) -> &'a str {
        &text[self.content_start..self.end]
    }

    /// Separator (if any) plus header line, exactly as written.
    pub fn preamble<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.content_start]
    }
}

/// Splits on `\n`, yielding each line's start offset and text.
pub(crate) fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split('\n').map(move |line| {
        let start = offset;
        offset += line.len() + 1;
        (start, line)
    })
}

/// Returns the level if `line` opens with 1-6 hashes and a space.
fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if (1..=6).contains(&hashes) && line.as_bytes().get(hashes) == Some(&b' ') {
        Some(hashes)
    } else {
        None
    }
}

/// Every checklist line in `text`, in document order.
pub fn checklist_items(text: &str) -> Vec<ChecklistItem> {
    lines_with_offsets(text)
        .enumerate()
        .filter_map(|(idx, (start, line))| {
            let caps = CHECKLIST_RE.captures(line)?;
            Some(ChecklistItem {
                text: caps[2].to_string(),
                complete: caps[1].eq_ignore_ascii_case("x"),
                line_number: idx + 1,
                start,
                end: start + line.len(),
            })
        })
        .collect()
}

/// Every locatable section in `text`, in document order.
///
/// A header line must be followed by a newline to open a section, but any
/// heading-shaped line closes the one before it.
pub fn sections(text: &str) -> Vec<Section> {
    let lines: Vec<(usize, &str)> = lines_with_offsets(text).collect();
    let boundaries: Vec<usize> = lines
        .iter()
        .filter(|(_, line)| heading_level(line).is_some())
        .map(|(start, _)| *start)
        .collect();

    let mut found = Vec::new();
    for (start, line) in &lines {
        let Some(level) = heading_level(line) else {
            continue;
        };
        let header_text = &line[level + 1..];
        let content_start = start + line.len() + 1;
        if header_text.is_empty() || content_start > text.len() {
            continue;
        }
        let end = boundaries
            .iter()
            .copied()
            .find(|b| *b >= content_start)
            .unwrap_or(text.len());
        found.push(Section {
            header: header_text.trim().to_string(),
            level,
            content: text[content_start..end].to_string(),
            start: *start,
            content_start,
            end,
        });
    }
    found
}

/// Finds the first section whose header matches, ignoring case.
///
/// `header` may be given with or without its leading hashes.
pub fn find_section(text: &str, header: &str) -> Option<Section> {
    let wanted = header.trim();
    let wanted = match heading_level(wanted) {
        Some(level) => wanted[level + 1..].trim(),
        None => wanted,
    }
    .to_lowercase();

    sections(text)
        .into_iter()
        .find(|s| s.header.to_lowercase() == wanted)
}

/// Locates the Dependencies section described by `config`.
///
/// The section runs until the next heading no deeper than
/// [`DependencyConfig::closing_level`] or the end of the document.
pub fn dependency_section(text: &str, config: &DependencyConfig) -> Option<DependencySection> {
    let header = config.section_header.as_str();
    let closing = config.closing_level();

    let mut previous: Option<(usize, &str)> = None;
    let mut located = None;
    for (start, line) in lines_with_offsets(text) {
        let content_start = start + line.len() + 1;
        if line == header && content_start <= text.len() {
            let separator = previous.filter(|(_, prev)| *prev == config.separator);
            located = Some((separator.map(|(s, _)| s), start, content_start));
            break;
        }
        previous = Some((start, line));
    }
    let (separator_start, header_start, content_start) = located?;

    let end = lines_with_offsets(&text[content_start..])
        .find(|(_, line)| heading_level(line).is_some_and(|level| level <= closing))
        .map(|(offset, _)| content_start + offset)
        .unwrap_or(text.len());

    Some(DependencySection {
        start: separator_start.unwrap_or(header_start),
        header_start,
        content_start,
        end,
        has_separator: separator_start.is_some(),
    })
}

pub(crate) fn task_item_from_captures(caps: &Captures<'_>) -> Option<DependencyItem> {
    let number = caps[3].parse().ok()?;
    let description = caps[4].trim();
    Some(DependencyItem {
        number,
        repo: caps.get(2).map(|m| m.as_str().to_string()),
        complete: caps[1].eq_ignore_ascii_case("x"),
        description: (!description.is_empty()).then(|| description.to_string()),
    })
}

/// Every dependency-shaped checklist line in `text`, wherever it appears.
pub fn parse_task_items(text: &str) -> Vec<DependencyItem> {
    TASK_ITEM_RE
        .captures_iter(text)
        .filter_map(|caps| task_item_from_captures(&caps))
        .collect()
}

/// Dependency lines inside the Dependencies section only.
pub fn parse_dependencies(text: &str, config: &DependencyConfig) -> Vec<DependencyItem> {
    match dependency_section(text, config) {
        Some(section) => parse_task_items(section.content(text)),
        None => Vec::new(),
    }
}

#[cfg(test)]
#[path = "span_tests.rs"]
mod tests;
