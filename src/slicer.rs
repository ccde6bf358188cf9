//! Own-content slicing and the title-path content index.
//!
//! A section's own content is its body minus the spans of its direct children. The kept line
//! ranges are sliced verbatim, trimmed of blank lines at their ends, and joined with one blank
//! line. Empty own content is the empty string, and non-empty content carries no trailing
//! newline.

use crate::input::Document;
use crate::normalize::normalize_path;
use std::collections::HashMap;
use std::ops::Range;

/// Line ranges of a section's body not covered by any direct child's span.
///
/// Ranges are ordered, disjoint and non-empty.
#[must_use]
pub fn own_ranges(document: &Document, index: usize) -> Vec<Range<usize>> {
    let section = &document.sections[index];
    let mut children: Vec<Range<usize>> = section
        .children_indices
        .iter()
        .map(|&c| document.sections[c].span())
        .collect();
    children.sort_by_key(|r| r.start);

    let mut ranges = Vec::new();
    let mut cursor = section.line_start;
    for child in children {
        if child.start > cursor {
            ranges.push(cursor..child.start);
        }
        cursor = cursor.max(child.end);
    }
    if section.line_end > cursor {
        ranges.push(cursor..section.line_end);
    }
    ranges
}

#[must_use]
/// The text owned by a section alone, see the module docs for the joining policy.
pub fn own_content(document: &Document, index: usize) -> String {
    own_ranges(document, index)
        .into_iter()
        .map(|range| document.text(range).trim_matches('\n').to_string())
        .filter(|piece| !piece.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One manuscript section keyed by its normalised title path.
pub struct IndexEntry {
    /// Normalised titles from the outermost ancestor down to the section.
    pub path: Vec<String>,
    /// The section's own content.
    pub content: String,
}

#[derive(Clone, Debug, Default)]
/// Insertion-ordered map from normalised title path to own content.
///
/// When two sections share a path, the later section's content replaces the earlier one's
/// but the entry keeps the first section's position in the scan order.
pub struct ContentIndex {
    entries: Vec<IndexEntry>,
    by_path: HashMap<Vec<String>, usize>,
}

impl ContentIndex {
    #[must_use]
    /// Indexes every section of a parsed manuscript.
    pub fn build(document: &Document) -> Self {
        let mut index = Self::default();
        for i in 0..document.sections.len() {
            let path = normalize_path(&document.title_path(i));
            index.insert(path, own_content(document, i));
        }
        index
    }

    /// Adds or replaces the content stored under `path`.
    pub fn insert(&mut self, path: Vec<String>, content: String) {
        if let Some(&slot) = self.by_path.get(&path) {
            self.entries[slot].content = content;
        } else {
            self.by_path.insert(path.clone(), self.entries.len());
            self.entries.push(IndexEntry { path, content });
        }
    }

    #[must_use]
    /// Content stored under exactly this normalised path.
    pub fn get(&self, path: &[String]) -> Option<&str> {
        self.by_path
            .get(path)
            .map(|&slot| self.entries[slot].content.as_str())
    }

    /// Entries in manuscript document order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    #[must_use]
    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// True when the manuscript had no headings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/slicer.rs"]
mod tests;
