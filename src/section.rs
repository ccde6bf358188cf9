//! Section representation for heading-delimited documents.
//!
//! A section represents one heading occurrence and the lines it governs. Sections are stored
//! in a flat vector in document order; parent/child relationships are indices into that
//! vector, so the parent link is a plain lookup used for title paths and never owns anything.

use std::ops::Range;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Hierarchical document division with line coordinates for content extraction.
pub struct Section {
    /// Section heading text without markup symbols.
    pub title: String,
    /// Nesting depth in the document hierarchy (1 for top-level).
    pub level: usize,
    /// Line holding the heading marker (0-indexed).
    pub heading_line: usize,
    /// First line of section content (after the heading).
    pub line_start: usize,
    /// Line where the next sibling-or-shallower section begins, or the line count.
    pub line_end: usize,
    /// Index of the containing section in the hierarchy.
    pub parent_index: Option<usize>,
    /// Indices of directly nested subsections, in document order.
    pub children_indices: Vec<usize>,
}

impl Section {
    #[must_use]
    /// Lines governed by this section, its descendants included, heading line excluded.
    pub fn body(&self) -> Range<usize> {
        self.line_start..self.line_end
    }

    #[must_use]
    /// Lines this section removes from its parent's body: heading line through `line_end`.
    pub fn span(&self) -> Range<usize> {
        self.heading_line..self.line_end
    }
}
