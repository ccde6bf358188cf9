//! Format trait and implementations for recognising heading lines.
//!
//! This module defines the `Format` trait which abstracts over how heading lines are found in a
//! source text: a plain per-line scanner for ATX markers, or the tree-sitter markdown grammar
//! when code blocks and HTML blocks must not be mistaken for headings.

pub mod atx;
pub mod markdown;

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
/// A heading occurrence as reported by a format backend, before any tree is built.
pub struct HeadingLine {
    /// Line index of the heading marker (0-indexed).
    pub row: usize,
    /// Count of marker characters, 1 to 6.
    pub level: usize,
    /// Heading text with markers and surrounding whitespace removed.
    pub title: String,
}

/// Finds heading lines in a source text.
pub trait Format: Send + Sync {
    /// Short name used in configuration files.
    fn name(&self) -> &'static str;

    /// Returns every heading line in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot parse the source.
    fn scan_headings(&self, source: &str) -> Result<Vec<HeadingLine>>;
}

/// Strips closing marker runs and whitespace from raw heading text.
pub(crate) fn clean_title(raw: &str) -> String {
    raw.trim().trim_end_matches('#').trim_end().to_string()
}

/// Selects a backend by its configuration name (`atx` or `commonmark`).
///
/// # Errors
///
/// Returns `Error::UnknownSyntax` for any other name.
pub fn from_name(name: &str) -> Result<Box<dyn Format>> {
    match name {
        "atx" => Ok(Box::new(atx::AtxLineFormat)),
        "commonmark" => Ok(Box::new(markdown::MarkdownFormat)),
        other => Err(Error::UnknownSyntax(other.to_string())),
    }
}
