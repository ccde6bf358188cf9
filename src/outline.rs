//! Outline parsing: a heading tree at most three levels deep with authoring tags.
//!
//! An outline heading at level two or three may be followed by a `<tag>...</tag>` note before
//! the next heading. Level-one headings never carry a tag.

use crate::error::Result;
use crate::formats::Format;
use crate::input::{Document, ParseOptions};
use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<tag>(.*?)</tag>").expect("tag pattern is valid"));

#[derive(Clone, Debug, PartialEq, Eq)]
/// One outline heading with its note and nested headings.
pub struct OutlineNode {
    /// Heading text as written in the outline.
    pub title: String,
    /// Depth after clamping, 1 to 3.
    pub level: usize,
    /// Authoring note, empty when absent.
    pub tag: String,
    /// Nested headings in document order.
    pub children: Vec<OutlineNode>,
}

/// Parses outline text into its top-level nodes.
///
/// # Errors
///
/// Returns an error if the format backend fails.
pub fn parse_outline(source: &str, format: &dyn Format) -> Result<Vec<OutlineNode>> {
    let document = Document::parse(source, format, &ParseOptions::outline())?;
    Ok(document
        .roots()
        .map(|root| build_node(&document, root))
        .collect())
}

fn build_node(document: &Document, index: usize) -> OutlineNode {
    let section = &document.sections[index];
    OutlineNode {
        title: section.title.clone(),
        level: section.level,
        tag: tag_for(document, index),
        children: section
            .children_indices
            .iter()
            .map(|&child| build_node(document, child))
            .collect(),
    }
}

/// The first tag between a heading and the next heading of any level.
fn tag_for(document: &Document, index: usize) -> String {
    let section = &document.sections[index];
    if section.level == 1 {
        return String::new();
    }
    let block_end = document
        .sections
        .get(index + 1)
        .map_or(document.lines.len(), |next| next.heading_line);
    let block = document.text(section.line_start..block_end);
    TAG_RE
        .captures(&block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
