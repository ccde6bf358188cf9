//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides tree-sitter queries for parsing markdown documents and extracting
//! ATX-style headings (# syntax). Unlike the line scanner, `#` lines inside fenced code,
//! indented code and HTML blocks are not reported.

use crate::error::{Error, Result};
use crate::formats::{clean_title, Format, HeadingLine};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Tree-sitter queries for ATX-style markdown headings (# syntax).
pub struct MarkdownFormat;

impl MarkdownFormat {
    #[must_use]
    /// The block-level markdown grammar.
    pub fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    #[must_use]
    /// Query capturing every ATX heading node.
    pub fn section_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }
}

/// Reads the depth from an `atx_hN_marker` child and the text from the `inline` child.
fn heading_parts(node: Node<'_>, source: &[u8]) -> Option<(usize, String)> {
    let mut level = None;
    let mut title = String::new();
    let mut walk = node.walk();
    for child in node.children(&mut walk) {
        let kind = child.kind();
        if let Some(depth) = kind
            .strip_prefix("atx_h")
            .and_then(|rest| rest.strip_suffix("_marker"))
            .and_then(|digit| digit.parse::<usize>().ok())
        {
            level = Some(depth);
        } else if kind == "inline" {
            title = clean_title(child.utf8_text(source).unwrap_or_default());
        }
    }
    level.map(|level| (level, title))
}

impl Format for MarkdownFormat {
    fn name(&self) -> &'static str {
        "commonmark"
    }

    fn scan_headings(&self, source: &str) -> Result<Vec<HeadingLine>> {
        let language = self.language();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| Error::Parse(e.to_string()))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse("tree-sitter returned no tree".to_string()))?;
        let query =
            Query::new(&language, self.section_query()).map_err(|e| Error::Parse(e.to_string()))?;

        let bytes = source.as_bytes();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), bytes);
        let mut headings = Vec::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                if let Some((level, title)) = heading_parts(node, bytes) {
                    headings.push(HeadingLine {
                        row: node.start_position().row,
                        level,
                        title,
                    });
                }
            }
        }
        headings.sort_by_key(|h| h.row);
        headings.dedup_by_key(|h| h.row);
        Ok(headings)
    }
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
