//! Turning raw text into a section tree.
//!
//! Heading lines come from a [`Format`] backend; this module builds the parent/child links
//! with a stack of open ancestors and closes every section at the next heading of the same
//! or a shallower level. Text before the first heading belongs to no section.

use crate::error::{Error, Result};
use crate::formats::atx::AtxLineFormat;
use crate::formats::{Format, HeadingLine};
use crate::section::Section;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default)]
/// Parsing knobs that differ between outlines and manuscripts.
pub struct ParseOptions {
    /// Deeper markers are clamped to this level rather than ignored.
    pub max_level: Option<usize>,
    /// Title of the level-1 heading at which the source is cut off.
    pub stop_heading: Option<String>,
}

impl ParseOptions {
    #[must_use]
    /// Options for outlines: depth capped at three.
    pub fn outline() -> Self {
        Self {
            max_level: Some(3),
            stop_heading: None,
        }
    }

    #[must_use]
    /// Options for manuscripts: unbounded depth, cut before the given top-level heading.
    pub fn manuscript(stop_heading: &str) -> Self {
        Self {
            max_level: None,
            stop_heading: Some(stop_heading.to_string()),
        }
    }
}

#[derive(Clone, Debug, Default)]
/// A parsed source: its lines plus the flat section forest over them.
pub struct Document {
    /// Source lines without terminators.
    pub lines: Vec<String>,
    /// Sections in document order.
    pub sections: Vec<Section>,
}

impl Document {
    /// Parses `source` into lines and sections.
    ///
    /// # Errors
    ///
    /// Returns an error if the format backend fails.
    pub fn parse(source: &str, format: &dyn Format, options: &ParseOptions) -> Result<Self> {
        let source = match &options.stop_heading {
            Some(title) => truncate_before_heading(source, title),
            None => source,
        };
        let mut headings = format.scan_headings(source)?;
        if let Some(cap) = options.max_level {
            for heading in &mut headings {
                heading.level = heading.level.min(cap);
            }
        }
        let lines: Vec<String> = source.lines().map(str::to_string).collect();
        let sections = build_sections(&headings, lines.len());
        Ok(Self { lines, sections })
    }

    /// Indices of sections without a parent, in document order.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.parent_index.is_none())
            .map(|(i, _)| i)
    }

    #[must_use]
    /// Display titles from the outermost ancestor down to the section itself.
    pub fn title_path(&self, index: usize) -> Vec<&str> {
        let mut path = Vec::new();
        let mut cursor = Some(index);
        while let Some(i) = cursor {
            let section = &self.sections[i];
            path.push(section.title.as_str());
            cursor = section.parent_index;
        }
        path.reverse();
        path
    }

    #[must_use]
    /// The lines in `range`, joined with newlines.
    pub fn text(&self, range: std::ops::Range<usize>) -> String {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        self.lines[start..end].join("\n")
    }
}

/// Links headings into a forest and assigns each its `line_end`.
fn build_sections(headings: &[HeadingLine], total_lines: usize) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::with_capacity(headings.len());
    let mut stack: Vec<usize> = Vec::new();

    for heading in headings {
        while let Some(&top) = stack.last() {
            if sections[top].level >= heading.level {
                stack.pop();
            } else {
                break;
            }
        }
        let index = sections.len();
        let parent_index = stack.last().copied();
        if let Some(parent) = parent_index {
            sections[parent].children_indices.push(index);
        }
        sections.push(Section {
            title: heading.title.clone(),
            level: heading.level,
            heading_line: heading.row,
            line_start: heading.row + 1,
            line_end: total_lines,
            parent_index,
            children_indices: Vec::new(),
        });
        stack.push(index);
    }

    for i in 0..sections.len() {
        let level = sections[i].level;
        if let Some(next) = sections[i + 1..].iter().find(|s| s.level <= level) {
            sections[i].line_end = next.heading_line;
        }
    }

    sections
}

#[must_use]
/// Keeps only the text before the first level-1 heading titled exactly `title`.
pub fn truncate_before_heading<'a>(source: &'a str, title: &str) -> &'a str {
    let mut offset = 0;
    for line in source.split_inclusive('\n') {
        let bare = line.trim_end_matches(['\n', '\r']);
        if let Some((1, found)) = AtxLineFormat::parse_line(bare) {
            if found == title {
                return &source[..offset];
            }
        }
        offset += line.len();
    }
    source
}

/// Reads a UTF-8 text file.
///
/// # Errors
///
/// Returns `Error::Read` if the file cannot be read as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
