//! Line-oriented ATX heading scanner.
//!
//! Every line beginning with one to six `#` markers followed by whitespace is a heading,
//! wherever it appears. This is the default backend: it treats both the outline and the
//! manuscript as flat heading-delimited text.

use crate::error::Result;
use crate::formats::{clean_title, Format, HeadingLine};
use regex::Regex;
use std::sync::LazyLock;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6})[ \t]+(.*?)[ \t]*#*[ \t]*$").expect("heading pattern is valid")
});

/// Regex scanner for `#`-prefixed heading lines.
pub struct AtxLineFormat;

impl AtxLineFormat {
    #[must_use]
    /// Parses a single line as a heading, returning its level and title.
    pub fn parse_line(line: &str) -> Option<(usize, String)> {
        let caps = HEADING_RE.captures(line)?;
        let level = caps.get(1).map_or(0, |m| m.as_str().len());
        let title = caps.get(2).map_or("", |m| m.as_str());
        Some((level, clean_title(title)))
    }
}

impl Format for AtxLineFormat {
    fn name(&self) -> &'static str {
        "atx"
    }

    fn scan_headings(&self, source: &str) -> Result<Vec<HeadingLine>> {
        Ok(source
            .lines()
            .enumerate()
            .filter_map(|(row, line)| {
                Self::parse_line(line).map(|(level, title)| HeadingLine { row, level, title })
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "../tests/atx.rs"]
mod tests;
