//! Matching outline title paths against the manuscript content index.
//!
//! Lookup order: the exact normalised path, then the first entry in manuscript order whose last
//! path element equals the outline node's own normalised title, then nothing. The title
//! fallback can pick a same-named section from an unrelated part of the manuscript; that is
//! the documented behaviour.

use crate::normalize::{normalize, normalize_path};
use crate::slicer::ContentIndex;
use std::fmt;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
/// How an outline node found its content.
pub enum MatchKind {
    /// The full normalised path exists in the manuscript.
    Exact,
    /// Only the node's own title matched; carries the manuscript path that was used.
    TitleFallback(Vec<String>),
    /// Nothing matched; content is empty.
    Unmatched,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// The content chosen for one outline node.
pub struct Match<'a> {
    /// Own content of the chosen manuscript section, empty when unmatched.
    pub content: &'a str,
    /// Which lookup step produced it.
    pub kind: MatchKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A non-fatal report about an outline node that did not match exactly.
pub struct Diagnostic {
    /// Display titles of the outline node's path.
    pub path: Vec<String>,
    /// The fallback outcome.
    pub kind: MatchKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.join(" > ");
        match &self.kind {
            MatchKind::Exact => write!(f, "matched {path}"),
            MatchKind::TitleFallback(used) => {
                write!(f, "matched {path} by title only (via {})", used.join(" > "))
            }
            MatchKind::Unmatched => write!(f, "no manuscript section matches {path}"),
        }
    }
}

/// Resolves outline paths against one manuscript's content index.
pub struct Matcher<'a> {
    index: &'a ContentIndex,
}

impl<'a> Matcher<'a> {
    #[must_use]
    /// Wraps a content index.
    pub fn new(index: &'a ContentIndex) -> Self {
        Self { index }
    }

    #[must_use]
    /// Finds content for the outline node whose display-title path is `titles`.
    pub fn find<S: AsRef<str>>(&self, titles: &[S]) -> Match<'a> {
        let key = normalize_path(titles);
        if let Some(content) = self.index.get(&key) {
            return Match {
                content,
                kind: MatchKind::Exact,
            };
        }

        let tail = titles.last().map(|t| normalize(t.as_ref())).unwrap_or_default();
        if let Some(entry) = self
            .index
            .iter()
            .find(|entry| entry.path.last() == Some(&tail))
        {
            return Match {
                content: &entry.content,
                kind: MatchKind::TitleFallback(entry.path.clone()),
            };
        }

        Match {
            content: "",
            kind: MatchKind::Unmatched,
        }
    }

    /// Like [`Matcher::find`], but logs and records anything other than an exact hit.
    pub fn resolve<S: AsRef<str>>(
        &self,
        titles: &[S],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> &'a str {
        let found = self.find(titles);
        if found.kind != MatchKind::Exact {
            let diagnostic = Diagnostic {
                path: titles.iter().map(|t| t.as_ref().to_string()).collect(),
                kind: found.kind,
            };
            match diagnostic.kind {
                MatchKind::Unmatched => warn!("{diagnostic}"),
                _ => debug!("{diagnostic}"),
            }
            diagnostics.push(diagnostic);
        }
        found.content
    }
}

#[cfg(test)]
#[path = "tests/matcher.rs"]
mod tests;
