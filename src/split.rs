//! Punctuation-based sentence and clause splitting of a manuscript.
//!
//! Heading lines (levels one to three) are kept as standalone items wrapped in newlines. All
//! other text is cut after full-width sentence terminators, or additionally after full-width
//! commas for the clause list.

use crate::input::truncate_before_heading;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SPLIT_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}#{1,3}\s").expect("split heading pattern is valid"));

/// Sentence terminators.
const SENTENCE_ENDS: [char; 4] = ['。', '？', '！', '；'];

/// Clause terminators: sentence terminators plus the full-width comma.
const CLAUSE_ENDS: [char; 5] = ['，', '。', '？', '！', '；'];

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
/// The two granularities produced from one manuscript.
pub struct SplitLists {
    /// Sentence-level fragments.
    pub sentences: Vec<String>,
    /// Clause-level fragments.
    pub clauses: Vec<String>,
}

/// Splits a manuscript, ignoring everything from the top-level `stop_heading` on.
#[must_use]
pub fn split_markdown(text: &str, stop_heading: &str) -> SplitLists {
    let text = truncate_before_heading(text, stop_heading)
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let mut lists = SplitLists::default();
    let mut block = String::new();
    for line in text.split_inclusive('\n') {
        let bare = line.strip_suffix('\n').unwrap_or(line);
        if SPLIT_HEADING_RE.is_match(bare) {
            flush_block(&mut lists, &block);
            block.clear();
            let item = format!("\n{}\n", bare.trim());
            lists.sentences.push(item.clone());
            lists.clauses.push(item);
        } else {
            block.push_str(line);
        }
    }
    flush_block(&mut lists, &block);
    lists
}

fn flush_block(lists: &mut SplitLists, block: &str) {
    if block.is_empty() {
        return;
    }
    lists.sentences.extend(split_after(block, &SENTENCE_ENDS));
    lists.clauses.extend(split_after(block, &CLAUSE_ENDS));
}

/// Cuts `text` after every character in `ends`, trimming pieces and dropping blank ones.
#[must_use]
pub fn split_after(text: &str, ends: &[char]) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (offset, ch) in text.char_indices() {
        if ends.contains(&ch) {
            let end = offset + ch.len_utf8();
            pieces.push(&text[start..end]);
            start = end;
        }
    }
    pieces.push(&text[start..]);
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "tests/split.rs"]
mod tests;
