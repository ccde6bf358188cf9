//! Canonical keys for heading titles.
//!
//! Outline and manuscript headings are written independently, so the same section may appear
//! as `1. Methods`, `一、Methods` or `**Methods**`. [`normalize`] collapses such variants to one
//! key. The transform is lossy on purpose; distinct headings that differ only in numbering or
//! punctuation share a key.

use regex::Regex;
use std::sync::LazyLock;
use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

static LEADING_DECORATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\s.\-–—＊*•·()【】\[\]\{\}]+").expect("decoration pattern is valid")
});

static ARABIC_NUMBERING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+[.\-、：:)]\s*").expect("arabic numbering pattern is valid")
});

static CJK_NUMBERING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[一二三四五六七八九十百千]+[、.．：:)]\s*")
        .expect("cjk numbering pattern is valid")
});

/// Characters that mark inline code or emphasis.
const INLINE_MARKS: [char; 3] = ['`', '*', '_'];

fn is_cjk_ideograph(ch: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&ch)
}

/// Letter (`L*`) or number (`N*`) general category. Combining marks are neither.
fn is_letter_or_number(ch: char) -> bool {
    matches!(
        get_general_category(ch),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

#[must_use]
/// Produces the matching key for a heading title.
///
/// NFKC-normalises, strips leading decoration and a leading Arabic or CJK numbering prefix,
/// drops inline markup characters, lower-cases, and keeps only letters, digits and CJK
/// ideographs.
pub fn normalize(title: &str) -> String {
    let folded: String = title.nfkc().collect();
    let text = folded.trim();
    let text = LEADING_DECORATION.replace(text, "");
    let text = ARABIC_NUMBERING.replace(&text, "");
    let text = CJK_NUMBERING.replace(&text, "");
    let text: String = text.chars().filter(|c| !INLINE_MARKS.contains(c)).collect();
    text.to_lowercase()
        .chars()
        .filter(|&c| is_letter_or_number(c) || is_cjk_ideograph(c))
        .collect()
}

#[must_use]
/// Normalises every title of a root-to-node path.
pub fn normalize_path<S: AsRef<str>>(titles: &[S]) -> Vec<String> {
    titles.iter().map(|t| normalize(t.as_ref())).collect()
}

#[cfg(test)]
#[path = "tests/normalize.rs"]
mod tests;
