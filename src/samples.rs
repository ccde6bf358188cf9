//! Training-sample generation from split fragments.
//!
//! Each usable fragment yields one sample per prefix ratio: the model sees the preceding text
//! (`context`) and the first part of the fragment (`hint`) and must produce the whole fragment
//! (`output`).

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
/// One prefix-completion training pair.
pub struct Sample {
    /// Text preceding the fragment.
    pub context: String,
    /// Leading part of the fragment.
    pub hint: String,
    /// The whole fragment.
    pub output: String,
    /// Share of the fragment given as hint.
    pub ratio: f64,
    /// Contents of the case's `user_intent.md`.
    pub user_intent: String,
    /// Contents of the case's `outline.md`.
    pub outline: String,
    /// Case label, e.g. `case0`.
    pub file: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Where a fragment's context comes from.
pub enum HistoryMode {
    /// Concatenation of every earlier fragment in the list.
    Cumulative,
    /// Manuscript text before the fragment's first occurrence.
    Located,
}

#[derive(Clone, Debug)]
/// Per-case inputs shared by every sample of that case.
pub struct CaseContext<'a> {
    /// Case label.
    pub label: &'a str,
    /// Contents of `user_intent.md`, empty if missing.
    pub user_intent: &'a str,
    /// Contents of `outline.md`, empty if missing.
    pub outline: &'a str,
    /// Full manuscript, required for [`HistoryMode::Located`].
    pub manuscript: &'a str,
}

#[derive(Clone, Debug)]
/// Sample generation settings.
pub struct SampleSettings {
    /// Hint ratios, one sample per ratio.
    pub ratios: Vec<f64>,
    /// Fragments with fewer chars produce no sample.
    pub min_chars: usize,
}

/// True for fragments too short to learn from, and for heading items.
fn is_skipped(fragment: &str, min_chars: usize) -> bool {
    fragment.chars().count() < min_chars || fragment.starts_with("\n#")
}

#[must_use]
/// The first `ceil(len * ratio)` chars of `fragment`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn hint_prefix(fragment: &str, ratio: f64) -> &str {
    let len = fragment.chars().count();
    let take = ((len as f64) * ratio).ceil().max(0.0) as usize;
    match fragment.char_indices().nth(take) {
        Some((offset, _)) => &fragment[..offset],
        None => fragment,
    }
}

/// Manuscript text before the first occurrence of `fragment`.
///
/// Tries an exact search, then one where every whitespace run in the fragment matches any
/// whitespace run in the manuscript.
#[must_use]
pub fn locate_history<'a>(manuscript: &'a str, fragment: &str) -> Option<&'a str> {
    if fragment.is_empty() {
        return None;
    }
    if let Some(at) = manuscript.find(fragment) {
        return Some(&manuscript[..at]);
    }
    let pattern = fragment
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    if pattern.is_empty() {
        return None;
    }
    match Regex::new(&pattern) {
        Ok(re) => re.find(manuscript).map(|m| &manuscript[..m.start()]),
        Err(e) => {
            warn!("whitespace-tolerant search failed: {e}");
            None
        }
    }
}

#[must_use]
/// Builds samples for one case's fragment list.
pub fn build_samples(
    fragments: &[String],
    mode: HistoryMode,
    case: &CaseContext<'_>,
    settings: &SampleSettings,
) -> Vec<Sample> {
    let mut samples = Vec::new();
    let mut history = String::new();

    for fragment in fragments {
        if is_skipped(fragment, settings.min_chars) {
            if mode == HistoryMode::Cumulative {
                history.push_str(fragment);
            } else if locate_history(case.manuscript, fragment).is_none() {
                debug!(
                    "{}: skipped fragment not found either: {:?}",
                    case.label,
                    preview(fragment)
                );
            }
            continue;
        }

        let context = match mode {
            HistoryMode::Cumulative => history.clone(),
            HistoryMode::Located => {
                if case.manuscript.is_empty() {
                    warn!(
                        "{}: no manuscript, cannot place {:?}",
                        case.label,
                        preview(fragment)
                    );
                    continue;
                }
                let Some(found) = locate_history(case.manuscript, fragment) else {
                    warn!(
                        "{}: fragment not found in manuscript: {:?}",
                        case.label,
                        preview(fragment)
                    );
                    continue;
                };
                found.to_string()
            }
        };

        for &ratio in &settings.ratios {
            samples.push(Sample {
                context: context.clone(),
                hint: hint_prefix(fragment, ratio).to_string(),
                output: fragment.clone(),
                ratio,
                user_intent: case.user_intent.to_string(),
                outline: case.outline.to_string(),
                file: case.label.to_string(),
            });
        }

        if mode == HistoryMode::Cumulative {
            history.push_str(fragment);
        }
    }

    samples
}

fn preview(fragment: &str) -> String {
    fragment.chars().take(50).collect()
}

#[cfg(test)]
#[path = "tests/samples.rs"]
mod tests;
