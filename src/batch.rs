//! Batch processing over a dataset root of independent case directories.
//!
//! Every case holds one outline/manuscript pair. Cases share nothing, so each stage runs them
//! in parallel; a failing case is logged and counted while the rest carry on.

use crate::assemble::{reconcile, stored_contents, ResultNode};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::formats::{self, Format};
use crate::input::read_source;
use crate::samples::{build_samples, CaseContext, HistoryMode, Sample, SampleSettings};
use crate::segment::{RetryingSegmenter, Segmenter};
use crate::split::split_markdown;
use rayon::prelude::*;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Sentence fragments written by the split stage.
pub const SENTENCE_FILE: &str = "split_sentence.json";
/// Clause fragments written by the split stage.
pub const CLAUSE_FILE: &str = "split_clause.json";
/// Snippet fragments written by the snippets stage.
pub const SNIPPET_FILE: &str = "split_snippet.json";

#[derive(Clone, Debug)]
/// A case directory and its label.
pub struct Case {
    /// Directory name, e.g. `case0`.
    pub label: String,
    /// Full path to the directory.
    pub dir: PathBuf,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Outcome counts of one batch stage.
pub struct BatchSummary {
    /// Cases that completed.
    pub processed: usize,
    /// Cases that failed and were skipped.
    pub failed: usize,
}

/// Lists the case directories under `root`, sorted by name.
///
/// # Errors
///
/// Returns an error if the root is missing or the pattern is invalid.
pub fn find_cases(root: &Path, pattern: &str) -> Result<Vec<Case>> {
    if !root.is_dir() {
        return Err(Error::MissingRoot(root.to_path_buf()));
    }
    let pattern = Regex::new(pattern)?;
    let entries = fs::read_dir(root).map_err(|source| Error::Read {
        path: root.to_path_buf(),
        source,
    })?;
    let mut cases: Vec<Case> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let label = entry.file_name().to_string_lossy().to_string();
            pattern.is_match(&label).then(|| Case {
                label,
                dir: entry.path(),
            })
        })
        .collect();
    cases.sort_by(|a, b| a.label.cmp(&b.label));
    if cases.is_empty() {
        warn!("no case directories matching {pattern} under {}", root.display());
    } else {
        info!("found {} case directories", cases.len());
    }
    Ok(cases)
}

/// Runs `stage` on every case in parallel.
pub fn run_cases<F>(cases: &[Case], stage: F) -> BatchSummary
where
    F: Fn(&Case) -> Result<()> + Sync,
{
    let failed = cases
        .par_iter()
        .filter(|case| match stage(case) {
            Ok(()) => false,
            Err(e) => {
                warn!("{}: {e}", case.label);
                true
            }
        })
        .count();
    BatchSummary {
        processed: cases.len() - failed,
        failed,
    }
}

/// Writes `value` as pretty-printed UTF-8 JSON.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and decodes a JSON file.
///
/// # Errors
///
/// Returns an error if the file is unreadable or does not decode as `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_source(path)?;
    serde_json::from_str(&text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reconciles one case and writes its section tree.
///
/// # Errors
///
/// Returns an error if an input is unreadable or the output cannot be written.
pub fn reconcile_case(case: &Case, config: &Config, format: &dyn Format) -> Result<ResultNode> {
    let outline = read_source(&case.dir.join(&config.outline_file))?;
    let manuscript = read_source(&case.dir.join(&config.manuscript_file))?;
    let result = reconcile(&outline, &manuscript, format, &config.stop_heading)?;
    if !result.diagnostics.is_empty() {
        info!(
            "{}: {} outline nodes without an exact match",
            case.label,
            result.diagnostics.len()
        );
    }
    write_json(&case.dir.join(&config.section_file), &result.tree)?;
    info!("{}: wrote {}", case.label, config.section_file);
    Ok(result.tree)
}

/// Splits one case's manuscript into sentence and clause lists.
///
/// # Errors
///
/// Returns an error if the manuscript is unreadable or an output cannot be written.
pub fn split_case(case: &Case, config: &Config) -> Result<()> {
    let manuscript = read_source(&case.dir.join(&config.manuscript_file))?;
    let lists = split_markdown(&manuscript, &config.stop_heading);
    write_json(&case.dir.join(SENTENCE_FILE), &lists.sentences)?;
    write_json(&case.dir.join(CLAUSE_FILE), &lists.clauses)?;
    info!(
        "{}: {} sentences, {} clauses",
        case.label,
        lists.sentences.len(),
        lists.clauses.len()
    );
    Ok(())
}

/// Segments every non-blank content of one case's section tree.
///
/// # Errors
///
/// Returns an error if the section tree is unreadable or the output cannot be written.
pub fn snippet_case<S: Segmenter>(
    case: &Case,
    config: &Config,
    segmenter: &RetryingSegmenter<S>,
) -> Result<usize> {
    let tree: Value = read_json(&case.dir.join(&config.section_file))?;
    let contents = stored_contents(&tree);
    if contents.is_empty() {
        warn!("{}: section tree has no content", case.label);
    }
    let total = contents.len();
    let mut snippets = Vec::new();
    for (i, content) in contents.into_iter().enumerate() {
        info!("{}: segmenting block {}/{total}", case.label, i + 1);
        snippets.extend(segmenter.split(&content));
    }
    write_json(&case.dir.join(SNIPPET_FILE), &snippets)?;
    Ok(snippets.len())
}

/// Reads an optional companion file, returning an empty string if it is missing.
fn read_optional(path: &Path) -> String {
    read_source(path).unwrap_or_else(|e| {
        warn!("{e}");
        String::new()
    })
}

/// Reads a JSON list of fragments, dropping any element that is not a string.
///
/// # Errors
///
/// Returns an error if the file is unreadable or not a JSON list.
pub fn read_fragments(path: &Path) -> Result<Vec<String>> {
    let values: Vec<Value> = read_json(path)?;
    let total = values.len();
    let fragments: Vec<String> = values
        .into_iter()
        .filter_map(|value| match value {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect();
    if fragments.len() < total {
        warn!(
            "{}: dropped {} non-string elements",
            path.display(),
            total - fragments.len()
        );
    }
    Ok(fragments)
}

/// Builds samples for one case from a fragment file.
///
/// # Errors
///
/// Returns an error if the fragment file is missing or not a JSON list.
pub fn case_samples(
    case: &Case,
    config: &Config,
    fragment_file: &str,
    mode: HistoryMode,
) -> Result<Vec<Sample>> {
    let fragments = read_fragments(&case.dir.join(fragment_file))?;
    let user_intent = read_optional(&case.dir.join(&config.intent_file));
    let outline = read_optional(&case.dir.join(&config.outline_file));
    let manuscript = match mode {
        HistoryMode::Located => read_optional(&case.dir.join(&config.manuscript_file)),
        HistoryMode::Cumulative => String::new(),
    };
    let context = CaseContext {
        label: &case.label,
        user_intent: &user_intent,
        outline: &outline,
        manuscript: &manuscript,
    };
    let settings = SampleSettings {
        ratios: config.ratios.clone(),
        min_chars: config.min_sample_chars,
    };
    Ok(build_samples(&fragments, mode, &context, &settings))
}

/// Gathers samples across all cases and writes `all_cases_io_<kind>.json` into `root`.
///
/// # Errors
///
/// Returns an error if the combined output cannot be written.
pub fn collect_samples(
    root: &Path,
    cases: &[Case],
    config: &Config,
    fragment_file: &str,
    kind: &str,
    mode: HistoryMode,
) -> Result<usize> {
    let per_case: Vec<Vec<Sample>> = cases
        .par_iter()
        .filter_map(|case| match case_samples(case, config, fragment_file, mode) {
            Ok(samples) => Some(samples),
            Err(e) => {
                warn!("{}: {e}", case.label);
                None
            }
        })
        .collect();
    let samples: Vec<Sample> = per_case.into_iter().flatten().collect();
    let out = root.join(format!("all_cases_io_{kind}.json"));
    write_json(&out, &samples)?;
    info!("{kind}: {} samples written to {}", samples.len(), out.display());
    Ok(samples.len())
}

/// Resolves the configured heading backend.
///
/// # Errors
///
/// Returns an error for an unknown syntax name.
pub fn configured_format(config: &Config) -> Result<Box<dyn Format>> {
    let format = formats::from_name(&config.heading_syntax)?;
    debug!("using {} heading syntax", format.name());
    Ok(format)
}

#[cfg(test)]
#[path = "tests/batch.rs"]
mod tests;
