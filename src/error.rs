//! Error type shared by document loading, parsing and the batch driver.
//!
//! Partial or ambiguous matches are never errors: the reconciliation core always produces a
//! complete tree. Only I/O, decoding and parser failures surface here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Failures that abort work on a single document pair.
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    /// A source file could not be read as UTF-8 text.
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    /// An output file could not be written.
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    /// A JSON input did not have the expected shape.
    Json {
        /// File holding the malformed JSON.
        path: PathBuf,
        /// Decoder failure.
        source: serde_json::Error,
    },

    #[error("Failed to serialise output: {0}")]
    /// An in-memory structure could not be encoded as JSON.
    Serialize(#[from] serde_json::Error),

    #[error("Markdown parsing failed: {0}")]
    /// The heading backend could not parse the source.
    Parse(String),

    #[error("Unknown heading syntax: {0}")]
    /// The configured heading syntax name is not recognised.
    UnknownSyntax(String),

    #[error("Invalid case pattern: {0}")]
    /// The case directory pattern is not a valid regex.
    Pattern(#[from] regex::Error),

    #[error("Root directory not found: {0}")]
    /// The batch root does not exist or is not a directory.
    MissingRoot(PathBuf),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
