//! Configuration to acknowledge dataset layout preferences as well as set defaults.
//!
//! Specifically, we try to find an outline-weave.toml, and if present we load settings from
//! there. This provides file names, the case directory pattern, heading syntax, sample ratios
//! and the segmentation service settings.

use facet::Facet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "outline-weave.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from outline-weave.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "outline.md".to_string())]
    /// Outline file name inside a case directory.
    pub outline_file: String,
    #[facet(default = "full_content.md".to_string())]
    /// Manuscript file name inside a case directory.
    pub manuscript_file: String,
    #[facet(default = "user_intent.md".to_string())]
    /// Authoring-intent file name inside a case directory.
    pub intent_file: String,
    #[facet(default = "section_content.json".to_string())]
    /// Reconciled tree file name written into each case directory.
    pub section_file: String,
    #[facet(default = r"^case\d+$".to_string())]
    /// Regex selecting case directories under the batch root.
    pub case_pattern: String,
    #[facet(default = "Reference".to_string())]
    /// Top-level manuscript heading from which everything is ignored.
    pub stop_heading: String,
    #[facet(default = "atx".to_string())]
    /// Heading backend: `atx` or `commonmark`.
    pub heading_syntax: String,
    #[facet(default = vec![0.0, 0.3])]
    /// Hint ratios for sample generation.
    pub ratios: Vec<f64>,
    #[facet(default = 8)]
    /// Fragments shorter than this many chars produce no sample.
    pub min_sample_chars: usize,
    #[facet(default = "gpt-4o".to_string())]
    /// Chat model used for snippet segmentation.
    pub model: String,
    #[facet(default = "https://api.openai.com/v1".to_string())]
    /// Base URL of the OpenAI-compatible endpoint.
    pub base_url: String,
    #[facet(default = 3)]
    /// Segmentation attempts per block.
    pub max_retries: usize,
    #[facet(default = 2000)]
    /// Base retry delay in milliseconds, multiplied by the attempt number.
    pub retry_base_ms: u64,
}

impl Config {
    #[must_use]
    /// Load configuration from outline-weave.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, falling back to defaults if it is absent or invalid.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            match facet_toml::from_str::<Self>(&contents) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("ignoring invalid {}: {e}", path.display()),
            }
        }
        facet_toml::from_str::<Self>("").expect("defaults cover every field")
    }

    #[must_use]
    /// Delay before the second attempt; later attempts scale linearly.
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_ms)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
