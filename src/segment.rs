//! Semantic segmentation of content blocks through an external service.
//!
//! A [`Segmenter`] splits a block into coherent snippets whose concatenation reproduces the
//! block exactly. [`RetryingSegmenter`] enforces that postcondition with linearly spaced
//! retries and falls back to the unsplit block, so callers never see an error.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::LazyLock;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)```(?:json)?\s*([\s\S]*?)```").expect("fence pattern is valid")
});

static ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*[\s\S]*?\s*\]").expect("array pattern is valid"));

#[derive(Debug, thiserror::Error)]
/// Reasons a single segmentation attempt failed.
pub enum SegmentError {
    #[error("HTTP error: {0}")]
    /// Transport-level failure.
    Http(#[from] reqwest::Error),
    #[error("API error ({status}): {body}")]
    /// The service answered with a non-success status.
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, for the log.
        body: String,
    },
    #[error("malformed response: {0}")]
    /// The reply could not be read as a list of strings.
    Malformed(String),
    #[error("segments do not reconstruct the input")]
    /// The returned pieces are not an exact split of the input.
    NotExact,
}

/// Splits a content block into snippets.
pub trait Segmenter: Send + Sync {
    /// Returns the snippets for `content`.
    ///
    /// # Errors
    ///
    /// Returns an error when the service fails or answers with something unusable.
    fn segment(&self, content: &str) -> Result<Vec<String>, SegmentError>;
}

impl<F> Segmenter for F
where
    F: Fn(&str) -> Result<Vec<String>, SegmentError> + Send + Sync,
{
    fn segment(&self, content: &str) -> Result<Vec<String>, SegmentError> {
        self(content)
    }
}

/// Bounded retries plus the exact-reconstruction check around another segmenter.
pub struct RetryingSegmenter<S> {
    inner: S,
    max_retries: usize,
    base_delay: Duration,
}

impl<S: Segmenter> RetryingSegmenter<S> {
    #[must_use]
    /// Wraps `inner`; attempt `n` is followed by a sleep of `base_delay * n` on failure.
    pub fn new(inner: S, max_retries: usize, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries: max_retries.max(1),
            base_delay,
        }
    }

    #[must_use]
    /// Snippets for `content`, or `vec![content]` once every attempt has failed.
    pub fn split(&self, content: &str) -> Vec<String> {
        for attempt in 1..=self.max_retries {
            match self.attempt(content) {
                Ok(pieces) => return pieces,
                Err(e) if attempt < self.max_retries => {
                    let delay = self.base_delay * u32::try_from(attempt).unwrap_or(u32::MAX);
                    warn!(
                        "segmentation attempt {attempt}/{} failed, retrying in {delay:?}: {e}",
                        self.max_retries
                    );
                    thread::sleep(delay);
                }
                Err(e) => {
                    warn!("segmentation failed after {attempt} attempts, keeping block whole: {e}");
                }
            }
        }
        vec![content.to_string()]
    }

    fn attempt(&self, content: &str) -> Result<Vec<String>, SegmentError> {
        let pieces: Vec<String> = self
            .inner
            .segment(content)?
            .into_iter()
            .filter(|piece| !piece.is_empty())
            .collect();
        if pieces.is_empty() {
            return Err(SegmentError::Malformed("no segments".to_string()));
        }
        if pieces.concat() != content {
            return Err(SegmentError::NotExact);
        }
        debug!("split block of {} bytes into {} snippets", content.len(), pieces.len());
        Ok(pieces)
    }
}

/// Reads a JSON array of strings out of a chat reply.
///
/// A fenced code block is unwrapped first; if the text still does not start with `[`, the first
/// bracketed span is used. Non-string elements are dropped.
///
/// # Errors
///
/// Returns `SegmentError::Malformed` when no JSON array can be decoded.
pub fn parse_segment_reply(reply: &str) -> Result<Vec<String>, SegmentError> {
    let mut text = reply;
    if let Some(inner) = FENCE_RE.captures(text).and_then(|caps| caps.get(1)) {
        text = inner.as_str().trim();
    }
    if !text.trim_start().starts_with('[') {
        if let Some(span) = ARRAY_RE.find(text) {
            text = span.as_str();
        }
    }
    let values: Vec<Value> =
        serde_json::from_str(text).map_err(|e| SegmentError::Malformed(e.to_string()))?;
    Ok(values
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Connection settings for an OpenAI-compatible chat-completions endpoint.
pub struct ChatSettings {
    /// Base URL, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model name.
    pub model: String,
}

/// Segmenter backed by a chat-completions model.
pub struct ChatSegmenter {
    client: reqwest::blocking::Client,
    settings: ChatSettings,
}

#[derive(Deserialize)]
struct ChatReply {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

const SYSTEM_PROMPT: &str = "You are a strict assistant. Reply with JSON only.";

fn user_prompt(content: &str) -> String {
    format!(
        "Split the content below into semantically complete snippets. Each snippet should \
         span at least two full sentences. Concatenating the snippets must reproduce the \
         content exactly.\n\
         Rules:\n\
         1) Reply with a JSON array whose elements are the snippets as strings.\n\
         2) Every element must match the original text character for character.\n\n\
         ### Content:\n{content}"
    )
}

impl ChatSegmenter {
    #[must_use]
    /// Creates a client for the given endpoint.
    pub fn new(settings: ChatSettings) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            settings,
        }
    }
}

impl Segmenter for ChatSegmenter {
    fn segment(&self, content: &str) -> Result<Vec<String>, SegmentError> {
        let url = format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        );
        let body = json!({
            "model": self.settings.model,
            "temperature": 0.0,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": user_prompt(content)},
            ],
        });
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(SegmentError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatReply = resp.json()?;
        let text = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SegmentError::Malformed("reply has no message content".to_string()))?;
        parse_segment_reply(&text)
    }
}

#[cfg(test)]
#[path = "tests/segment.rs"]
mod tests;
