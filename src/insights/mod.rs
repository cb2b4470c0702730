/// AI insights: free-text analysis of the current dataset by a hosted model.
///
/// The model is an opaque collaborator: it receives the records as JSON
/// plus a fixed instruction and returns text. Every failure mode (network
/// error, timeout, disabled feature, missing key, empty answer) is converted
/// at this boundary into a language-appropriate fallback message, so callers
/// always get an [`Insight`] and never an error.
///
/// # Configuration
///
/// - `[insights] enabled = false` or `BANNERDASH_INSIGHTS=0` disables
///   network calls entirely.
/// - The API key comes from `BANNERDASH_API_KEY`, `GEMINI_API_KEY` or
///   `[insights] api_key`.
///
/// # Background requests
///
/// The web dashboard issues requests through [`slot::InsightSlot`], which
/// runs each request on its own thread against an owned snapshot of the
/// records and keeps the last result to resolve.
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;

pub mod gemini;
pub mod prompts;
pub mod slot;

use crate::config::schema::InsightsConfig;
use crate::locale::{Language, Notice};
use crate::record::Record;

use gemini::GeminiClient;
use prompts::build_prompt;

/// Something that turns a prompt into generated text.
pub trait InsightBackend {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Backend used when insights are disabled or unconfigured; always fails
/// with the given reason.
#[derive(Debug, Clone)]
pub struct DisabledBackend {
    reason: &'static str,
}

impl InsightBackend for DisabledBackend {
    fn generate(&self, _prompt: &str) -> Result<String> {
        anyhow::bail!("{}", self.reason)
    }
}

/// Pick the backend for the resolved config.
pub fn backend_from_config(config: &InsightsConfig) -> Arc<dyn InsightBackend + Send + Sync> {
    if !config.enabled {
        return Arc::new(DisabledBackend {
            reason: "insights are disabled",
        });
    }
    match GeminiClient::from_config(config) {
        Some(client) => Arc::new(client),
        None => Arc::new(DisabledBackend {
            reason: "no API key configured",
        }),
    }
}

/// How an insight's text came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightOutcome {
    Generated,
    /// The backend failed; `text` is the failure fallback.
    Failed,
    /// The backend answered with nothing; `text` is the empty fallback.
    Empty,
}

/// Result of one insight request.
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub text: String,
    pub outcome: InsightOutcome,
    pub latency_ms: u64,
    /// Backend error message when `outcome` is `Failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Insight {
    pub fn is_generated(&self) -> bool {
        self.outcome == InsightOutcome::Generated
    }
}

/// Ask `backend` for an analysis of `records`.
///
/// Never fails: errors and empty answers become fallback text in
/// `language`.
pub fn request_insight(
    backend: &dyn InsightBackend,
    records: &[Record],
    language: Language,
) -> Insight {
    let start = Instant::now();
    let result = build_prompt(records, language).and_then(|prompt| backend.generate(&prompt));
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(text) if !text.trim().is_empty() => Insight {
            text: text.trim().to_string(),
            outcome: InsightOutcome::Generated,
            latency_ms,
            error: None,
        },
        Ok(_) => Insight {
            text: Notice::InsightEmpty.text(language),
            outcome: InsightOutcome::Empty,
            latency_ms,
            error: None,
        },
        Err(e) => Insight {
            text: Notice::InsightFailed.text(language),
            outcome: InsightOutcome::Failed,
            latency_ms,
            error: Some(format!("{e:#}")),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
