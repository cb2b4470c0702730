/// Configuration schema and defaults for bannerdash.
///
/// Defines the TOML-serializable configuration structure with the sections
/// `[general]`, `[insights]`, `[web]` and `[logging]`.
///
/// Every field has a built-in default. Users only need to set the values
/// they want to override.
use serde::{Deserialize, Serialize};

use crate::locale::Language;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level bannerdash configuration.
///
/// Maps directly to the `~/.bannerdash/config.toml` and `.bannerdash.toml`
/// file schemas. Missing sections and fields fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerdashConfig {
    pub general: GeneralConfig,
    pub insights: InsightsConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [general]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Display and response language: `ko` or `en`.
    pub language: Language,
}

// ---------------------------------------------------------------------------
// [insights]
// ---------------------------------------------------------------------------

/// AI insight settings (hosted Gemini model).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    /// Whether insight requests may reach the network at all.
    pub enabled: bool,
    /// Model name, e.g. `"gemini-3-flash-preview"`.
    pub model: String,
    /// API base URL up to and including the version segment.
    pub endpoint: String,
    /// API key. Prefer `BANNERDASH_API_KEY` / `GEMINI_API_KEY` over
    /// storing it in a file.
    pub api_key: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gemini-3-flash-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: String::new(),
            temperature: 0.7,
            max_output_tokens: 1000,
            timeout_ms: 30_000,
        }
    }
}

impl InsightsConfig {
    /// The configured API key, or `None` when unset.
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address for `bannerdash web`.
    pub addr: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9747".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Activity log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// Path to the JSONL activity log. `~` is expanded to the home directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.bannerdash/activity.jsonl".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Annotated default file
// ---------------------------------------------------------------------------

impl BannerdashConfig {
    /// The annotated default config written by `bannerdash config init`.
    pub fn default_toml() -> String {
        r#"# bannerdash configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (BANNERDASH_*)
#   2. Project config (.bannerdash.toml in current directory)
#   3. User global config (~/.bannerdash/config.toml)
#   4. Built-in defaults

[general]
language = "ko"          # ko | en

[insights]
enabled = true
model = "gemini-3-flash-preview"
endpoint = "https://generativelanguage.googleapis.com/v1beta"
api_key = ""             # Prefer BANNERDASH_API_KEY or GEMINI_API_KEY
temperature = 0.7
max_output_tokens = 1000
timeout_ms = 30000

[web]
addr = "127.0.0.1:9747"
open_browser = true

[logging]
enabled = true
path = "~/.bannerdash/activity.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
