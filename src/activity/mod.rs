//! Activity log: one JSONL line per user action on the dashboard.
//!
//! Log file: `~/.bannerdash/activity.jsonl` (see `[logging]` in the config).
//! Writes are best-effort and never interrupt the action being logged.

use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::schema::LoggingConfig;
use crate::config::expand_home;

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// Kind of action recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Add,
    BulkAdd,
    Delete,
    Filter,
    Insight,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::BulkAdd => write!(f, "bulk_add"),
            Self::Delete => write!(f, "delete"),
            Self::Filter => write!(f, "filter"),
            Self::Insight => write!(f, "insight"),
        }
    }
}

/// A single activity log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub action: Action,
    /// Records affected (added, removed, or sent for analysis).
    #[serde(default)]
    pub count: usize,
    #[serde(default = "default_true")]
    pub success: bool,
    /// Location, filter name, or error text, depending on the action.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detail: Option<String>,
    /// Insight request latency in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub latency_ms: Option<u64>,
}

fn default_true() -> bool {
    true
}

impl ActivityEntry {
    pub fn new(action: Action, count: usize, success: bool) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            action,
            count,
            success,
            detail: None,
            latency_ms: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

/// Append-only activity logger bound to a resolved log path. The default
/// logger is disabled.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    path: Option<PathBuf>,
}

impl ActivityLog {
    /// Logger for the configured path; disabled logging yields a no-op.
    pub fn from_config(config: &LoggingConfig) -> Self {
        let path = if config.enabled {
            expand_home(&config.path)
        } else {
            None
        };
        Self { path }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append an entry. Failures are ignored.
    pub fn record(&self, entry: &ActivityEntry) {
        if let Some(path) = &self.path {
            let _ = append_entry(path, entry);
        }
    }

    /// The last `limit` entries, oldest first. Malformed lines are skipped;
    /// a missing file reads as empty.
    pub fn read_recent(&self, limit: usize) -> Vec<ActivityEntry> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        let Ok(file) = fs::File::open(path) else {
            return Vec::new();
        };

        let entries: Vec<ActivityEntry> = BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect();

        let skip = entries.len().saturating_sub(limit);
        entries.into_iter().skip(skip).collect()
    }
}

fn append_entry(path: &Path, entry: &ActivityEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
