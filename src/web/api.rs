//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an API endpoint and returns a [`Reply`]: a
//! status code plus a JSON body. Rejected input is a 4xx reply carrying the
//! localized message; only unexpected failures surface as `Err`.

use std::io::Cursor;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tiny_http::{Response, StatusCode};

use crate::activity::{Action, ActivityEntry};
use crate::aggregate::Summary;
use crate::aggregate::ranking::{ChartBar, ChartMetric};
use crate::config::{self, BannerdashConfig};
use crate::filter::{self, IndexedRecord, PlatformFilter};
use crate::insights::slot::ResolvedInsight;
use crate::locale::{Language, Notice};
use crate::record::{Platform, Record};
use crate::state::{EntryError, ManualEntry};

use super::{WebState, content_type_json};

// ---------------------------------------------------------------------------
// Reply
// ---------------------------------------------------------------------------

/// An API reply before it is turned into an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl Reply {
    /// 200 with `data` as the body.
    fn ok<T: Serialize>(data: &T) -> Result<Self> {
        Self::with_status(200, data)
    }

    fn with_status<T: Serialize>(status: u16, data: &T) -> Result<Self> {
        let body = serde_json::to_value(data).context("failed to serialize JSON response")?;
        Ok(Self { status, body })
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }),
        }
    }

    pub fn not_found() -> Self {
        Self::error(404, "not found")
    }

    pub fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        Response::from_data(self.body.to_string().into_bytes())
            .with_header(content_type_json())
            .with_status_code(StatusCode(self.status))
    }
}

// ---------------------------------------------------------------------------
// JSON request / response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DashboardResponse<'a> {
    filter: PlatformFilter,
    metric: ChartMetric,
    language: Language,
    version: u64,
    summary: Summary,
    records: Vec<IndexedRecord<'a>>,
    chart: Vec<ChartBar>,
}

#[derive(Serialize)]
struct RecordsResponse<'a> {
    total: usize,
    records: Vec<IndexedRecord<'a>>,
}

#[derive(Serialize)]
struct RecordChangeResponse<'a> {
    record: &'a Record,
    message: String,
}

#[derive(Deserialize)]
struct BulkRequest {
    text: String,
    #[serde(default)]
    platform: Platform,
}

#[derive(Serialize)]
struct BulkResponse {
    added: usize,
    message: String,
}

#[derive(Deserialize)]
struct FilterRequest {
    platform: String,
}

#[derive(Serialize)]
struct InsightStartResponse {
    request_id: u64,
    record_count: usize,
    pending: usize,
}

#[derive(Serialize)]
struct InsightStateResponse {
    pending: usize,
    last: Option<ResolvedInsight>,
}

#[derive(Serialize)]
struct HealthResponse {
    records: usize,
    visible: usize,
    version: u64,
    filter: PlatformFilter,
    language: Language,
    insights_enabled: bool,
    api_key_configured: bool,
    model: String,
    log_path: Option<String>,
    config_exists: bool,
}

/// Config API response: the effective config (key masked) plus its TOML.
#[derive(Serialize)]
struct ConfigResponse {
    config: BannerdashConfig,
    toml_text: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Value of `key` in the URL's query string.
fn parse_query_param<'a>(url: &'a str, key: &str) -> Option<&'a str> {
    url.split('?').nth(1)?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == key { Some(v) } else { None }
    })
}

/// 400 for a body that is not the expected JSON.
fn bad_json(e: serde_json::Error) -> Reply {
    Reply::error(400, &format!("invalid request body: {e}"))
}

/// Reply for a rejected mutation, with the message in the active language.
fn rejected(e: &EntryError, language: Language) -> Reply {
    let status = match e {
        EntryError::IndexOutOfRange { .. } => 404,
        _ => 400,
    };
    Reply::error(status, &e.notice().text(language))
}

fn language(state: &WebState) -> Language {
    state.config.general.language
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/dashboard?metric=impressions|cpc|cpm|ctr` — summary cards,
/// table rows and chart bars for the active filter.
pub fn get_dashboard(state: &WebState, url: &str) -> Result<Reply> {
    let metric = parse_query_param(url, "metric")
        .and_then(ChartMetric::parse)
        .unwrap_or_default();
    let dash = &state.dashboard;

    Reply::ok(&DashboardResponse {
        filter: dash.filter(),
        metric,
        language: language(state),
        version: dash.version(),
        summary: dash.summary(),
        records: filter::indexed_view(dash.records(), dash.filter()),
        chart: dash.chart(metric),
    })
}

/// `PUT /api/filter` — `{"platform": "All" | "PC" | "Mobile"}`.
pub fn put_filter(state: &mut WebState, body: &str) -> Result<Reply> {
    let req: FilterRequest = match serde_json::from_str(body) {
        Ok(req) => req,
        Err(e) => return Ok(bad_json(e)),
    };
    let Some(filter) = PlatformFilter::parse(&req.platform) else {
        return Ok(Reply::error(
            400,
            &format!("unknown platform filter '{}'", req.platform),
        ));
    };

    state.dashboard.set_filter(filter);
    state.log.record(
        &ActivityEntry::new(Action::Filter, state.dashboard.view().len(), true)
            .with_detail(filter.to_string()),
    );

    Reply::ok(&serde_json::json!({ "filter": filter }))
}

/// `GET /api/records` — the data manager list: every record except the
/// fixed exclusion, with its collection index for deletion.
pub fn get_records(state: &WebState) -> Result<Reply> {
    Reply::ok(&RecordsResponse {
        total: state.dashboard.len(),
        records: state.dashboard.indexed_processed(),
    })
}

/// `POST /api/records` — manual entry form.
pub fn post_record(state: &mut WebState, body: &str) -> Result<Reply> {
    let entry: ManualEntry = match serde_json::from_str(body) {
        Ok(entry) => entry,
        Err(e) => return Ok(bad_json(e)),
    };
    let lang = language(state);

    match state.dashboard.submit_entry(entry) {
        Ok(record) => {
            state
                .log
                .record(&ActivityEntry::new(Action::Add, 1, true).with_detail(&record.location));
            Reply::with_status(
                201,
                &RecordChangeResponse {
                    record,
                    message: Notice::RecordAdded(record.location.clone()).text(lang),
                },
            )
        }
        Err(e) => {
            state
                .log
                .record(&ActivityEntry::new(Action::Add, 0, false).with_detail(e.to_string()));
            Ok(rejected(&e, lang))
        }
    }
}

/// `POST /api/records/bulk` — `{"text": "<tsv>", "platform": "PC"}`.
pub fn post_bulk(state: &mut WebState, body: &str) -> Result<Reply> {
    let req: BulkRequest = match serde_json::from_str(body) {
        Ok(req) => req,
        Err(e) => return Ok(bad_json(e)),
    };
    let lang = language(state);

    match state.dashboard.paste(&req.text, req.platform) {
        Ok(added) => {
            state
                .log
                .record(&ActivityEntry::new(Action::BulkAdd, added, true));
            Reply::with_status(
                201,
                &BulkResponse {
                    added,
                    message: Notice::RecordsAdded(added).text(lang),
                },
            )
        }
        Err(e) => {
            state
                .log
                .record(&ActivityEntry::new(Action::BulkAdd, 0, false).with_detail(e.to_string()));
            Ok(rejected(&e, lang))
        }
    }
}

/// `DELETE /api/records/{index}` — remove by collection index.
pub fn delete_record(state: &mut WebState, index: usize) -> Result<Reply> {
    let lang = language(state);

    match state.dashboard.remove_at(index) {
        Ok(record) => {
            state
                .log
                .record(&ActivityEntry::new(Action::Delete, 1, true).with_detail(&record.location));
            let message = Notice::RecordRemoved(record.location.clone()).text(lang);
            Reply::ok(&RecordChangeResponse {
                record: &record,
                message,
            })
        }
        Err(e) => Ok(rejected(&e, lang)),
    }
}

/// `POST /api/insights` — start a background analysis of the current view.
pub fn post_insights(state: &mut WebState) -> Result<Reply> {
    let snapshot = state.dashboard.snapshot();
    let record_count = snapshot.len();
    let (request_id, _handle) =
        state
            .slot
            .spawn(Arc::clone(&state.backend), snapshot, language(state));

    Reply::with_status(
        202,
        &InsightStartResponse {
            request_id,
            record_count,
            pending: state.slot.pending(),
        },
    )
}

/// `GET /api/insights` — the last resolved insight and the pending count.
pub fn get_insights(state: &WebState) -> Result<Reply> {
    Reply::ok(&InsightStateResponse {
        pending: state.slot.pending(),
        last: state.slot.last(),
    })
}

/// `GET /api/health` — dashboard and configuration status.
pub fn get_health(state: &WebState) -> Result<Reply> {
    let cfg = &state.config;
    Reply::ok(&HealthResponse {
        records: state.dashboard.len(),
        visible: state.dashboard.view().len(),
        version: state.dashboard.version(),
        filter: state.dashboard.filter(),
        language: cfg.general.language,
        insights_enabled: cfg.insights.enabled,
        api_key_configured: cfg.insights.api_key().is_some(),
        model: cfg.insights.model.clone(),
        log_path: state.log.path().map(|p| p.display().to_string()),
        config_exists: config::global_config_file()
            .map(|p| p.exists())
            .unwrap_or(false),
    })
}

/// `GET /api/config` — effective configuration with the API key masked.
pub fn get_config() -> Result<Reply> {
    Reply::ok(&ConfigResponse {
        config: config::masked_config(),
        toml_text: config::show_effective_config()?,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
