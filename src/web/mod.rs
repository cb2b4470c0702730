//! Embedded web dashboard for bannerdash.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - A single-page dashboard with a data manager tab
//! - JSON API endpoints for the derived view, record mutations, the platform
//!   filter and background AI insights
//!
//! Launched via `bannerdash web` (default: `http://127.0.0.1:9747`).
//!
//! The server owns the one [`Dashboard`] for its lifetime. Requests are
//! handled sequentially, so every mutation is applied atomically with
//! respect to every read. Insight requests are the only work that leaves
//! the request loop: they run on background threads against a snapshot.

mod api;
mod frontend;

pub use api::Reply;

use std::io::Cursor;
use std::sync::Arc;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::activity::ActivityLog;
use crate::config::BannerdashConfig;
use crate::insights::slot::InsightSlot;
use crate::insights::{self, InsightBackend};
use crate::state::Dashboard;

// ---------------------------------------------------------------------------
// Server state
// ---------------------------------------------------------------------------

/// Everything the request handlers read or mutate.
pub struct WebState {
    pub dashboard: Dashboard,
    pub slot: InsightSlot,
    pub backend: Arc<dyn InsightBackend + Send + Sync>,
    pub config: BannerdashConfig,
    pub log: ActivityLog,
}

impl WebState {
    /// Seeded dashboard wired to the configured insight backend and log.
    pub fn from_config(config: BannerdashConfig) -> Self {
        let log = ActivityLog::from_config(&config.logging);
        Self {
            dashboard: Dashboard::seeded(),
            slot: InsightSlot::with_log(log.clone()),
            backend: insights::backend_from_config(&config.insights),
            log,
            config,
        }
    }
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the web dashboard server on the given address.
///
/// Blocks the current thread. A failing handler produces a 500 for that
/// request only; the server keeps running.
pub fn serve(addr: &str, config: BannerdashConfig, open: bool) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("bannerdash dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    if open {
        let _ = open_browser(&format!("http://{addr}"));
    }

    let mut state = WebState::from_config(config);

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if matches!(method, Method::Put | Method::Post | Method::Patch) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let response = match dispatch(&mut state, &method, &url, body.as_deref()) {
            Ok(resp) => resp,
            Err(e) => Reply::error(500, &format!("{e:#}")).into_response(),
        };
        let _ = request.respond(response);

        // Brief access log
        println!(
            "{} {} {}",
            method,
            url,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the frontend or the JSON API.
pub fn dispatch(
    state: &mut WebState,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<Response<Cursor<Vec<u8>>>> {
    let path = url.split('?').next().unwrap_or(url);
    if *method == Method::Get && (path == "/" || path == "/index.html") {
        return Ok(serve_frontend());
    }
    route(state, method, url, body).map(Reply::into_response)
}

/// Route an API request to its handler.
pub fn route(state: &mut WebState, method: &Method, url: &str, body: Option<&str>) -> Result<Reply> {
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);
    let body = body.unwrap_or("");

    match (method, path) {
        // Dashboard
        (&Method::Get, "/api/dashboard") => api::get_dashboard(state, url),
        (&Method::Put, "/api/filter") => api::put_filter(state, body),

        // Records
        (&Method::Get, "/api/records") => api::get_records(state),
        (&Method::Post, "/api/records") => api::post_record(state, body),
        (&Method::Post, "/api/records/bulk") => api::post_bulk(state, body),
        (&Method::Delete, p) if p.starts_with("/api/records/") => {
            match p["/api/records/".len()..].parse::<usize>() {
                Ok(index) => api::delete_record(state, index),
                Err(_) => Ok(Reply::not_found()),
            }
        }

        // Insights
        (&Method::Get, "/api/insights") => api::get_insights(state),
        (&Method::Post, "/api/insights") => api::post_insights(state),

        // Health / configuration
        (&Method::Get, "/api/health") => api::get_health(state),
        (&Method::Get, "/api/config") => api::get_config(),

        _ => Ok(Reply::not_found()),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Serve the embedded single-page frontend.
fn serve_frontend() -> Response<Cursor<Vec<u8>>> {
    Response::from_data(frontend::INDEX_HTML.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

/// JSON content type header.
pub(crate) fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8")
        .expect("static header must be valid")
}

/// HTML content type header.
fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8")
        .expect("static header must be valid")
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}
