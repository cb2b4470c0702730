//! CLI command implementations.
//!
//! Provides subcommand handlers for:
//! - `bannerdash report` — summary cards, record table, ranked bar chart
//! - `bannerdash parse` — parse pasted spreadsheet rows and print them
//! - `bannerdash insights` — ask the hosted model for an analysis
//! - `bannerdash history` — recent activity-log entries
//! - `bannerdash health` — config, insight and log status
//! - `bannerdash config show|init|set|reset` — configuration management

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::activity::{Action, ActivityEntry, ActivityLog};
use crate::aggregate::Summary;
use crate::aggregate::ranking::{ChartBar, ChartMetric, group_thousands, is_high_ctr};
use crate::config;
use crate::filter::PlatformFilter;
use crate::insights::{self, InsightOutcome};
use crate::locale::{Language, Notice};
use crate::paste::parse_paste;
use crate::record::{Platform, Record};
use crate::state::Dashboard;

/// Output format for data commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// Where the dashboard data for a command comes from: the seed dataset plus
/// an optional pasted batch.
#[derive(Debug, Clone)]
pub struct DataSource<'a> {
    pub paste_file: Option<&'a Path>,
    pub paste_platform: Platform,
    pub filter: PlatformFilter,
}

/// Build a seeded dashboard, bulk-adding the pasted batch if one was given.
///
/// A rejected paste is reported as a warning; the seed data is still used.
fn load_dashboard(
    source: &DataSource<'_>,
    language: Language,
    log: &ActivityLog,
) -> Result<Dashboard> {
    let mut dash = Dashboard::seeded();

    if let Some(path) = source.paste_file {
        let text = read_input(Some(path))?;
        match dash.paste(&text, source.paste_platform) {
            Ok(added) => {
                log.record(&ActivityEntry::new(Action::BulkAdd, added, true));
                eprintln!("{}", Notice::RecordsAdded(added).text(language).green());
            }
            Err(e) => {
                log.record(&ActivityEntry::new(Action::BulkAdd, 0, false).with_detail(e.to_string()));
                eprintln!("{}", e.notice().text(language).yellow());
            }
        }
    }

    dash.set_filter(source.filter);
    Ok(dash)
}

/// Read a file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

// ---------------------------------------------------------------------------
// bannerdash report
// ---------------------------------------------------------------------------

/// Render the dashboard for the selected platform filter.
pub fn run_report(source: &DataSource<'_>, metric: ChartMetric, format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let log = ActivityLog::from_config(&cfg.logging);
    let dash = load_dashboard(source, cfg.general.language, &log)?;

    let view = dash.view();
    let summary = dash.summary();
    let chart = dash.chart(metric);

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "filter": dash.filter(),
                "metric": metric,
                "summary": summary,
                "records": view,
                "chart": chart,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Csv => print_records_csv(&view),
        OutputFormat::Table => {
            println!(
                "{}",
                format!("BANNER AD Analytics · {}", dash.filter()).bold().cyan()
            );
            println!("{}", "=".repeat(72));
            println!();
            print_summary_cards(&summary);
            println!();
            print_records_table(&view);
            println!();
            print_chart(&chart, metric, cfg.general.language);
        }
    }

    Ok(())
}

fn print_summary_cards(summary: &Summary) {
    let (cpc_location, cpc) = summary.best_cpc_label();
    let (peak_location, peak) = summary.peak_impressions_label();

    println!(
        "  {} {}  {}",
        "Total Impressions:".bold(),
        group_thousands(summary.total_impressions).blue().bold(),
        "Monthly Aggregated".dimmed()
    );
    println!(
        "  {} {}  {}",
        "Average CTR:      ".bold(),
        format!("{:.2}%", summary.avg_ctr).yellow().bold(),
        "Conversion Efficiency".dimmed()
    );
    println!(
        "  {} {}  {}",
        "Best CPC Location:".bold(),
        cpc_location.green().bold(),
        format!("₩{} Avg", group_thousands(cpc)).dimmed()
    );
    println!(
        "  {} {}  {}",
        "Peak Exposure:    ".bold(),
        peak_location.purple().bold(),
        format!("{:.1}M Imp", peak as f64 / 1_000_000.0).dimmed()
    );
}

fn print_records_table(view: &[&Record]) {
    if view.is_empty() {
        println!("  {}", "No records match this filter.".yellow());
        return;
    }

    println!(
        "  {:<18} {:<7} {:>11} {:>8} {:>7} {:>10} {:>8} {:>10} {:>10}",
        "Location", "Platform", "Imp (1M)", "Clk (1M)", "CTR", "Imp (4W)", "Clk (4W)", "CPC", "CPM"
    );
    println!("  {}", "-".repeat(98));

    for (i, r) in view.iter().enumerate() {
        let ctr = format!("{:>6.2}%", r.ctr);
        let ctr = if is_high_ctr(r.ctr) {
            ctr.yellow().bold()
        } else {
            ctr.normal()
        };
        let line = format!(
            "  {:<18} {:<7} {:>11} {:>8} {} {:>10} {:>8} {:>10} {:>10}",
            truncate(&r.location, 18),
            colorize_platform(r.platform),
            group_thousands(r.avg_impressions_1m),
            group_thousands(r.avg_clicks_1m),
            ctr,
            group_thousands(r.avg_impressions_4w),
            group_thousands(r.avg_clicks_4w),
            format!("₩{}", group_thousands(r.cpc)),
            format!("₩{}", group_thousands(r.cpm)),
        );
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }
}

/// Horizontal bar chart, longest bar = `CHART_WIDTH` cells.
fn print_chart(bars: &[ChartBar], metric: ChartMetric, language: Language) {
    const CHART_WIDTH: usize = 36;

    println!(
        "{}",
        format!("Ranking by {}", metric.label(language)).bold().cyan()
    );
    let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    for bar in bars {
        let cells = bar_cells(bar.value, max, CHART_WIDTH);
        let fill = "█".repeat(cells);
        let fill = match bar.platform {
            Platform::Pc => fill.blue(),
            Platform::Mobile => fill.yellow(),
        };
        println!(
            "  {:<18} {} {}",
            truncate(&bar.location, 18),
            fill,
            metric.format_value(bar.value).dimmed()
        );
    }
    if let Some(top) = bars.first() {
        println!(
            "  {:<18} {}",
            "",
            format!("0 … {}", metric.format_axis(top.value)).dimmed()
        );
    }
}

/// Number of cells for `value` on a chart whose largest value is `max`.
fn bar_cells(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    (((value / max) * width as f64).round() as usize).clamp(1, width)
}

fn print_records_json(records: &[&Record]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

fn print_records_csv(records: &[&Record]) {
    println!(
        "location,platform,avgImpressions1M,avgClicks1M,ctr,avgImpressions4W,avgClicks4W,cpc,cpm"
    );
    for r in records {
        println!(
            "{},{},{},{},{:.2},{},{},{},{}",
            csv_field(&r.location),
            r.platform,
            r.avg_impressions_1m,
            r.avg_clicks_1m,
            r.ctr,
            r.avg_impressions_4w,
            r.avg_clicks_4w,
            r.cpc,
            r.cpm,
        );
    }
}

// ---------------------------------------------------------------------------
// bannerdash parse
// ---------------------------------------------------------------------------

/// Parse pasted rows from a file or stdin and print them.
pub fn run_parse(path: Option<&Path>, platform: Platform, format: OutputFormat) -> Result<()> {
    let language = config::load().general.language;
    let text = read_input(path)?;

    if text.trim().is_empty() {
        println!("{}", Notice::EmptyPaste.text(language).yellow());
        return Ok(());
    }

    let records = parse_paste(&text, platform);
    if records.is_empty() {
        println!("{}", Notice::UnrecognizedFormat.text(language).yellow());
        return Ok(());
    }

    let refs: Vec<&Record> = records.iter().collect();
    match format {
        OutputFormat::Json => print_records_json(&refs)?,
        OutputFormat::Csv => print_records_csv(&refs),
        OutputFormat::Table => {
            print_records_table(&refs);
            println!();
            println!("{}", Notice::RecordsAdded(records.len()).text(language).green());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// bannerdash insights
// ---------------------------------------------------------------------------

/// Request an AI analysis of the current view and print it.
pub fn run_insights(source: &DataSource<'_>) -> Result<()> {
    let cfg = config::load();
    let language = cfg.general.language;
    let log = ActivityLog::from_config(&cfg.logging);
    let dash = load_dashboard(source, language, &log)?;

    let snapshot = dash.snapshot();
    let backend = insights::backend_from_config(&cfg.insights);

    eprintln!(
        "{}",
        format!(
            "Analyzing {} records with {}…",
            snapshot.len(),
            cfg.insights.model
        )
        .dimmed()
    );
    let insight = insights::request_insight(backend.as_ref(), &snapshot, language);

    let mut entry = ActivityEntry::new(Action::Insight, snapshot.len(), insight.is_generated())
        .with_latency(insight.latency_ms);
    if let Some(err) = &insight.error {
        entry = entry.with_detail(err.clone());
    }
    log.record(&entry);

    match insight.outcome {
        InsightOutcome::Generated => println!("{}", insight.text),
        InsightOutcome::Empty | InsightOutcome::Failed => {
            println!("{}", insight.text.yellow());
            if let Some(err) = &insight.error {
                println!("  {}", err.dimmed());
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// bannerdash history
// ---------------------------------------------------------------------------

/// Show the most recent activity-log entries.
pub fn run_history(limit: usize) -> Result<()> {
    let cfg = config::load();
    let log = ActivityLog::from_config(&cfg.logging);
    let entries = log.read_recent(limit);

    if entries.is_empty() {
        println!("{}", "No activity recorded yet.".yellow());
        return Ok(());
    }

    println!("{}", "Recent Activity".bold().cyan());
    println!("{}", "=".repeat(60));
    for e in &entries {
        let status = if e.success { "✓".green() } else { "✗".red() };
        let time = e.timestamp.get(..19).unwrap_or(e.timestamp.as_str());
        println!(
            "  {} {} {:<9} {:>4}  {}",
            status,
            time.dimmed(),
            e.action.to_string(),
            e.count,
            e.detail.as_deref().unwrap_or("").dimmed()
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// bannerdash health
// ---------------------------------------------------------------------------

/// Check config, insight setup, and the activity log.
pub fn run_health() -> Result<()> {
    println!("{}", "bannerdash Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let cfg = config::load();

    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.bannerdash/config.toml found"
        } else {
            "not found (run `bannerdash config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".bannerdash.toml found"
        } else {
            "none (optional)"
        },
    );
    print_health_item("Language", true, &cfg.general.language.to_string());

    print_health_item(
        "Insights",
        cfg.insights.enabled,
        if cfg.insights.enabled {
            "enabled"
        } else {
            "disabled (set BANNERDASH_INSIGHTS=1 to enable)"
        },
    );
    if cfg.insights.enabled {
        let has_key = cfg.insights.api_key().is_some();
        print_health_item(
            "API key",
            has_key,
            if has_key {
                "configured"
            } else {
                "missing (set BANNERDASH_API_KEY or GEMINI_API_KEY)"
            },
        );
        print_health_item("Model", true, &cfg.insights.model);
    }

    let log = ActivityLog::from_config(&cfg.logging);
    let log_exists = log.path().map(|p| p.exists()).unwrap_or(false);
    print_health_item(
        "Activity log",
        log_exists,
        &if !cfg.logging.enabled {
            "disabled".to_string()
        } else if log_exists {
            format!("{} entries", log.read_recent(usize::MAX).len())
        } else {
            "no log file yet".to_string()
        },
    );
    print_health_item("Dashboard address", true, &format!("http://{}", cfg.web.addr));

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<20} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// bannerdash config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective bannerdash Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    for (label, path) in [
        ("~/.bannerdash/config.toml", config::global_config_file()),
        (".bannerdash.toml", config::project_config_file()),
    ] {
        if path.map(|p| p.exists()).unwrap_or(false) {
            println!("  {} {}", "✓".green(), label.dimmed());
        } else {
            println!("  {} {} {}", "·".dimmed(), label.dimmed(), "(not found)".dimmed());
        }
    }
    println!(
        "  {} {}",
        "·".dimmed(),
        "BANNERDASH_* environment variables".dimmed()
    );

    Ok(())
}

/// Initialize a default config file at `~/.bannerdash/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Truncate to `max_chars` characters, appending "…" if truncated.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

/// Quote a CSV field when it contains a separator, quote or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn colorize_platform(platform: Platform) -> colored::ColoredString {
    match platform {
        Platform::Pc => platform.as_str().blue(),
        Platform::Mobile => platform.as_str().yellow(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
