use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use bannerdash::aggregate::ranking::ChartMetric;
use bannerdash::cli::{self, DataSource, OutputFormat};
use bannerdash::config;
use bannerdash::filter::PlatformFilter;
use bannerdash::record::Platform;
use bannerdash::web;

#[derive(Debug, Parser)]
#[command(name = "bannerdash")]
#[command(about = "Banner ad performance dashboard")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render summary cards, the record table, and a ranked chart
    Report {
        /// Platform filter: all (default), pc, mobile
        #[arg(long, default_value = "all")]
        platform: String,
        /// Chart metric: impressions (default), cpc, cpm, ctr
        #[arg(long, default_value = "impressions")]
        metric: String,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Tab-separated rows to bulk-add on top of the seed data
        #[arg(long)]
        paste: Option<PathBuf>,
        /// Platform assigned to pasted rows: pc (default), mobile
        #[arg(long, default_value = "pc")]
        paste_platform: String,
    },
    /// Parse pasted spreadsheet rows from FILE (or stdin) and print them
    Parse {
        file: Option<PathBuf>,
        /// Platform assigned to parsed rows: pc (default), mobile
        #[arg(long, default_value = "pc")]
        platform: String,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Ask the hosted model for an analysis of the current view
    Insights {
        /// Platform filter: all (default), pc, mobile
        #[arg(long, default_value = "all")]
        platform: String,
        /// Tab-separated rows to bulk-add on top of the seed data
        #[arg(long)]
        paste: Option<PathBuf>,
        /// Platform assigned to pasted rows: pc (default), mobile
        #[arg(long, default_value = "pc")]
        paste_platform: String,
    },
    /// Start the local web dashboard
    Web {
        /// Listen address (default from config: 127.0.0.1:9747)
        #[arg(long)]
        addr: Option<String>,
        /// Don't open a browser window
        #[arg(long)]
        no_browser: bool,
    },
    /// Show recent activity-log entries
    History {
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Check config, insight setup, and the activity log
    Health,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective (merged) configuration
    Show,
    /// Write a default config to ~/.bannerdash/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `insights.model gemini-2.5-flash`
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Report {
            platform,
            metric,
            format,
            paste,
            paste_platform,
        } => {
            let source = DataSource {
                paste_file: paste.as_deref(),
                paste_platform: parse_platform(&paste_platform)?,
                filter: parse_filter(&platform)?,
            };
            let metric = ChartMetric::parse(&metric)
                .ok_or_else(|| anyhow!("unknown metric '{metric}' (impressions, cpc, cpm, ctr)"))?;
            cli::run_report(&source, metric, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Parse {
            file,
            platform,
            format,
        } => cli::run_parse(
            file.as_deref(),
            parse_platform(&platform)?,
            OutputFormat::from_str_opt(Some(&format)),
        ),
        Commands::Insights {
            platform,
            paste,
            paste_platform,
        } => {
            let source = DataSource {
                paste_file: paste.as_deref(),
                paste_platform: parse_platform(&paste_platform)?,
                filter: parse_filter(&platform)?,
            };
            cli::run_insights(&source)
        }
        Commands::Web { addr, no_browser } => {
            let cfg = config::load();
            let addr = addr.unwrap_or_else(|| cfg.web.addr.clone());
            let open = cfg.web.open_browser && !no_browser;
            web::serve(&addr, cfg, open)
        }
        Commands::History { limit } => cli::run_history(limit),
        Commands::Health => cli::run_health(),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}

fn parse_platform(value: &str) -> Result<Platform> {
    Platform::parse(value).ok_or_else(|| anyhow!("unknown platform '{value}' (pc, mobile)"))
}

fn parse_filter(value: &str) -> Result<PlatformFilter> {
    PlatformFilter::parse(value)
        .ok_or_else(|| anyhow!("unknown platform filter '{value}' (all, pc, mobile)"))
}
