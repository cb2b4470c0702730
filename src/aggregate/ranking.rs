/// Ranked bar-chart data: one bar per record, sorted by a chosen metric.
use serde::Serialize;

use crate::locale::Language;
use crate::record::{Platform, Record};

/// CTR above which a table cell is highlighted, in percent.
pub const HIGH_CTR_THRESHOLD: f64 = 0.15;

/// Metric a chart ranks placements by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMetric {
    #[default]
    Impressions,
    Cpc,
    Cpm,
    Ctr,
}

impl ChartMetric {
    pub const ALL: [ChartMetric; 4] = [Self::Impressions, Self::Cpc, Self::Cpm, Self::Ctr];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "impressions" | "imp" | "avgimpressions1m" => Some(Self::Impressions),
            "cpc" => Some(Self::Cpc),
            "cpm" => Some(Self::Cpm),
            "ctr" => Some(Self::Ctr),
            _ => None,
        }
    }

    pub fn value_of(&self, record: &Record) -> f64 {
        match self {
            Self::Impressions => record.avg_impressions_1m as f64,
            Self::Cpc => record.cpc as f64,
            Self::Cpm => record.cpm as f64,
            Self::Ctr => record.ctr,
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Impressions, Language::Korean) => "노출량",
            (Self::Impressions, Language::English) => "Impressions",
            (Self::Cpc, _) => "CPC",
            (Self::Cpm, _) => "CPM",
            (Self::Ctr, _) => "CTR",
        }
    }

    /// Format a bar value for display: percent for CTR, a plain count for
    /// impressions, won for the cost metrics.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            Self::Ctr => format!("{value:.2}%"),
            Self::Impressions => group_thousands(value.round() as u64),
            Self::Cpc | Self::Cpm => format!("₩{}", group_thousands(value.round() as u64)),
        }
    }

    /// Compact axis label: `1.2M`, `35k`, or the plain value.
    pub fn format_axis(&self, value: f64) -> String {
        match self {
            Self::Ctr => format!("{value}%"),
            _ if value >= 1_000_000.0 => format!("{:.1}M", value / 1_000_000.0),
            _ if value >= 1_000.0 => format!("{:.0}k", value / 1_000.0),
            _ => format!("{value}"),
        }
    }
}

impl std::fmt::Display for ChartMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Impressions => write!(f, "impressions"),
            Self::Cpc => write!(f, "cpc"),
            Self::Cpm => write!(f, "cpm"),
            Self::Ctr => write!(f, "ctr"),
        }
    }
}

/// One bar of the ranking chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub location: String,
    pub platform: Platform,
    pub value: f64,
}

/// Rank a view by `metric`, highest first. Equal values keep view order.
pub fn rank_by(view: &[&Record], metric: ChartMetric) -> Vec<ChartBar> {
    let mut bars: Vec<ChartBar> = view
        .iter()
        .map(|r| ChartBar {
            location: r.location.clone(),
            platform: r.platform,
            value: metric.value_of(r),
        })
        .collect();
    // `sort_by` is stable.
    bars.sort_by(|a, b| b.value.total_cmp(&a.value));
    bars
}

/// Whether a CTR deserves highlighting in table views.
pub fn is_high_ctr(ctr: f64) -> bool {
    ctr > HIGH_CTR_THRESHOLD
}

/// Format an integer with comma thousands separators.
pub fn group_thousands(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
