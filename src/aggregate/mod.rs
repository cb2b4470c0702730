//! Summary statistics over a derived view.
//!
//! Everything here is recomputed from the current view on demand; nothing is
//! cached or stored.

pub mod ranking;

use serde::Serialize;

use crate::record::Record;

/// Label shown in place of a leader when no record qualifies.
pub const PLACEHOLDER: &str = "-";

/// Summary cards for a derived view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of records in the view.
    pub count: usize,
    /// Sum of one-month impressions.
    pub total_impressions: u64,
    /// Arithmetic mean of CTR; 0 for an empty view.
    pub avg_ctr: f64,
    /// Cheapest placement among those with a positive CPC.
    pub best_cpc: Option<Record>,
    /// Placement with the most one-month impressions.
    pub peak_impressions: Option<Record>,
}

impl Summary {
    /// `(location, cpc)` of the best-CPC leader, or the placeholder.
    pub fn best_cpc_label(&self) -> (&str, u64) {
        match &self.best_cpc {
            Some(r) => (r.location.as_str(), r.cpc),
            None => (PLACEHOLDER, 0),
        }
    }

    /// `(location, impressions)` of the reach leader, or the placeholder.
    pub fn peak_impressions_label(&self) -> (&str, u64) {
        match &self.peak_impressions {
            Some(r) => (r.location.as_str(), r.avg_impressions_1m),
            None => (PLACEHOLDER, 0),
        }
    }
}

/// Compute the summary cards for a view.
pub fn summarize(view: &[&Record]) -> Summary {
    Summary {
        count: view.len(),
        total_impressions: total_impressions(view),
        avg_ctr: average_ctr(view),
        best_cpc: best_cpc(view).cloned(),
        peak_impressions: peak_impressions(view).cloned(),
    }
}

/// Sum of 1-month impressions, clamped at `u64::MAX`.
pub fn total_impressions(view: &[&Record]) -> u64 {
    view.iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.avg_impressions_1m))
}

pub fn average_ctr(view: &[&Record]) -> f64 {
    if view.is_empty() {
        return 0.0;
    }
    view.iter().map(|r| r.ctr).sum::<f64>() / view.len() as f64
}

/// Minimum CPC among records with `cpc > 0`; the first such record wins ties.
pub fn best_cpc<'a>(view: &[&'a Record]) -> Option<&'a Record> {
    view.iter()
        .copied()
        .filter(|r| r.cpc > 0)
        .fold(None, |best: Option<&Record>, r| match best {
            Some(b) if b.cpc <= r.cpc => Some(b),
            _ => Some(r),
        })
}

/// Maximum one-month impressions; the first such record wins ties.
pub fn peak_impressions<'a>(view: &[&'a Record]) -> Option<&'a Record> {
    view.iter()
        .copied()
        .fold(None, |peak: Option<&Record>, r| match peak {
            Some(p) if p.avg_impressions_1m >= r.avg_impressions_1m => Some(p),
            _ => Some(r),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
