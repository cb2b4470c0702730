//! Filter pipeline: fixed exclusion, then the user's platform selection.
//!
//! Both stages are pure projections over a borrowed record slice. They never
//! mutate or reorder the collection and are recomputed on every read.

use serde::{Deserialize, Serialize};

use crate::record::{Platform, Record};

/// Location label that is never shown in any view.
pub const EXCLUDED_LOCATION: &str = "커뮤니티 B";

// ---------------------------------------------------------------------------
// Platform filter
// ---------------------------------------------------------------------------

/// User-selected platform filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformFilter {
    #[default]
    All,
    #[serde(rename = "PC")]
    Pc,
    Mobile,
}

impl PlatformFilter {
    /// Parse a filter name: `all`/`overall`, or any [`Platform`] name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "overall" | "" => Some(Self::All),
            other => Platform::parse(other).map(Self::from),
        }
    }

    /// Whether a record passes this filter.
    pub fn accepts(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Pc => record.platform == Platform::Pc,
            Self::Mobile => record.platform == Platform::Mobile,
        }
    }
}

impl From<Platform> for PlatformFilter {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Pc => Self::Pc,
            Platform::Mobile => Self::Mobile,
        }
    }
}

impl std::fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Pc => write!(f, "PC"),
            Self::Mobile => write!(f, "Mobile"),
        }
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Whether a record survives the fixed exclusion stage.
pub fn is_visible(record: &Record) -> bool {
    record.location != EXCLUDED_LOCATION
}

/// Stage 1: drop records at the excluded location.
pub fn exclude_fixed(records: &[Record]) -> Vec<&Record> {
    records.iter().filter(|r| is_visible(r)).collect()
}

/// Both stages: the derived view for `filter`.
pub fn derived_view(records: &[Record], filter: PlatformFilter) -> Vec<&Record> {
    records
        .iter()
        .filter(|r| is_visible(r) && filter.accepts(r))
        .collect()
}

/// A record in a view, paired with its position in the underlying collection.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndexedRecord<'a> {
    pub index: usize,
    #[serde(flatten)]
    pub record: &'a Record,
}

/// Like [`derived_view`], but keeps each record's collection index so that
/// removals issued from a filtered list target the right record.
pub fn indexed_view(records: &[Record], filter: PlatformFilter) -> Vec<IndexedRecord<'_>> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| is_visible(r) && filter.accepts(r))
        .map(|(index, record)| IndexedRecord { index, record })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(location: &str, platform: Platform) -> Record {
        Record {
            location: location.to_string(),
            platform,
            avg_impressions_1m: 0,
            avg_clicks_1m: 0,
            ctr: 0.0,
            avg_impressions_4w: 0,
            avg_clicks_4w: 0,
            cpc: 0,
            cpm: 0,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            rec("TOP", Platform::Pc),
            rec(EXCLUDED_LOCATION, Platform::Mobile),
            rec("메인 하단", Platform::Mobile),
            rec(EXCLUDED_LOCATION, Platform::Pc),
            rec("A1", Platform::Pc),
        ]
    }

    #[test]
    fn excluded_location_never_survives() {
        let records = sample();
        for filter in [PlatformFilter::All, PlatformFilter::Pc, PlatformFilter::Mobile] {
            assert!(
                derived_view(&records, filter)
                    .iter()
                    .all(|r| r.location != EXCLUDED_LOCATION)
            );
        }
        assert_eq!(exclude_fixed(&records).len(), 3);
    }

    #[test]
    fn exclusion_is_exact_match() {
        let records = vec![rec("커뮤니티 B ", Platform::Pc), rec("커뮤니티", Platform::Pc)];
        assert_eq!(exclude_fixed(&records).len(), 2);
    }

    #[test]
    fn platform_filter_keeps_matching_records_in_order() {
        let records = sample();
        let pc: Vec<_> = derived_view(&records, PlatformFilter::Pc)
            .into_iter()
            .map(|r| r.location.as_str())
            .collect();
        assert_eq!(pc, vec!["TOP", "A1"]);

        let mobile = derived_view(&records, PlatformFilter::Mobile);
        assert!(mobile.iter().all(|r| r.platform == Platform::Mobile));
        assert_eq!(mobile.len(), 1);
    }

    #[test]
    fn indexed_view_reports_collection_positions() {
        let records = sample();
        let indices: Vec<_> = indexed_view(&records, PlatformFilter::All)
            .iter()
            .map(|ir| ir.index)
            .collect();
        assert_eq!(indices, vec![0, 2, 4]);
    }

    #[test]
    fn views_do_not_mutate_source() {
        let records = sample();
        let before = records.clone();
        let _ = derived_view(&records, PlatformFilter::Mobile);
        assert_eq!(records, before);
    }

    #[test]
    fn parse_filter_names() {
        assert_eq!(PlatformFilter::parse("All"), Some(PlatformFilter::All));
        assert_eq!(PlatformFilter::parse("overall"), Some(PlatformFilter::All));
        assert_eq!(PlatformFilter::parse("pc"), Some(PlatformFilter::Pc));
        assert_eq!(PlatformFilter::parse("MOBILE"), Some(PlatformFilter::Mobile));
        assert_eq!(PlatformFilter::parse("tv"), None);
    }
}
