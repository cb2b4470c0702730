//! Banner-ad performance records.
//!
//! A [`Record`] is a passive data shape: one banner placement's observed
//! performance over a one-month and a four-week window. Nothing here
//! validates; callers coerce raw text through [`numeric`] and derive CTR
//! with [`derive_ctr`] before constructing a record.

pub mod numeric;
pub mod seed;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Delivery platform of a banner placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    #[serde(rename = "PC")]
    Pc,
    #[serde(rename = "Mobile")]
    Mobile,
}

impl Platform {
    /// Parse a platform name, case-insensitively.
    ///
    /// Accepts `pc`, `mobile`, `mo` and the Korean label `모바일`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pc" => Some(Self::Pc),
            "mobile" | "mo" | "모바일" => Some(Self::Mobile),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pc => "PC",
            Self::Mobile => "Mobile",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One banner placement's observed performance.
///
/// Records have no identity beyond their position in the owning collection;
/// duplicate locations are expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub location: String,
    pub platform: Platform,
    /// Rolling one-month average impressions.
    #[serde(rename = "avgImpressions1M")]
    pub avg_impressions_1m: u64,
    /// Rolling one-month average clicks.
    #[serde(rename = "avgClicks1M")]
    pub avg_clicks_1m: u64,
    /// Click-through rate as a percentage (0–100 scale), two decimals.
    pub ctr: f64,
    #[serde(rename = "avgImpressions4W")]
    pub avg_impressions_4w: u64,
    #[serde(rename = "avgClicks4W")]
    pub avg_clicks_4w: u64,
    /// Cost per click, whole currency units.
    pub cpc: u64,
    /// Cost per thousand impressions, whole currency units.
    pub cpm: u64,
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derive CTR (percent, two decimals) from one-month clicks and impressions.
///
/// Zero impressions yield a CTR of 0 regardless of clicks.
pub fn derive_ctr(clicks: u64, impressions: u64) -> f64 {
    if impressions == 0 {
        return 0.0;
    }
    round2(clicks as f64 / impressions as f64 * 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_ctr_rounds_to_two_decimals() {
        assert_eq!(derive_ctr(200, 100_000), 0.2);
        assert_eq!(derive_ctr(1263, 632_601), 0.2);
        assert_eq!(derive_ctr(1, 3), 33.33);
        assert_eq!(derive_ctr(2, 3), 66.67);
    }

    #[test]
    fn derive_ctr_guards_zero_impressions() {
        assert_eq!(derive_ctr(0, 0), 0.0);
        assert_eq!(derive_ctr(500, 0), 0.0);
    }

    #[test]
    fn platform_parse_variants() {
        assert_eq!(Platform::parse("PC"), Some(Platform::Pc));
        assert_eq!(Platform::parse(" pc "), Some(Platform::Pc));
        assert_eq!(Platform::parse("Mobile"), Some(Platform::Mobile));
        assert_eq!(Platform::parse("mo"), Some(Platform::Mobile));
        assert_eq!(Platform::parse("모바일"), Some(Platform::Mobile));
        assert_eq!(Platform::parse("tablet"), None);
    }

    #[test]
    fn record_serializes_with_wire_names() {
        let record = Record {
            location: "Sidebar".to_string(),
            platform: Platform::Mobile,
            avg_impressions_1m: 10,
            avg_clicks_1m: 1,
            ctr: 10.0,
            avg_impressions_4w: 5,
            avg_clicks_4w: 0,
            cpc: 100,
            cpm: 1000,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"platform\":\"Mobile\""));
        assert!(json.contains("\"avgImpressions1M\":10"));
        assert!(json.contains("\"avgClicks4W\":0"));

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
