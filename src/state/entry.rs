/// Manual entry form and domain validation errors.
use serde::Deserialize;
use thiserror::Error;

use crate::locale::Notice;
use crate::record::numeric::{coerce_form_number, to_whole};
use crate::record::{Platform, Record, derive_ctr};

/// Rejections raised by the dashboard's mutation entry points.
///
/// None of these leave the collection modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("banner location is required")]
    LocationRequired,
    #[error("pasted text is empty")]
    EmptyPaste,
    #[error("no row matched the pasted spreadsheet layout")]
    UnrecognizedFormat,
    #[error("no record at index {index} (collection has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl EntryError {
    /// The user-facing message for this rejection.
    pub fn notice(&self) -> Notice {
        match self {
            Self::LocationRequired => Notice::LocationRequired,
            Self::EmptyPaste => Notice::EmptyPaste,
            Self::UnrecognizedFormat => Notice::UnrecognizedFormat,
            Self::IndexOutOfRange { index, len } => Notice::IndexOutOfRange {
                index: *index,
                len: *len,
            },
        }
    }
}

/// Raw manual-entry form values, exactly as typed.
///
/// Numeric fields are free text; everything outside `[0-9.]` is stripped
/// on submit. CTR is not a form field, it is always derived.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManualEntry {
    pub location: String,
    pub platform: Platform,
    #[serde(rename = "avgImpressions1M")]
    pub impressions_1m: String,
    #[serde(rename = "avgClicks1M")]
    pub clicks_1m: String,
    #[serde(rename = "avgImpressions4W")]
    pub impressions_4w: String,
    #[serde(rename = "avgClicks4W")]
    pub clicks_4w: String,
    pub cpc: String,
    pub cpm: String,
}

impl ManualEntry {
    /// Validate and coerce into a record.
    pub fn into_record(self) -> Result<Record, EntryError> {
        let location = self.location.trim();
        if location.is_empty() {
            return Err(EntryError::LocationRequired);
        }

        let impressions = to_whole(coerce_form_number(&self.impressions_1m));
        let clicks = to_whole(coerce_form_number(&self.clicks_1m));

        Ok(Record {
            location: location.to_string(),
            platform: self.platform,
            avg_impressions_1m: impressions,
            avg_clicks_1m: clicks,
            ctr: derive_ctr(clicks, impressions),
            avg_impressions_4w: to_whole(coerce_form_number(&self.impressions_4w)),
            avg_clicks_4w: to_whole(coerce_form_number(&self.clicks_4w)),
            cpc: to_whole(coerce_form_number(&self.cpc)),
            cpm: to_whole(coerce_form_number(&self.cpm)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_location_is_rejected() {
        let entry = ManualEntry {
            location: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(entry.into_record(), Err(EntryError::LocationRequired));
    }

    #[test]
    fn numeric_fields_are_coerced_and_ctr_derived() {
        let entry = ManualEntry {
            location: "Sidebar".to_string(),
            platform: Platform::Mobile,
            impressions_1m: "100,000".to_string(),
            clicks_1m: "200회".to_string(),
            cpc: "₩1,500".to_string(),
            cpm: "".to_string(),
            ..Default::default()
        };
        let record = entry.into_record().unwrap();
        assert_eq!(record.avg_impressions_1m, 100_000);
        assert_eq!(record.avg_clicks_1m, 200);
        assert_eq!(record.ctr, 0.2);
        assert_eq!(record.cpc, 1500);
        assert_eq!(record.cpm, 0);
        assert_eq!(record.platform, Platform::Mobile);
    }

    #[test]
    fn deserializes_from_form_json() {
        let json = r#"{"location":"TOP","platform":"Mobile","avgImpressions1M":"1000","avgClicks1M":"5"}"#;
        let entry: ManualEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.platform, Platform::Mobile);
        assert_eq!(entry.impressions_1m, "1000");
        assert!(entry.cpc.is_empty());
    }

    #[test]
    fn errors_map_to_notices() {
        assert_eq!(EntryError::EmptyPaste.notice(), Notice::EmptyPaste);
        assert_eq!(
            EntryError::IndexOutOfRange { index: 4, len: 2 }.notice(),
            Notice::IndexOutOfRange { index: 4, len: 2 }
        );
    }
}
