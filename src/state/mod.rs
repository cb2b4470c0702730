//! Application state: the single owner of the record collection.
//!
//! [`Dashboard`] holds the ordered record collection and the active
//! platform filter. All mutation goes through its entry points; everything
//! else reads derived views that are recomputed from the current state.

pub mod entry;

pub use entry::{EntryError, ManualEntry};

use crate::aggregate::ranking::{ChartBar, ChartMetric, rank_by};
use crate::aggregate::{Summary, summarize};
use crate::filter::{self, IndexedRecord, PlatformFilter};
use crate::paste::parse_paste;
use crate::record::seed::seed_records;
use crate::record::{Platform, Record};

/// Owned dashboard state.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    records: Vec<Record>,
    filter: PlatformFilter,
    /// Bumped on every collection mutation.
    version: u64,
}

impl Dashboard {
    /// A dashboard populated with the built-in seed dataset.
    pub fn seeded() -> Self {
        Self::with_records(seed_records())
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records,
            filter: PlatformFilter::All,
            version: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The full collection, in order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filter(&self) -> PlatformFilter {
        self.filter
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Collection with the fixed exclusion applied, ignoring the platform
    /// filter. This is what the data manager lists.
    pub fn processed(&self) -> Vec<&Record> {
        filter::exclude_fixed(&self.records)
    }

    /// Like [`processed`](Self::processed), with collection indices.
    pub fn indexed_processed(&self) -> Vec<IndexedRecord<'_>> {
        filter::indexed_view(&self.records, PlatformFilter::All)
    }

    /// Derived view for the active platform filter.
    pub fn view(&self) -> Vec<&Record> {
        filter::derived_view(&self.records, self.filter)
    }

    pub fn summary(&self) -> Summary {
        summarize(&self.view())
    }

    pub fn chart(&self, metric: ChartMetric) -> Vec<ChartBar> {
        rank_by(&self.view(), metric)
    }

    /// Owned copy of the derived view, detached from later mutations.
    pub fn snapshot(&self) -> Vec<Record> {
        self.view().into_iter().cloned().collect()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Insert one record ahead of all existing records.
    pub fn add(&mut self, record: Record) {
        self.records.insert(0, record);
        self.version += 1;
    }

    /// Insert a batch ahead of all existing records, keeping batch order.
    /// Returns the number of records added.
    pub fn add_batch(&mut self, batch: Vec<Record>) -> usize {
        let added = batch.len();
        if added > 0 {
            self.records.splice(0..0, batch);
            self.version += 1;
        }
        added
    }

    /// Remove the record at `index` of the current collection.
    pub fn remove_at(&mut self, index: usize) -> Result<Record, EntryError> {
        if index >= self.records.len() {
            return Err(EntryError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        self.version += 1;
        Ok(self.records.remove(index))
    }

    pub fn set_filter(&mut self, filter: PlatformFilter) {
        self.filter = filter;
    }

    /// Validate a manual form submission and insert it at the front.
    pub fn submit_entry(&mut self, entry: ManualEntry) -> Result<&Record, EntryError> {
        let record = entry.into_record()?;
        self.add(record);
        Ok(&self.records[0])
    }

    /// Parse a pasted block and bulk-add it. Returns the number added.
    pub fn paste(&mut self, text: &str, platform: Platform) -> Result<usize, EntryError> {
        if text.trim().is_empty() {
            return Err(EntryError::EmptyPaste);
        }
        let batch = parse_paste(text, platform);
        if batch.is_empty() {
            return Err(EntryError::UnrecognizedFormat);
        }
        Ok(self.add_batch(batch))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.location.as_str()).collect()
    }

    #[test]
    fn seeded_dashboard_starts_unfiltered() {
        let dash = Dashboard::seeded();
        assert_eq!(dash.len(), 10);
        assert_eq!(dash.filter(), PlatformFilter::All);
        assert_eq!(dash.version(), 0);
    }

    #[test]
    fn add_inserts_at_front() {
        let mut dash = Dashboard::seeded();
        let entry = ManualEntry {
            location: "New".to_string(),
            ..Default::default()
        };
        dash.submit_entry(entry).unwrap();
        assert_eq!(dash.records()[0].location, "New");
        assert_eq!(dash.records()[1].location, "TOP");
        assert_eq!(dash.version(), 1);
    }

    #[test]
    fn rejected_entry_leaves_state_untouched() {
        let mut dash = Dashboard::seeded();
        let err = dash.submit_entry(ManualEntry::default()).unwrap_err();
        assert_eq!(err, EntryError::LocationRequired);
        assert_eq!(dash.len(), 10);
        assert_eq!(dash.version(), 0);
    }

    #[test]
    fn paste_rejects_blank_and_unrecognized_input() {
        let mut dash = Dashboard::seeded();
        assert_eq!(dash.paste("  \n\t ", Platform::Pc), Err(EntryError::EmptyPaste));
        assert_eq!(
            dash.paste("a\tb", Platform::Pc),
            Err(EntryError::UnrecognizedFormat)
        );
        assert_eq!(dash.len(), 10);
    }

    #[test]
    fn remove_at_out_of_range_is_an_error() {
        let mut dash = Dashboard::seeded();
        assert_eq!(
            dash.remove_at(10),
            Err(EntryError::IndexOutOfRange { index: 10, len: 10 })
        );
        assert_eq!(dash.len(), 10);
    }

    #[test]
    fn remove_twice_resolves_against_current_list() {
        let mut dash = Dashboard::seeded();
        let first = dash.remove_at(1).unwrap();
        let second = dash.remove_at(1).unwrap();
        assert_eq!(first.location, "A1");
        assert_eq!(second.location, "A2");
        assert_eq!(&names(dash.records())[..3], &["TOP", "B", "메인 중간"]);
    }

    #[test]
    fn snapshot_is_detached() {
        let mut dash = Dashboard::seeded();
        let snapshot = dash.snapshot();
        dash.remove_at(0).unwrap();
        assert_eq!(snapshot.len(), 10);
        assert_eq!(snapshot[0].location, "TOP");
    }

    #[test]
    fn filter_changes_view_not_collection() {
        let mut dash = Dashboard::seeded();
        dash.set_filter(PlatformFilter::Pc);
        assert_eq!(dash.view().len(), 4);
        assert_eq!(dash.processed().len(), 10);
        assert_eq!(dash.len(), 10);
    }
}
