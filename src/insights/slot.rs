/// Shared "last insight" slot for background insight requests.
///
/// Each request runs on its own thread with an owned snapshot of the
/// records, so later edits to the dashboard never change a request already
/// in flight. Requests are not cancelled and not ordered: whichever resolves
/// last overwrites the slot.
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use chrono::Utc;
use serde::Serialize;

use super::{Insight, InsightBackend, request_insight};
use crate::activity::{Action, ActivityEntry, ActivityLog};
use crate::locale::Language;
use crate::record::Record;

/// A resolved insight together with the request that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedInsight {
    pub request_id: u64,
    /// Number of records the request was given.
    pub record_count: usize,
    /// RFC 3339 time the request resolved.
    pub resolved_at: String,
    #[serde(flatten)]
    pub insight: Insight,
}

#[derive(Debug, Default)]
struct Inner {
    last: Mutex<Option<ResolvedInsight>>,
    next_id: AtomicU64,
    pending: AtomicUsize,
    log: ActivityLog,
}

/// Cloneable handle to the shared slot.
#[derive(Debug, Clone, Default)]
pub struct InsightSlot {
    inner: Arc<Inner>,
}

impl InsightSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that appends an `insight` activity entry as each request
    /// resolves.
    pub fn with_log(log: ActivityLog) -> Self {
        Self {
            inner: Arc::new(Inner {
                log,
                ..Default::default()
            }),
        }
    }

    /// Start a request in the background. Returns its id and the thread
    /// handle; callers that don't need to wait may drop the handle.
    pub fn spawn(
        &self,
        backend: Arc<dyn InsightBackend + Send + Sync>,
        snapshot: Vec<Record>,
        language: Language,
    ) -> (u64, JoinHandle<()>) {
        let request_id = self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.pending.fetch_add(1, Ordering::SeqCst);

        let inner = Arc::clone(&self.inner);
        let handle = thread::spawn(move || {
            let insight = request_insight(backend.as_ref(), &snapshot, language);

            let mut entry = ActivityEntry::new(Action::Insight, snapshot.len(), insight.is_generated())
                .with_latency(insight.latency_ms);
            if let Some(err) = &insight.error {
                entry = entry.with_detail(err.clone());
            }
            inner.log.record(&entry);

            let resolved = ResolvedInsight {
                request_id,
                record_count: snapshot.len(),
                resolved_at: Utc::now().to_rfc3339(),
                insight,
            };
            *lock(&inner.last) = Some(resolved);
            inner.pending.fetch_sub(1, Ordering::SeqCst);
        });

        (request_id, handle)
    }

    /// The most recently resolved insight, if any.
    pub fn last(&self) -> Option<ResolvedInsight> {
        lock(&self.inner.last).clone()
    }

    /// Requests started but not yet resolved.
    pub fn pending(&self) -> usize {
        self.inner.pending.load(Ordering::SeqCst)
    }
}

/// Lock the slot, recovering from a panicked writer; the stored value is
/// always a complete `Option` so a poisoned lock is still usable.
fn lock(m: &Mutex<Option<ResolvedInsight>>) -> MutexGuard<'_, Option<ResolvedInsight>> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{Receiver, channel};

    use anyhow::Result;

    /// Backend that blocks until the test releases it.
    struct Gate(Mutex<Receiver<String>>);

    impl InsightBackend for Gate {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.lock().unwrap().recv()?)
        }
    }

    #[test]
    fn empty_slot_has_nothing() {
        let slot = InsightSlot::new();
        assert!(slot.last().is_none());
        assert_eq!(slot.pending(), 0);
    }

    #[test]
    fn last_to_resolve_wins() {
        let slot = InsightSlot::new();
        let (tx_a, rx_a) = channel();
        let (tx_b, rx_b) = channel();

        let (id_a, handle_a) = slot.spawn(
            Arc::new(Gate(Mutex::new(rx_a))),
            Vec::new(),
            Language::English,
        );
        let (id_b, handle_b) = slot.spawn(
            Arc::new(Gate(Mutex::new(rx_b))),
            Vec::new(),
            Language::English,
        );
        assert_eq!((id_a, id_b), (1, 2));
        assert_eq!(slot.pending(), 2);

        // The second request resolves first, the first one last.
        tx_b.send("from b".to_string()).unwrap();
        handle_b.join().unwrap();
        assert_eq!(slot.last().unwrap().insight.text, "from b");

        tx_a.send("from a".to_string()).unwrap();
        handle_a.join().unwrap();
        let last = slot.last().unwrap();
        assert_eq!(last.request_id, 1);
        assert_eq!(last.insight.text, "from a");
        assert_eq!(slot.pending(), 0);
    }

    #[test]
    fn resolved_requests_are_logged() {
        let dir = std::env::temp_dir().join(format!("bannerdash-slot-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let log = ActivityLog::at(dir.join("activity.jsonl"));
        let slot = InsightSlot::with_log(log.clone());

        let (tx, rx) = channel();
        let (_, handle) = slot.spawn(Arc::new(Gate(Mutex::new(rx))), Vec::new(), Language::Korean);
        tx.send("ok".to_string()).unwrap();
        handle.join().unwrap();

        let entries = log.read_recent(10);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, Action::Insight);
        assert!(entries[0].success);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
