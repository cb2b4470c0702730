/// Insight collaborator tests.
///
/// Uses in-process backends only; no network. Covers the fallback texts,
/// what the backend is actually sent, and the background slot.
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use bannerdash::filter::PlatformFilter;
use bannerdash::insights::slot::InsightSlot;
use bannerdash::insights::{InsightBackend, InsightOutcome, request_insight};
use bannerdash::locale::{Language, Notice};
use bannerdash::state::Dashboard;

/// Records every prompt and answers with a fixed text.
#[derive(Default)]
struct Recorder {
    prompts: Mutex<Vec<String>>,
    answer: String,
}

impl InsightBackend for Recorder {
    fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

struct Failing;

impl InsightBackend for Failing {
    fn generate(&self, _prompt: &str) -> Result<String> {
        bail!("connection refused")
    }
}

#[test]
fn generated_text_is_returned() {
    let backend = Recorder {
        answer: "TOP has the best ROI.".to_string(),
        ..Default::default()
    };
    let dash = Dashboard::seeded();
    let insight = request_insight(&backend, &dash.snapshot(), Language::English);

    assert_eq!(insight.outcome, InsightOutcome::Generated);
    assert_eq!(insight.text, "TOP has the best ROI.");
}

#[test]
fn failure_becomes_localized_fallback() {
    let dash = Dashboard::seeded();

    let ko = request_insight(&Failing, &dash.snapshot(), Language::Korean);
    assert_eq!(ko.outcome, InsightOutcome::Failed);
    assert_eq!(
        ko.text,
        "AI 분석을 불러오는 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요."
    );
    assert!(ko.error.as_deref().unwrap().contains("connection refused"));

    let en = request_insight(&Failing, &dash.snapshot(), Language::English);
    assert_eq!(en.text, Notice::InsightFailed.text(Language::English));
}

#[test]
fn blank_answer_becomes_empty_fallback() {
    let backend = Recorder {
        answer: "  \n ".to_string(),
        ..Default::default()
    };
    let insight = request_insight(&backend, &[], Language::English);
    assert_eq!(insight.outcome, InsightOutcome::Empty);
    assert_eq!(insight.text, "No insights could be generated at this time.");
}

#[test]
fn backend_sees_only_the_current_view() {
    let backend = Recorder {
        answer: "ok".to_string(),
        ..Default::default()
    };
    let mut dash = Dashboard::seeded();
    dash.set_filter(PlatformFilter::Pc);

    request_insight(&backend, &dash.snapshot(), Language::Korean);

    let prompts = backend.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"location\": \"TOP\""));
    assert!(!prompts[0].contains("메인 중간"));
    assert!(prompts[0].contains("in Korean."));
}

#[test]
fn background_request_uses_the_snapshot_taken_at_dispatch() {
    let backend = Arc::new(Recorder {
        answer: "done".to_string(),
        ..Default::default()
    });
    let slot = InsightSlot::new();
    let mut dash = Dashboard::seeded();

    let (_, handle) = slot.spawn(backend.clone(), dash.snapshot(), Language::English);
    // Mutations after dispatch must not leak into the request.
    while !dash.is_empty() {
        dash.remove_at(0).unwrap();
    }
    handle.join().unwrap();

    let last = slot.last().unwrap();
    assert_eq!(last.record_count, 10);
    assert_eq!(last.insight.text, "done");
    assert!(backend.prompts.lock().unwrap()[0].contains("커뮤 하단(메인)"));
}
