//! Scenario batch: one generation per recipient of a fixed scenario.
//!
//! Calls are strictly sequential with a constant pause between them. A failed
//! generation is skipped from the results; the loop never stops early.

use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::generation::generator::{generate_message, MessageKind, MessageRequest};
use crate::generation::options::{
    text_field, Category, ExtraFieldSpec, LengthOption, Recipient, StyleOption,
};
use crate::generation::tables::PromptTables;
use crate::llm_client::CompletionBackend;

pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    CommuteSafety,
    FieldTrip,
    SchoolEvent,
    CounselingWeek,
}

/// The fixed definition behind a scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSpec {
    pub label: &'static str,
    pub category: Category,
    pub recipients: &'static [Recipient],
    pub base_content: &'static str,
    pub extra_fields: &'static [ExtraFieldSpec],
}

static COMMUTE_SAFETY: ScenarioSpec = ScenarioSpec {
    label: "등하교 안전 안내",
    category: Category::Safety,
    recipients: &[Recipient::Parent, Recipient::Student, Recipient::Staff],
    base_content: "우천 시 등하교 안전 주의",
    extra_fields: &[
        text_field("날씨 상황", "예: 강한 비, 눈"),
        text_field("주의 사항", "예: 우산 지참, 미끄러운 길 주의"),
    ],
};

static FIELD_TRIP: ScenarioSpec = ScenarioSpec {
    label: "현장체험학습 안내",
    category: Category::FieldTrip,
    recipients: &[Recipient::Parent, Recipient::Student],
    base_content: "현장체험학습 실시 및 준비물 안내",
    extra_fields: &[
        text_field("장소", "예: 국립과학관"),
        text_field("학년", "예: 3학년"),
        text_field("준비물", "예: 도시락, 물"),
        text_field("집합 시간", "예: 오전 8시 30분"),
    ],
};

static SCHOOL_EVENT: ScenarioSpec = ScenarioSpec {
    label: "학교 행사 안내",
    category: Category::Event,
    recipients: &[Recipient::Parent, Recipient::Student, Recipient::Staff],
    base_content: "학교 행사 개최 안내",
    extra_fields: &[text_field("행사명", "예: 가을 축제"), text_field("장소", "예: 운동장")],
};

static COUNSELING_WEEK: ScenarioSpec = ScenarioSpec {
    label: "상담 주간 안내",
    category: Category::Counseling,
    recipients: &[Recipient::Parent, Recipient::Staff],
    base_content: "학부모 상담 주간 운영",
    extra_fields: &[
        text_field("상담 기간", "예: 11월 20일 ~ 24일"),
        text_field("신청 방법", "예: 담임교사에게 신청"),
    ],
};

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::CommuteSafety,
        Scenario::FieldTrip,
        Scenario::SchoolEvent,
        Scenario::CounselingWeek,
    ];

    pub fn spec(&self) -> &'static ScenarioSpec {
        match self {
            Scenario::CommuteSafety => &COMMUTE_SAFETY,
            Scenario::FieldTrip => &FIELD_TRIP,
            Scenario::SchoolEvent => &SCHOOL_EVENT,
            Scenario::CounselingWeek => &COUNSELING_WEEK,
        }
    }
}

/// Shared inputs for every message in a batch run.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub scenario: Scenario,
    pub content_details: String,
    pub date: String,
    pub school: String,
    pub extra_info: IndexMap<String, String>,
    pub length: LengthOption,
    pub style: StyleOption,
}

/// One successfully generated batch message.
#[derive(Debug, Clone, Serialize)]
pub struct BatchMessage {
    pub recipient: Recipient,
    pub content: String,
    pub char_count: usize,
    pub kind: MessageKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub scenario: Scenario,
    pub messages: Vec<BatchMessage>,
    /// Recipients whose generation failed, in scenario order.
    pub skipped: Vec<Recipient>,
}

impl BatchRequest {
    fn message_request(&self, recipient: Recipient) -> MessageRequest {
        MessageRequest {
            recipient,
            category: self.scenario.spec().category,
            content_details: self.content_details.clone(),
            date: self.date.clone(),
            school: self.school.clone(),
            extra_info: self.extra_info.clone(),
            tone_override: None,
            length: self.length,
            style: self.style,
        }
    }
}

/// Generates one message per scenario recipient, in order, pausing `delay`
/// between consecutive calls.
pub async fn run_batch(
    backend: &dyn CompletionBackend,
    tables: &PromptTables,
    request: &BatchRequest,
    delay: Duration,
) -> BatchReport {
    let batch_id = Uuid::new_v4();
    let spec = request.scenario.spec();
    info!(
        %batch_id,
        "Starting batch '{}' for {} recipients",
        spec.label,
        spec.recipients.len()
    );

    let mut messages = Vec::with_capacity(spec.recipients.len());
    let mut skipped = Vec::new();

    for (i, &recipient) in spec.recipients.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(delay).await;
        }

        let outcome = generate_message(backend, tables, &request.message_request(recipient)).await;

        if outcome.success {
            messages.push(BatchMessage {
                recipient,
                char_count: outcome.char_count(),
                kind: outcome.kind(),
                content: outcome.text,
            });
        } else {
            warn!(%batch_id, "Skipping {:?}: {}", recipient, outcome.text);
            skipped.push(recipient);
        }
    }

    info!(
        %batch_id,
        "Batch '{}' finished: {} generated, {} skipped",
        spec.label,
        messages.len(),
        skipped.len()
    );

    BatchReport {
        batch_id,
        scenario: request.scenario,
        messages,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::StubBackend;

    fn request(scenario: Scenario) -> BatchRequest {
        BatchRequest {
            scenario,
            content_details: "내일 오전 강한 비 예상".to_string(),
            date: "11월 15일".to_string(),
            school: "○○초등학교".to_string(),
            extra_info: IndexMap::from([("날씨 상황".to_string(), "강한 비".to_string())]),
            length: LengthOption::Short,
            style: StyleOption::Urgent,
        }
    }

    #[test]
    fn test_scenario_table_matches_fixed_definitions() {
        let safety = Scenario::CommuteSafety.spec();
        assert_eq!(safety.category, Category::Safety);
        assert_eq!(
            safety.recipients,
            &[Recipient::Parent, Recipient::Student, Recipient::Staff]
        );

        let trip = Scenario::FieldTrip.spec();
        assert_eq!(trip.category, Category::FieldTrip);
        assert_eq!(trip.recipients, &[Recipient::Parent, Recipient::Student]);

        let counseling = Scenario::CounselingWeek.spec();
        assert_eq!(counseling.category, Category::Counseling);
        assert_eq!(counseling.recipients, &[Recipient::Parent, Recipient::Staff]);
        assert_eq!(counseling.base_content, "학부모 상담 주간 운영");
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_result_per_recipient_in_scenario_order() {
        for scenario in Scenario::ALL {
            let backend = StubBackend::echo();
            let report = run_batch(
                &backend,
                &PromptTables::default(),
                &request(scenario),
                DEFAULT_BATCH_DELAY,
            )
            .await;

            let recipients: Vec<Recipient> =
                report.messages.iter().map(|m| m.recipient).collect();
            assert_eq!(recipients, scenario.spec().recipients, "{scenario:?}");
            assert!(report.skipped.is_empty());

            for message in &report.messages {
                assert_eq!(
                    message.content,
                    format!("[{}] 안내 문자입니다.", message.recipient.label())
                );
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_call_uses_scenario_category_and_shared_inputs() {
        let backend = StubBackend::echo();
        run_batch(
            &backend,
            &PromptTables::default(),
            &request(Scenario::CommuteSafety),
            DEFAULT_BATCH_DELAY,
        )
        .await;

        let prompts = backend.prompts();
        assert_eq!(prompts.len(), 3);
        for prompt in &prompts {
            assert!(prompt.contains("카테고리: 안전"));
            assert!(prompt.contains("- 날씨 상황: 강한 비"));
            assert!(prompt.contains("3. 길이: 60자 이내로 간결하게"));
        }
        assert!(prompts[0].contains("대상: 학부모"));
        assert!(prompts[1].contains("대상: 학생"));
        assert!(prompts[2].contains("대상: 교직원"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_recipient_is_skipped_and_loop_continues() {
        let backend = StubBackend::failing_on("대상: 학생");
        let report = run_batch(
            &backend,
            &PromptTables::default(),
            &request(Scenario::SchoolEvent),
            DEFAULT_BATCH_DELAY,
        )
        .await;

        let recipients: Vec<Recipient> = report.messages.iter().map(|m| m.recipient).collect();
        assert_eq!(recipients, vec![Recipient::Parent, Recipient::Staff]);
        assert_eq!(report.skipped, vec![Recipient::Student]);
        assert_eq!(backend.prompts().len(), 3, "no retries for the failed entry");
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_between_calls_only() {
        let backend = StubBackend::echo();
        let start = tokio::time::Instant::now();
        run_batch(
            &backend,
            &PromptTables::default(),
            &request(Scenario::CommuteSafety),
            Duration::from_millis(500),
        )
        .await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1000), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(1100), "{elapsed:?}");
    }
}
