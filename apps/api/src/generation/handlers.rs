//! Axum route handlers for the Generation API.

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::batch::{run_batch, BatchReport, BatchRequest, Scenario, ScenarioSpec};
use crate::generation::dates::{compose_date, date_presets, TimeOfDay, MINUTE_STEP};
use crate::generation::export::{export_file_name, render_batch_text};
use crate::generation::generator::{generate_message, MessageKind, MessageRequest};
use crate::generation::options::{
    Category, ExtraFieldSpec, LengthOption, OptionEntry, Recipient, StyleOption,
};
use crate::generation::samples::sample_message;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    pub recipient: Recipient,
    pub category: Category,
    #[serde(default)]
    pub content_details: String,
    /// Free date text; today's date when absent.
    pub date: Option<String>,
    pub time: Option<TimeOfDay>,
    /// Falls back to the configured school name.
    pub school: Option<String>,
    #[serde(default)]
    pub extra_info: IndexMap<String, String>,
    pub tone_override: Option<String>,
    #[serde(default)]
    pub length: LengthOption,
    #[serde(default)]
    pub style: StyleOption,
}

#[derive(Debug, Serialize)]
pub struct MessageMetrics {
    pub kind: MessageKind,
    pub kind_label: &'static str,
    pub estimated_cost: &'static str,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// The generated message, or the failure reason when `success` is false.
    pub message: String,
    pub success: bool,
    pub char_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MessageMetrics>,
    pub sample: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct BatchForm {
    pub scenario: Scenario,
    #[serde(default)]
    pub content_details: String,
    pub date: Option<String>,
    pub time: Option<TimeOfDay>,
    pub school: Option<String>,
    #[serde(default)]
    pub extra_info: IndexMap<String, String>,
    #[serde(default)]
    pub length: LengthOption,
    #[serde(default)]
    pub style: StyleOption,
}

#[derive(Debug, Deserialize)]
pub struct SampleQuery {
    pub recipient: Recipient,
    pub category: Category,
}

#[derive(Debug, Serialize)]
pub struct SampleResponse {
    pub sample: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct CategoryOption {
    pub value: Category,
    pub label: &'static str,
    pub extra_fields: &'static [ExtraFieldSpec],
}

#[derive(Debug, Serialize)]
pub struct LengthChoice {
    pub value: LengthOption,
    pub label: &'static str,
    pub target_chars: u32,
}

#[derive(Debug, Serialize)]
pub struct ScenarioOption {
    pub value: Scenario,
    #[serde(flatten)]
    pub spec: &'static ScenarioSpec,
}

#[derive(Debug, Serialize)]
pub struct TimeOptions {
    pub hours: Vec<u8>,
    pub minutes: Vec<u8>,
}

/// Everything a front-end needs to render the form.
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub recipients: Vec<OptionEntry<Recipient>>,
    pub categories: Vec<CategoryOption>,
    pub lengths: Vec<LengthChoice>,
    pub styles: Vec<OptionEntry<StyleOption>>,
    pub scenarios: Vec<ScenarioOption>,
    pub date_presets: Vec<String>,
    pub time_options: TimeOptions,
    pub default_school: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn resolve_school(state: &AppState, school: Option<String>) -> String {
    school
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| state.config.school_name.clone())
}

impl BatchForm {
    fn into_request(self, state: &AppState) -> Result<BatchRequest, AppError> {
        if self.content_details.trim().is_empty() {
            return Err(AppError::Validation(
                "content_details cannot be empty".to_string(),
            ));
        }
        let date = compose_date(self.date.as_deref(), self.time, today())?;

        Ok(BatchRequest {
            scenario: self.scenario,
            content_details: self.content_details,
            date,
            school: resolve_school(state, self.school),
            extra_info: self.extra_info,
            length: self.length,
            style: self.style,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/options
pub async fn handle_options(State(state): State<AppState>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        recipients: Recipient::ALL
            .iter()
            .map(|&value| OptionEntry {
                value,
                label: value.label(),
            })
            .collect(),
        categories: Category::ALL
            .iter()
            .map(|&value| CategoryOption {
                value,
                label: value.label(),
                extra_fields: value.extra_fields(),
            })
            .collect(),
        lengths: LengthOption::ALL
            .iter()
            .map(|&value| LengthChoice {
                value,
                label: value.label(),
                target_chars: value.target_chars(),
            })
            .collect(),
        styles: StyleOption::ALL
            .iter()
            .map(|&value| OptionEntry {
                value,
                label: value.label(),
            })
            .collect(),
        scenarios: Scenario::ALL
            .iter()
            .map(|&value| ScenarioOption {
                value,
                spec: value.spec(),
            })
            .collect(),
        date_presets: date_presets(today()),
        time_options: TimeOptions {
            hours: (0..24).collect(),
            minutes: (0..60).step_by(MINUTE_STEP as usize).collect(),
        },
        default_school: state.config.school_name.clone(),
    })
}

/// GET /api/v1/samples?recipient=&category=
pub async fn handle_sample(Query(query): Query<SampleQuery>) -> Json<SampleResponse> {
    Json(SampleResponse {
        sample: sample_message(query.recipient, query.category),
    })
}

/// POST /api/v1/messages/generate
///
/// Generates one message. A failed completion call is reported in the body
/// with `success: false`, not as an HTTP error.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(form): Json<GenerateForm>,
) -> Result<Json<GenerateResponse>, AppError> {
    let date = compose_date(form.date.as_deref(), form.time, today())?;
    let request = MessageRequest {
        recipient: form.recipient,
        category: form.category,
        content_details: form.content_details,
        date,
        school: resolve_school(&state, form.school),
        extra_info: form.extra_info,
        tone_override: form.tone_override,
        length: form.length,
        style: form.style,
    };
    request.validate()?;

    let outcome = generate_message(state.llm.as_ref(), &state.tables, &request).await;

    let metrics = outcome.success.then(|| {
        let kind = outcome.kind();
        MessageMetrics {
            kind,
            kind_label: kind.label(),
            estimated_cost: kind.estimated_cost(),
        }
    });

    Ok(Json(GenerateResponse {
        char_count: outcome.char_count(),
        metrics,
        sample: sample_message(request.recipient, request.category),
        success: outcome.success,
        message: outcome.text,
    }))
}

/// POST /api/v1/messages/batch
///
/// Runs a scenario batch and returns the generated messages.
pub async fn handle_batch(
    State(state): State<AppState>,
    Json(form): Json<BatchForm>,
) -> Result<Json<BatchReport>, AppError> {
    let request = form.into_request(&state)?;
    let report = run_batch(
        state.llm.as_ref(),
        &state.tables,
        &request,
        state.config.batch_delay,
    )
    .await;
    Ok(Json(report))
}

/// POST /api/v1/messages/batch/export
///
/// Runs a scenario batch and returns the results as a plain-text download.
pub async fn handle_batch_export(
    State(state): State<AppState>,
    Json(form): Json<BatchForm>,
) -> Result<Response, AppError> {
    let request = form.into_request(&state)?;
    let report = run_batch(
        state.llm.as_ref(),
        &state.tables,
        &request,
        state.config.batch_delay,
    )
    .await;

    if report.messages.is_empty() {
        return Err(AppError::Llm(format!(
            "Batch {} produced no messages; nothing to export",
            report.batch_id
        )));
    }

    let file_name = export_file_name(request.scenario, Local::now().naive_local());
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(&file_name)
    ))
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid export file name: {e}")))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        render_batch_text(&report.messages),
    )
        .into_response())
}
