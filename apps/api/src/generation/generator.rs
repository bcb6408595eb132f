//! Message Generation: assembles the instruction block and makes the single
//! completion call.
//!
//! Flow: guidance lookup → prompt assembly → one completion call → outcome.
//!
//! A failed call is NOT an error at this layer: it becomes a `GenerationOutcome`
//! with `success = false` and the failure reason in place of the message.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::options::{Category, LengthOption, Recipient, StyleOption};
use crate::generation::prompts::{
    GENERATION_FAILURE_PREFIX, MESSAGE_PROMPT_TEMPLATE, NO_EXTRA_INFO,
};
use crate::generation::tables::PromptTables;
use crate::llm_client::prompts::SCHOOL_ADMIN_SYSTEM;
use crate::llm_client::{CompletionBackend, LlmError};

/// Messages up to this many characters go out as short SMS; longer ones as LMS.
pub const SMS_MAX_CHARS: usize = 80;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Everything the generator needs for one message. Date and school are
/// already resolved by the caller.
#[derive(Debug, Clone)]
pub struct MessageRequest {
    pub recipient: Recipient,
    pub category: Category,
    pub content_details: String,
    pub date: String,
    pub school: String,
    /// Extra fields in form order. Empty values are left out of the prompt.
    pub extra_info: IndexMap<String, String>,
    /// Only consulted when the tone table has no entry for the recipient.
    pub tone_override: Option<String>,
    pub length: LengthOption,
    pub style: StyleOption,
}

impl MessageRequest {
    /// Rejects a request before any call is attempted.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.content_details.trim().is_empty() {
            return Err(AppError::Validation(
                "content_details cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageKind {
    #[serde(rename = "SMS")]
    Sms,
    #[serde(rename = "LMS")]
    Lms,
}

impl MessageKind {
    pub fn from_char_count(chars: usize) -> Self {
        if chars <= SMS_MAX_CHARS {
            MessageKind::Sms
        } else {
            MessageKind::Lms
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MessageKind::Sms => "단문(SMS)",
            MessageKind::Lms => "장문(LMS)",
        }
    }

    /// Rough per-message sending cost, for display only.
    pub fn estimated_cost(&self) -> &'static str {
        match self {
            MessageKind::Sms => "약 20원",
            MessageKind::Lms => "약 30-50원",
        }
    }
}

/// Result of one generation. `text` holds either the message or the failure reason.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub text: String,
    pub success: bool,
}

impl GenerationOutcome {
    fn succeeded(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            success: true,
        }
    }

    fn failed(error: &LlmError) -> Self {
        Self {
            text: format!("{GENERATION_FAILURE_PREFIX}: {error}"),
            success: false,
        }
    }

    /// Length in characters, not bytes.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn kind(&self) -> MessageKind {
        MessageKind::from_char_count(self.char_count())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// Generates one message with a single completion call. Never returns an error.
pub async fn generate_message(
    backend: &dyn CompletionBackend,
    tables: &PromptTables,
    request: &MessageRequest,
) -> GenerationOutcome {
    let prompt = build_message_prompt(tables, request);

    match backend.complete(&prompt, SCHOOL_ADMIN_SYSTEM).await {
        Ok(text) => {
            let outcome = GenerationOutcome::succeeded(&text);
            info!(
                "Generated {:?}/{:?} message: {} chars",
                request.recipient,
                request.category,
                outcome.char_count()
            );
            outcome
        }
        Err(e) => {
            warn!(
                "Generation failed for {:?}/{:?}: {e}",
                request.recipient, request.category
            );
            GenerationOutcome::failed(&e)
        }
    }
}

/// Fills the message template from the request and the guidance tables.
pub fn build_message_prompt(tables: &PromptTables, request: &MessageRequest) -> String {
    let extra_info = render_extra_info(&request.extra_info);

    fill_template(
        MESSAGE_PROMPT_TEMPLATE,
        &[
            ("recipient", request.recipient.label()),
            ("category", request.category.label()),
            ("school", request.school.as_str()),
            ("date", request.date.as_str()),
            ("content", request.content_details.as_str()),
            ("extra_info", extra_info.as_str()),
            (
                "tone",
                tables.tone_for(request.recipient, request.tone_override.as_deref()),
            ),
            ("elements", tables.elements_for(request.category)),
            ("length", tables.length_for(request.length)),
            ("style", tables.style_for(request.style)),
        ],
    )
}

/// One newline-terminated `- key: value` line per non-empty field, values
/// verbatim, or the "none" marker.
fn render_extra_info(extra_info: &IndexMap<String, String>) -> String {
    let rendered: String = extra_info
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("- {key}: {value}\n"))
        .collect();

    if rendered.is_empty() {
        NO_EXTRA_INFO.to_string()
    } else {
        rendered
    }
}

/// Single-pass `{name}` substitution. Unlike chained `str::replace`, values are
/// never rescanned, so a `{tone}` typed into the details stays literal.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
