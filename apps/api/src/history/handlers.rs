//! Axum route handlers for the History API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::options::{Category, LengthOption, Recipient, StyleOption};
use crate::history::store::{compute_stats, HistoryFilter, HistoryRecord, HistoryStats};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SaveHistoryRequest {
    pub recipient: Recipient,
    pub category: Category,
    pub content: String,
    #[serde(default)]
    pub style: StyleOption,
    #[serde(default)]
    pub length_option: LengthOption,
}

#[derive(Debug, Serialize)]
pub struct IndexedRecord {
    pub index: usize,
    #[serde(flatten)]
    pub record: HistoryRecord,
}

#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
    pub records: Vec<IndexedRecord>,
    pub stats: HistoryStats,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/history?recipient=&category=
///
/// Saved records matching the filters, oldest first, with statistics over the matches.
pub async fn handle_list_history(
    State(state): State<AppState>,
    Query(filter): Query<HistoryFilter>,
) -> Json<HistoryListResponse> {
    let history = state.history.lock().await;
    let matches = history.filtered(filter);
    let stats = compute_stats(matches.iter().map(|(_, r)| *r));

    let records = matches
        .into_iter()
        .map(|(index, record)| IndexedRecord {
            index,
            record: record.clone(),
        })
        .collect();

    Json(HistoryListResponse { records, stats })
}

/// POST /api/v1/history
///
/// Saves a generated message. Timestamp and length are assigned here.
pub async fn handle_save_history(
    State(state): State<AppState>,
    Json(request): Json<SaveHistoryRequest>,
) -> Result<(StatusCode, Json<IndexedRecord>), AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let record = HistoryRecord::new(
        Local::now().naive_local(),
        request.recipient,
        request.category,
        request.content,
        request.style,
        request.length_option,
    );

    let index = state.history.lock().await.push(record.clone());
    info!(
        "Saved history record #{index}: {:?}/{:?}, {} chars",
        record.recipient, record.category, record.length
    );

    Ok((StatusCode::CREATED, Json(IndexedRecord { index, record })))
}

/// DELETE /api/v1/history
pub async fn handle_clear_history(State(state): State<AppState>) -> StatusCode {
    let mut history = state.history.lock().await;
    let cleared = history.len();
    history.clear();
    info!("Cleared {cleared} history records");
    StatusCode::NO_CONTENT
}
