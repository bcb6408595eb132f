pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::history::handlers as history;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form schema
        .route("/api/v1/options", get(generation::handle_options))
        .route("/api/v1/samples", get(generation::handle_sample))
        // Generation
        .route(
            "/api/v1/messages/generate",
            post(generation::handle_generate),
        )
        .route("/api/v1/messages/batch", post(generation::handle_batch))
        .route(
            "/api/v1/messages/batch/export",
            post(generation::handle_batch_export),
        )
        // Session history
        .route(
            "/api/v1/history",
            get(history::handle_list_history)
                .post(history::handle_save_history)
                .delete(history::handle_clear_history),
        )
        .with_state(state)
}
