use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::generation::tables::PromptTables;
use crate::history::store::History;
use crate::llm_client::CompletionBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. Default: `LlmClient` against the configured endpoint.
    pub llm: Arc<dyn CompletionBackend>,
    /// Guidance tables, fixed for the process lifetime.
    pub tables: Arc<PromptTables>,
    /// The single in-process session history.
    pub history: Arc<Mutex<History>>,
    pub config: Config,
}

impl AppState {
    pub fn new(llm: Arc<dyn CompletionBackend>, tables: PromptTables, config: Config) -> Self {
        Self {
            llm,
            tables: Arc::new(tables),
            history: Arc::new(Mutex::new(History::new())),
            config,
        }
    }
}
