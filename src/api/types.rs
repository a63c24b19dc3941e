//! Shared per-request context for endpoint handlers.

use std::sync::Arc;

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::config::AppConfig;
use crate::db::open_database;
use crate::triage::client::{HttpInferenceClient, LlmClient};

/// Handler context: configuration plus the inference client. There is no
/// shared database handle: each request opens its own connection and
/// the engine owns the locking.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<AppConfig>,
    pub llm: Arc<dyn LlmClient>,
}

impl ApiContext {
    pub fn new(config: AppConfig) -> Self {
        let llm = Arc::new(HttpInferenceClient::new(&config));
        Self {
            config: Arc::new(config),
            llm,
        }
    }

    /// Context with an injected oracle (tests).
    pub fn with_llm(config: AppConfig, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            config: Arc::new(config),
            llm,
        }
    }

    /// Open a connection to the configured database.
    pub fn connection(&self) -> Result<Connection, ApiError> {
        open_database(&self.config.database_path).map_err(ApiError::from)
    }
}
