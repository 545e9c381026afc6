use std::sync::Arc;

use crate::config::Config;
use crate::interview::store::SessionStore;
use crate::llm_client::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one model client every handler and session shares.
    pub llm: Arc<dyn LanguageModel>,
    pub config: Config,
    /// Live practice sessions. In memory only.
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(llm: Arc<dyn LanguageModel>, config: Config) -> Self {
        let sessions = SessionStore::new(llm.clone(), config.question_count)
            .with_idle_ttl(config.session_idle_ttl);
        Self {
            llm,
            config,
            sessions,
        }
    }
}
