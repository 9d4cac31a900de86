use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmBackend;
use crate::render::LayoutConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Every LLM call goes through here. Production: `LlmClient`.
    pub llm: Arc<dyn LlmBackend>,
    pub config: Config,
    /// Page geometry and fonts for PDF export. Defaults to US Letter, Helvetica.
    pub layout: LayoutConfig,
}
