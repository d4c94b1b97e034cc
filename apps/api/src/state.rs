use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::souvenir::FontStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generation seam. `None` when GEMINI_API_KEY is absent — the service
    /// still runs and reports the degraded state instead of terminating.
    pub llm: Option<Arc<dyn TextGenerator>>,
    pub config: Config,
    /// Typeface resources loaded once at startup; read-only afterwards.
    pub fonts: Arc<FontStore>,
}
