use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a status object with the service version and whether a generator
/// credential is configured. A `false` flag is the UI host's cue to show the
/// missing-credential banner.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "qasida-api",
        "generator_configured": state.llm.is_some()
    }))
}
