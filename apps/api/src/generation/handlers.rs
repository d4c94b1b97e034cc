//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::PoemError;
use crate::generation::generator::generate_poem;
use crate::models::poem::{Language, PoemRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PoemResponse {
    pub text: String,
    pub language: Language,
    /// Direction hint for the on-screen render ("rtl" or "ltr").
    pub direction: &'static str,
}

/// POST /api/v1/poems
///
/// One form submission → one generated poem. Without a configured provider
/// credential this returns `ConfigMissing` — the process keeps serving.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<PoemRequest>,
) -> Result<Json<PoemResponse>, PoemError> {
    let generator = state.llm.as_deref().ok_or(PoemError::ConfigMissing)?;

    let result = generate_poem(generator, &state.config.model_preferences, request).await?;

    Ok(Json(PoemResponse {
        direction: result.language.direction(),
        text: result.text,
        language: result.language,
    }))
}
