//! Poem generation — orchestrates the whole pipeline.
//!
//! Flow: validate topic → build prompt → list models → select model →
//!       one generation call → PoemResult.
//!
//! The result is request-scoped: souvenir and share actions derive from it
//! later without re-entering this pipeline.

use tracing::info;

use crate::errors::PoemError;
use crate::generation::prompts::{build_prompt, POEM_SYSTEM};
use crate::generation::selector::select_model;
use crate::llm_client::TextGenerator;
use crate::models::poem::{PoemRequest, PoemResult};

/// Runs the full generation pipeline.
///
/// Steps:
/// 1. build_prompt() — rejects empty topics before any provider traffic
/// 2. list_models() — one listing call
/// 3. select_model() — pure ranked-marker choice
/// 4. generate() — exactly one generation call, classified on failure
pub async fn generate_poem(
    generator: &dyn TextGenerator,
    markers: &[String],
    request: PoemRequest,
) -> Result<PoemResult, PoemError> {
    let instruction = build_prompt(&request.topic, request.language)?;

    let models = generator.list_models().await?;
    let model = select_model(&models, markers)?.to_string();
    info!("Generating {:?} poem with model {}", request.language, model);

    let raw = generator.generate(&model, &instruction, POEM_SYSTEM).await?;

    let text = raw.trim().to_string();
    if text.is_empty() {
        return Err(PoemError::EmptyResponse);
    }

    info!("Generation succeeded ({} chars)", text.chars().count());
    Ok(PoemResult {
        text,
        language: request.language,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
