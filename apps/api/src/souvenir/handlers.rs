//! Axum route handlers for the souvenir download.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::errors::PoemError;
use crate::models::poem::Language;
use crate::souvenir::{render_souvenir, SOUVENIR_FILENAME};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SouvenirRequest {
    pub text: String,
    pub language: Language,
}

/// POST /api/v1/poems/souvenir
///
/// Renders the downloadable PDF for an already-generated poem. Idempotent and
/// independent of generation: re-invoking never re-enters the provider.
/// Degraded rendering is flagged via the `X-Render-Fallback` header, not an
/// error — the caller always gets a usable document.
pub async fn handle_souvenir(
    State(state): State<AppState>,
    Json(request): Json<SouvenirRequest>,
) -> Result<impl IntoResponse, PoemError> {
    if request.text.trim().is_empty() {
        return Err(PoemError::InvalidInput(
            "Poem text cannot be empty".to_string(),
        ));
    }

    let document = render_souvenir(&request.text, request.language, &state.fonts);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{SOUVENIR_FILENAME}\""))
            .map_err(|e| PoemError::Unknown(e.to_string()))?,
    );
    if document.degraded {
        headers.insert("x-render-fallback", HeaderValue::from_static("true"));
    }

    Ok((headers, Bytes::from(document.bytes)))
}
