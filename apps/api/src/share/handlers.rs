//! Axum route handlers for sharing and the guest view.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::PoemError;
use crate::share::codec::{decode_token, encode_token, share_url};
use crate::share::qr::encode_qr_png;
use crate::state::AppState;

/// Caption the UI host shows under the QR image.
const QR_CAPTION: &str = "Scan to share!";

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub token: String,
    pub share_url: String,
    pub caption: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct GuestQuery {
    pub poem: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QrQuery {
    pub token: String,
}

/// POST /api/v1/poems/share
///
/// Produces the self-contained share token and URL for a generated poem.
/// Idempotent: the same text always yields the same token.
pub async fn handle_share(
    State(state): State<AppState>,
    Json(request): Json<ShareRequest>,
) -> Result<Json<ShareResponse>, PoemError> {
    if request.text.trim().is_empty() {
        return Err(PoemError::InvalidInput(
            "Poem text cannot be empty".to_string(),
        ));
    }

    let token = encode_token(&request.text);
    Ok(Json(ShareResponse {
        share_url: share_url(&state.config.app_base_url, &token),
        token,
        caption: QR_CAPTION,
    }))
}

/// GET /api/v1/poems/share/qr?token=...
///
/// Renders the QR image for a token's share URL. The QR encodes the full
/// share link, so a scanner lands directly on the guest view.
pub async fn handle_share_qr(
    State(state): State<AppState>,
    Query(query): Query<QrQuery>,
) -> Result<impl IntoResponse, PoemError> {
    // Reject garbage before handing it to a scanner.
    decode_token(&query.token)?;

    let png = encode_qr_png(&share_url(&state.config.app_base_url, &query.token))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    Ok((headers, Bytes::from(png)))
}

/// GET /?poem=<token>
///
/// The one-way guest-view branch: a decodable token fully replaces the form
/// for that load. A corrupt token is attacker-reachable query input, so it
/// silently resets to the main form instead of surfacing an error.
pub async fn handle_root(Query(query): Query<GuestQuery>) -> Json<Value> {
    if let Some(token) = query.poem.as_deref() {
        match decode_token(token) {
            Ok(text) => {
                return Json(json!({
                    "view": "guest",
                    "poem": { "text": text }
                }));
            }
            Err(_) => {
                warn!("Discarding corrupt share token on guest view");
            }
        }
    }
    Json(json!({ "view": "form" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guest_view_with_valid_token() {
        let token = encode_token("يا دار مجدٍ تليد");
        let response = handle_root(Query(GuestQuery { poem: Some(token) })).await;
        assert_eq!(response.0["view"], "guest");
        assert_eq!(response.0["poem"]["text"], "يا دار مجدٍ تليد");
    }

    #[tokio::test]
    async fn test_guest_view_with_corrupt_token_resets_to_form() {
        let response = handle_root(Query(GuestQuery {
            poem: Some("%%garbage%%".to_string()),
        }))
        .await;
        assert_eq!(response.0["view"], "form");
        assert!(response.0.get("poem").is_none());
    }

    #[tokio::test]
    async fn test_root_without_token_shows_form() {
        let response = handle_root(Query(GuestQuery { poem: None })).await;
        assert_eq!(response.0["view"], "form");
    }
}
