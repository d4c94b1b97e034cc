use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type covering the whole request pipeline.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, PoemError>`.
///
/// Every external-call failure is classified at the boundary of the component
/// that made the call; raw provider errors never reach the UI host.
#[derive(Debug, Error)]
pub enum PoemError {
    #[error("Generator credential is not configured")]
    ConfigMissing,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No generation-capable model is available")]
    NoModelAvailable,

    #[error("Provider rate limit reached")]
    RateLimited,

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("Share token is corrupt")]
    CorruptToken,

    #[error("{0}")]
    Unknown(String),
}

impl IntoResponse for PoemError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            PoemError::ConfigMissing => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CONFIG_MISSING",
                "The poetry generator is not configured. Add GEMINI_API_KEY and restart."
                    .to_string(),
            ),
            PoemError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone()),
            PoemError::NoModelAvailable => (
                StatusCode::BAD_GATEWAY,
                "NO_MODEL_AVAILABLE",
                "The provider reported no model capable of generating poems".to_string(),
            ),
            // Rate limiting gets its own user-facing message, distinct from
            // generic provider failure: advise a short wait.
            PoemError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                "The poetry service is busy right now. Please wait a moment and try again."
                    .to_string(),
            ),
            PoemError::ProviderUnavailable(msg) => {
                tracing::error!("Provider unavailable: {msg}");
                (StatusCode::BAD_GATEWAY, "PROVIDER_UNAVAILABLE", msg.clone())
            }
            PoemError::EmptyResponse => (
                StatusCode::BAD_GATEWAY,
                "EMPTY_RESPONSE",
                "The model returned no text. Try different keywords.".to_string(),
            ),
            PoemError::CorruptToken => (
                StatusCode::BAD_REQUEST,
                "CORRUPT_TOKEN",
                "The share token could not be decoded".to_string(),
            ),
            PoemError::Unknown(msg) => {
                tracing::error!("Unclassified generation error: {msg}");
                // Surfaced verbatim so the UI host can show the provider's
                // own diagnostics for anything we could not classify.
                (StatusCode::INTERNAL_SERVER_ERROR, "UNKNOWN", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_maps_to_429() {
        let response = PoemError::RateLimited.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_corrupt_token_maps_to_400() {
        let response = PoemError::CorruptToken.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_config_missing_maps_to_503() {
        let response = PoemError::ConfigMissing.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_rate_limited_body_hides_raw_provider_error() {
        // The user-facing message advises a short wait; the provider's own
        // throttling text never appears.
        let response = PoemError::RateLimited.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let message = json["error"]["message"].as_str().unwrap();
        assert!(message.contains("wait"));
        assert_eq!(json["error"]["code"], "RATE_LIMITED");
    }

    #[test]
    fn test_unknown_preserves_provider_message() {
        let err = PoemError::Unknown("provider said: quota exceeded for project".to_string());
        assert_eq!(err.to_string(), "provider said: quota exceeded for project");
    }
}
