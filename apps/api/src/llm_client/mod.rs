//! LLM Client — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the provider directly.
//! All generation and model-listing traffic MUST go through this module.
//!
//! The adapter makes exactly ONE outbound call per invocation: no internal
//! retry, no caching, no timeout override beyond the client default. Hidden
//! retries would silently multiply billed generation calls, so failures are
//! classified and returned instead of retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::PoemError;
use crate::models::poem::ModelDescriptor;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Seam between the pipeline and the provider. Handlers hold this as a trait
/// object so tests can substitute a fake generator with a fake credential.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Lists the models the provider currently offers, with capabilities.
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, PoemError>;

    /// Sends one instruction to one model and returns the raw poem text.
    /// Exactly one outbound call; an empty reply is `EmptyResponse`.
    async fn generate(
        &self,
        model: &str,
        instruction: &str,
        system: &str,
    ) -> Result<String, PoemError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: ContentPart<'a>,
    contents: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentPart<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate, if any.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let joined: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelDescriptor>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Concrete Gemini adapter. The credential is injected at construction —
/// never read from ambient process state.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GEMINI_API_URL.to_string())
    }

    /// Constructor with an overridable endpoint, used to point the adapter
    /// at a local stub server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// `models/gemini-1.5-flash` and `gemini-1.5-flash` are both accepted by
    /// the selector; the URL always needs the prefixed form.
    fn model_path(&self, model: &str) -> String {
        if model.starts_with("models/") {
            format!("{}/{model}", self.base_url)
        } else {
            format!("{}/models/{model}", self.base_url)
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, PoemError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| PoemError::ProviderUnavailable(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, body));
        }

        let listing: ListModelsResponse = response
            .json()
            .await
            .map_err(|e| PoemError::Unknown(format!("Malformed model listing: {e}")))?;

        debug!("Provider listed {} models", listing.models.len());
        Ok(listing.models)
    }

    async fn generate(
        &self,
        model: &str,
        instruction: &str,
        system: &str,
    ) -> Result<String, PoemError> {
        let request_body = GenerateContentRequest {
            system_instruction: ContentPart {
                parts: vec![TextPart { text: system }],
            },
            contents: vec![ContentPart {
                parts: vec![TextPart { text: instruction }],
            }],
        };

        let response = self
            .client
            .post(format!("{}:generateContent", self.model_path(model)))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| PoemError::ProviderUnavailable(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, body));
        }

        let generated: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| PoemError::Unknown(format!("Malformed generation response: {e}")))?;

        // A successful call with no text is surfaced distinctly, not treated
        // as success.
        generated.text().ok_or(PoemError::EmptyResponse)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Failure classification
// ────────────────────────────────────────────────────────────────────────────

/// Maps a non-2xx provider response to the error taxonomy:
/// 429 → `RateLimited`, 5xx → `ProviderUnavailable`, anything else →
/// `Unknown` carrying the provider's message verbatim.
pub(crate) fn classify_failure(status: u16, body: String) -> PoemError {
    // Prefer the structured message when the body parses as a provider error.
    let message = serde_json::from_str::<ProviderError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    match status {
        429 => PoemError::RateLimited,
        500..=599 => PoemError::ProviderUnavailable(message),
        _ => PoemError::Unknown(message),
    }
}
