//! Request-scoped value types for the poem pipeline.
//!
//! Nothing here has cross-request identity: every value is created for a
//! single submission and discarded after the response is built.

use serde::{Deserialize, Serialize};

/// The two languages the poem form offers.
///
/// `Arabic` drives right-to-left rendering on screen and shaped, right-aligned
/// text in the souvenir PDF; `English` renders left-to-right, centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    Arabic,
    English,
}

impl Language {
    /// CSS-style direction hint the UI host applies to the on-screen poem.
    pub fn direction(&self) -> &'static str {
        match self {
            Language::Arabic => "rtl",
            Language::English => "ltr",
        }
    }
}

/// A single form submission: free-text heritage keywords plus a language.
#[derive(Debug, Clone, Deserialize)]
pub struct PoemRequest {
    pub topic: String,
    pub language: Language,
}

/// The generated poem. Immutable once produced; souvenir and share actions
/// derive from it without re-entering generation.
#[derive(Debug, Clone, Serialize)]
pub struct PoemResult {
    pub text: String,
    pub language: Language,
}

/// One model identifier as reported by the provider's listing endpoint,
/// together with the generation methods it supports. Fetched per request,
/// never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    #[serde(rename = "supportedGenerationMethods", default)]
    pub capabilities: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_serializes_as_form_values() {
        assert_eq!(serde_json::to_string(&Language::Arabic).unwrap(), "\"Arabic\"");
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"English\"");
    }

    #[test]
    fn test_poem_request_deserializes_from_form_payload() {
        let request: PoemRequest =
            serde_json::from_str(r#"{"topic": "الدرعية", "language": "Arabic"}"#).unwrap();
        assert_eq!(request.topic, "الدرعية");
        assert_eq!(request.language, Language::Arabic);
    }

    #[test]
    fn test_model_descriptor_reads_provider_listing_shape() {
        let descriptor: ModelDescriptor = serde_json::from_str(
            r#"{"name": "models/gemini-1.5-flash",
                "supportedGenerationMethods": ["generateContent", "countTokens"]}"#,
        )
        .unwrap();
        assert_eq!(descriptor.name, "models/gemini-1.5-flash");
        assert!(descriptor.capabilities.iter().any(|c| c == "generateContent"));
    }

    #[test]
    fn test_direction_hints() {
        assert_eq!(Language::Arabic.direction(), "rtl");
        assert_eq!(Language::English.direction(), "ltr");
    }
}
