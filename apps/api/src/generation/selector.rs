//! Model selection over the provider's already-fetched model listing.
//!
//! Pure selection, no I/O: the enumeration call that produces the listing is
//! the adapter's concern. Preference is expressed as a ranked list of name
//! markers supplied by configuration (e.g. `["flash", "pro"]`) so the
//! contract holds independent of any provider's naming scheme.

use tracing::debug;

use crate::errors::PoemError;
use crate::models::poem::ModelDescriptor;

/// The capability a model must advertise to be usable for poems.
const REQUIRED_CAPABILITY: &str = "generateContent";

/// Picks exactly one model name from the listing.
///
/// Rules, in order:
/// 1. Models without the `generateContent` capability are dropped.
/// 2. The first marker in `markers` that matches any surviving name wins;
///    among several matches, input position breaks the tie.
/// 3. With no marker match, the first surviving model wins.
///
/// Deterministic: the same listing and marker ranking always yields the same
/// choice. Fails with `NoModelAvailable` when nothing survives the filter.
pub fn select_model<'a>(
    models: &'a [ModelDescriptor],
    markers: &[String],
) -> Result<&'a str, PoemError> {
    let capable: Vec<&ModelDescriptor> = models
        .iter()
        .filter(|m| m.capabilities.iter().any(|c| c == REQUIRED_CAPABILITY))
        .collect();

    if capable.is_empty() {
        return Err(PoemError::NoModelAvailable);
    }

    for marker in markers {
        if let Some(found) = capable.iter().find(|m| m.name.contains(marker.as_str())) {
            debug!("Selected model {} via marker '{}'", found.name, marker);
            return Ok(&found.name);
        }
    }

    debug!("No preference marker matched; falling back to {}", capable[0].name);
    Ok(&capable[0].name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capable(name: &str) -> ModelDescriptor {
        ModelDescriptor {
            name: name.to_string(),
            capabilities: vec!["generateContent".to_string(), "countTokens".to_string()],
        }
    }

    fn incapable(name: &str) -> ModelDescriptor {
        ModelDescriptor {
            name: name.to_string(),
            capabilities: vec!["embedContent".to_string()],
        }
    }

    fn markers() -> Vec<String> {
        vec!["flash".to_string(), "pro".to_string()]
    }

    #[test]
    fn test_flash_marker_beats_position() {
        let models = vec![
            capable("gemini-1.5-pro"),
            capable("gemini-1.5-flash"),
            capable("gemini-2.0"),
        ];
        assert_eq!(select_model(&models, &markers()).unwrap(), "gemini-1.5-flash");
    }

    #[test]
    fn test_selection_is_order_independent_for_marker_match() {
        let forward = vec![
            capable("gemini-1.5-pro"),
            capable("gemini-1.5-flash"),
            capable("gemini-2.0"),
        ];
        let reversed = vec![
            capable("gemini-2.0"),
            capable("gemini-1.5-flash"),
            capable("gemini-1.5-pro"),
        ];
        assert_eq!(
            select_model(&forward, &markers()).unwrap(),
            select_model(&reversed, &markers()).unwrap()
        );
    }

    #[test]
    fn test_second_marker_used_when_first_absent() {
        let models = vec![capable("gemini-2.0"), capable("gemini-1.5-pro")];
        assert_eq!(select_model(&models, &markers()).unwrap(), "gemini-1.5-pro");
    }

    #[test]
    fn test_no_marker_match_falls_back_to_first() {
        let models = vec![capable("modelA"), capable("modelB")];
        assert_eq!(select_model(&models, &markers()).unwrap(), "modelA");
    }

    #[test]
    fn test_capability_filter_applied_before_preference() {
        // The flash model cannot generate content, so the pro model wins.
        let models = vec![incapable("gemini-1.5-flash"), capable("gemini-1.5-pro")];
        assert_eq!(select_model(&models, &markers()).unwrap(), "gemini-1.5-pro");
    }

    #[test]
    fn test_empty_filtered_list_is_no_model_available() {
        let models = vec![incapable("text-embedding-004")];
        assert!(matches!(
            select_model(&models, &markers()),
            Err(PoemError::NoModelAvailable)
        ));
    }

    #[test]
    fn test_empty_listing_is_no_model_available() {
        assert!(matches!(
            select_model(&[], &markers()),
            Err(PoemError::NoModelAvailable)
        ));
    }

    #[test]
    fn test_same_input_same_choice() {
        let models = vec![capable("gemini-1.5-flash-8b"), capable("gemini-1.5-flash")];
        let first = select_model(&models, &markers()).unwrap().to_string();
        for _ in 0..3 {
            assert_eq!(select_model(&models, &markers()).unwrap(), first);
        }
    }
}
