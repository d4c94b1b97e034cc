//! Prompt construction for poem generation.
//!
//! `build_prompt` is a pure function over the submitted topic and language.
//! The topic is never mutated in place; control characters (other than
//! standard whitespace) are stripped so the instruction is a clean single
//! string, and an empty or whitespace-only topic is rejected before any
//! provider traffic happens.

use crate::errors::PoemError;
use crate::models::poem::Language;

/// System-level style guidance sent alongside every instruction.
pub const POEM_SYSTEM: &str = "You are a celebrated poet commissioned for Saudi Foundation Day. \
    Respond with the poem text only. \
    Do NOT include titles, commentary, or explanations. \
    Match the language of the instruction exactly.";

/// Arabic instruction template. Replace `{topic}` before sending.
/// Classical register, national-heritage theme.
const ARABIC_PROMPT_TEMPLATE: &str =
    "نظم قصيدة فصيحة مذهلة ومؤثرة تلامس الروح عن {topic} بمناسبة يوم التأسيس.";

/// English instruction template. Replace `{topic}` before sending.
const ENGLISH_PROMPT_TEMPLATE: &str =
    "Write an amazing, soul-touching, and elegant English poem about {topic} for Saudi Foundation Day.";

/// Builds the exact instruction string sent to the generator.
///
/// Fails with `InvalidInput` when the topic is empty or whitespace-only.
pub fn build_prompt(topic: &str, language: Language) -> Result<String, PoemError> {
    let cleaned = sanitize_topic(topic);
    if cleaned.is_empty() {
        return Err(PoemError::InvalidInput(
            "Topic cannot be empty. Enter one or more heritage keywords.".to_string(),
        ));
    }

    let template = match language {
        Language::Arabic => ARABIC_PROMPT_TEMPLATE,
        Language::English => ENGLISH_PROMPT_TEMPLATE,
    };

    Ok(template.replace("{topic}", &cleaned))
}

/// Trims the topic and drops control characters that are not standard
/// whitespace, so the instruction carries none.
fn sanitize_topic(topic: &str) -> String {
    topic
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}
