// Poem Generation Engine
// Implements: topic validation, prompt building, model selection, generation.
// All provider calls go through llm_client — no direct Gemini calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod selector;
