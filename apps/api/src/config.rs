use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The provider credential is deliberately optional: a missing key must
/// surface as a visible degraded state (health flag + `ConfigMissing` on
/// generation attempts), never terminate the process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key. `None` means the service runs without a generator.
    pub gemini_api_key: Option<String>,
    /// Public base URL embedded in share links and QR payloads.
    pub app_base_url: String,
    /// Ranked model-name markers, most preferred first. The selector walks
    /// these instead of hardcoding provider naming conventions.
    pub model_preferences: Vec<String>,
    /// Path to the Amiri TTF used for Arabic souvenir rendering.
    pub amiri_font_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let model_preferences = std::env::var("MODEL_PREFERENCES")
            .unwrap_or_else(|_| "flash,pro".to_string())
            .split(',')
            .map(|marker| marker.trim().to_string())
            .filter(|marker| !marker.is_empty())
            .collect();

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            app_base_url: std::env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            model_preferences,
            amiri_font_path: std::env::var("AMIRI_FONT_PATH")
                .unwrap_or_else(|_| "assets/fonts/Amiri-Regular.ttf".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
