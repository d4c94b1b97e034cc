//! Typeface resources for souvenir rendering, loaded once at startup.

use tracing::{info, warn};

/// Holds the raw bytes of the Amiri TTF when the resource is present.
/// Absence is a supported, degraded state — the renderer falls back to the
/// builtin face instead of failing the request.
pub struct FontStore {
    amiri: Option<Vec<u8>>,
}

impl FontStore {
    /// Reads the Arabic typeface from disk. A missing or unreadable file is
    /// logged and tolerated.
    pub fn load(amiri_path: &str) -> Self {
        match std::fs::read(amiri_path) {
            Ok(bytes) => {
                info!("Loaded Amiri typeface from {amiri_path} ({} bytes)", bytes.len());
                Self { amiri: Some(bytes) }
            }
            Err(e) => {
                warn!("Amiri typeface unavailable at {amiri_path}: {e} — souvenir PDFs will degrade");
                Self { amiri: None }
            }
        }
    }

    /// A store with no typefaces. Exercises the renderer's fallback path.
    pub fn empty() -> Self {
        Self { amiri: None }
    }

    pub fn amiri(&self) -> Option<&[u8]> {
        self.amiri.as_deref()
    }
}
