//! Souvenir Encoder — renders the poem into a single-page decorative PDF.
//!
//! Page template (A4): a rectangular border inset 10 mm from every edge,
//! poem block centered vertically inside it. Arabic text is shaped (joined +
//! visually reordered) and right-aligned; English is centered.
//!
//! This boundary never raises. A missing Amiri typeface degrades to the
//! builtin face — English keeps a safe ASCII rendition, Arabic gets a short
//! redirect line — and the document is flagged degraded instead of failing.
//! The screen render is independent of anything that happens here.

pub mod fonts;
pub mod handlers;
pub mod metrics;

pub use fonts::FontStore;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};
use tracing::{error, warn};

use crate::models::poem::Language;
use crate::shaping::shape_for_flat_renderer;
use crate::souvenir::metrics::{measure_mm, wrap_lines};

pub const SOUVENIR_FILENAME: &str = "Foundation_Day_Poem.pdf";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
/// Border inset from each page edge.
const BORDER_INSET_MM: f32 = 10.0;
/// Text block insets, clear of the border.
const TEXT_LEFT_MM: f32 = 20.0;
const TEXT_RIGHT_MM: f32 = 190.0;
const LINE_HEIGHT_MM: f32 = 15.0;
/// Lines that fit between the border's top and bottom clearances.
const MAX_LINES: usize = 16;

const POEM_FONT_PT: f32 = 25.0;
const FALLBACK_FONT_PT: f32 = 20.0;

/// Dark-brown border color from the page template.
const BORDER_RGB: (f32, f32, f32) = (0.243, 0.153, 0.137);

/// The rendered artifact plus whether the fallback path produced it.
pub struct SouvenirDocument {
    pub bytes: Vec<u8>,
    pub degraded: bool,
}

/// Renders the souvenir document. Never errors out of this boundary: on any
/// internal failure it downgrades to a minimal fallback page.
pub fn render_souvenir(poem: &str, language: Language, fonts: &FontStore) -> SouvenirDocument {
    match try_render(poem, language, fonts) {
        Ok(document) => document,
        Err(e) => {
            warn!("Souvenir render failed ({e}); producing fallback page");
            match render_fallback_page() {
                Ok(bytes) => SouvenirDocument {
                    bytes,
                    degraded: true,
                },
                Err(e) => {
                    // Builtin-font-only rendering has no failure modes left;
                    // log and hand back an empty artifact rather than panic.
                    error!("Fallback souvenir render failed: {e}");
                    SouvenirDocument {
                        bytes: Vec::new(),
                        degraded: true,
                    }
                }
            }
        }
    }
}

fn try_render(
    poem: &str,
    language: Language,
    fonts: &FontStore,
) -> Result<SouvenirDocument, printpdf::Error> {
    let (doc, page_index, layer_index) =
        PdfDocument::new("Foundation Day Poem", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "poem");
    let layer = doc.get_page(page_index).get_layer(layer_index);

    draw_border(&layer);

    // A present-but-unparsable font file degrades the same way as an absent one.
    let amiri: Option<IndirectFontRef> = match fonts.amiri() {
        Some(bytes) => match doc.add_external_font(bytes) {
            Ok(font) => Some(font),
            Err(e) => {
                warn!("Amiri typeface could not be embedded: {e}");
                None
            }
        },
        None => None,
    };

    let degraded = amiri.is_none();

    match (amiri, language) {
        (Some(font), _) => {
            draw_poem(&layer, poem, language, &font, POEM_FONT_PT);
        }
        (None, Language::English) => {
            let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
            draw_poem(&layer, &latin_safe_subset(poem), language, &font, FALLBACK_FONT_PT);
        }
        (None, Language::Arabic) => {
            // The builtin face cannot draw Arabic at all; a redirect line is
            // the honest fallback.
            let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
            let apology = "The Arabic typeface is unavailable on this server.\n\
                           Please enjoy your poem on screen, or scan the share code to revisit it.";
            draw_poem(&layer, apology, Language::English, &font, FALLBACK_FONT_PT);
        }
    }

    let bytes = doc.save_to_bytes()?;
    Ok(SouvenirDocument { bytes, degraded })
}

/// Draws the decorative rectangle inset `BORDER_INSET_MM` from each edge.
fn draw_border(layer: &PdfLayerReference) {
    let (r, g, b) = BORDER_RGB;
    layer.set_outline_color(Color::Rgb(Rgb::new(r, g, b, None)));
    layer.set_outline_thickness(2.0);

    let corners = [
        (BORDER_INSET_MM, BORDER_INSET_MM),
        (PAGE_WIDTH_MM - BORDER_INSET_MM, BORDER_INSET_MM),
        (PAGE_WIDTH_MM - BORDER_INSET_MM, PAGE_HEIGHT_MM - BORDER_INSET_MM),
        (BORDER_INSET_MM, PAGE_HEIGHT_MM - BORDER_INSET_MM),
    ];
    let border = Line {
        points: corners
            .iter()
            .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
            .collect(),
        is_closed: true,
    };
    layer.add_line(border);
}

/// Word-wraps, shapes (Arabic only), aligns, and places the poem block,
/// centered vertically between the border clearances.
fn draw_poem(
    layer: &PdfLayerReference,
    text: &str,
    language: Language,
    font: &IndirectFontRef,
    font_size_pt: f32,
) {
    let max_width_mm = TEXT_RIGHT_MM - TEXT_LEFT_MM;
    let mut lines = wrap_lines(text, font_size_pt, max_width_mm);

    if lines.len() > MAX_LINES {
        warn!(
            "Poem spans {} wrapped lines; truncating to {MAX_LINES} to stay on one page",
            lines.len()
        );
        lines.truncate(MAX_LINES);
    }

    // Shape AFTER wrapping: wrapping operates on logical order, the renderer
    // needs visual order. Each line is shaped exactly once.
    if language == Language::Arabic {
        for line in &mut lines {
            *line = shape_for_flat_renderer(line);
        }
    }

    let block_mm = lines.len() as f32 * LINE_HEIGHT_MM;
    let mut baseline_mm = (PAGE_HEIGHT_MM + block_mm) / 2.0 - LINE_HEIGHT_MM * 0.75;

    for line in &lines {
        if !line.is_empty() {
            let width_mm = measure_mm(line, font_size_pt);
            let x_mm = match language {
                Language::Arabic => TEXT_RIGHT_MM - width_mm,
                Language::English => (PAGE_WIDTH_MM - width_mm) / 2.0,
            }
            .max(TEXT_LEFT_MM);
            layer.use_text(line.as_str(), font_size_pt, Mm(x_mm), Mm(baseline_mm), font);
        }
        baseline_mm -= LINE_HEIGHT_MM;
    }
}

/// Minimal page for the last-resort path: border plus one redirect line.
fn render_fallback_page() -> Result<Vec<u8>, printpdf::Error> {
    let (doc, page_index, layer_index) =
        PdfDocument::new("Foundation Day Poem", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "poem");
    let layer = doc.get_page(page_index).get_layer(layer_index);
    draw_border(&layer);

    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let line = "Your poem could not be printed. It is still available on screen.";
    let x_mm = ((PAGE_WIDTH_MM - measure_mm(line, FALLBACK_FONT_PT)) / 2.0)
        .max(TEXT_LEFT_MM);
    layer.use_text(line, FALLBACK_FONT_PT, Mm(x_mm), Mm(PAGE_HEIGHT_MM / 2.0), &font);

    doc.save_to_bytes()
}

/// Replaces anything outside printable ASCII with `?` so the builtin
/// WinAnsi-encoded face can draw it.
fn latin_safe_subset(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_graphic() || c == ' ' || c == '\n' {
                c
            } else {
                '?'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_render_has_pdf_signature() {
        let document = render_souvenir(
            "A poem of palms and pride,\nwritten for Foundation Day.",
            Language::English,
            &FontStore::empty(),
        );
        assert!(!document.bytes.is_empty());
        assert!(document.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_arabic_without_typeface_still_returns_document() {
        // The fallback path must produce non-empty bytes, never raise.
        let document = render_souvenir("يا دار مجدٍ تليد", Language::Arabic, &FontStore::empty());
        assert!(!document.bytes.is_empty());
        assert!(document.bytes.starts_with(b"%PDF"));
        assert!(document.degraded);
    }

    #[test]
    fn test_missing_typeface_marks_degraded_for_english_too() {
        let document = render_souvenir("Short poem", Language::English, &FontStore::empty());
        assert!(document.degraded);
    }

    #[test]
    fn test_very_long_poem_stays_single_page() {
        let long_poem = "A line of verse that goes on and on\n".repeat(60);
        let document = render_souvenir(&long_poem, Language::English, &FontStore::empty());
        assert!(document.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_latin_safe_subset_replaces_non_ascii() {
        assert_eq!(latin_safe_subset("café — عز"), "caf? ? ??");
    }

    #[test]
    fn test_fallback_page_renders() {
        let bytes = render_fallback_page().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
