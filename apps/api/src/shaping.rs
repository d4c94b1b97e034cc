//! Bidirectional text shaping for flat-layout renderers.
//!
//! The souvenir PDF writer treats text as a flat left-to-right glyph run: it
//! performs neither contextual joining nor the Unicode bidirectional
//! algorithm. Logical-order Arabic fed to it comes out as disconnected,
//! reversed letterforms. `shape_for_flat_renderer` fixes both, per line:
//! first contextual joining (isolated codepoints → presentation forms), then
//! reordering runs into visual left-to-right storage order.
//!
//! NOT idempotent: shaping already-shaped text produces garbage. Shape at
//! most once, immediately before handing text to the PDF writer, and pass
//! untouched logical-order text to any renderer with native bidi support
//! (the web view shapes itself).

use ar_reshaper::ArabicReshaper;
use unicode_bidi::BidiInfo;

/// Converts logical-order text into the joined, visually-ordered form a
/// flat renderer can draw. Identity for text with no right-to-left runs.
pub fn shape_for_flat_renderer(text: &str) -> String {
    if !contains_rtl(text) {
        return text.to_string();
    }

    let reshaper = ArabicReshaper::default();
    let mut shaped_lines: Vec<String> = Vec::new();
    for line in text.lines() {
        let joined = reshaper.reshape(line);
        shaped_lines.push(reorder_visual(&joined));
    }
    shaped_lines.join("\n")
}

/// True when the text contains codepoints from the Arabic script blocks
/// (base letters, supplements, or presentation forms).
pub fn contains_rtl(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c,
            '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}')
    })
}

/// Runs the bidirectional algorithm over a single line and returns its
/// visual left-to-right ordering.
fn reorder_visual(line: &str) -> String {
    let bidi = BidiInfo::new(line, None);
    match bidi.paragraphs.first() {
        Some(paragraph) => bidi.reorder_line(paragraph, paragraph.range.clone()).into_owned(),
        None => line.to_string(),
    }
}
