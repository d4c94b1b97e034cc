//! Approximate text metrics for souvenir page layout.
//!
//! Character widths are in em units (relative to font size). The PDF writer
//! gives us no measurement API for its builtin faces, and exact glyph
//! metrics are overkill here: a static table catches real layout problems
//! (overflowing the border, off-center lines) while tolerating ±1–2% error,
//! which the 20 mm text inset absorbs.
//!
//! The table covers ASCII 0x20..=0x7E; everything else (the Arabic glyph
//! range in particular) falls back to an average width.

/// Millimetres per PostScript point.
const MM_PER_PT: f32 = 0.352_778;

/// Helvetica-class width table, index = `(char as usize) - 32`.
#[rustfmt::skip]
static WIDTHS: [f32; 95] = [
    // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
    0.28, 0.28, 0.35, 0.56, 0.56, 0.89, 0.67, 0.19, 0.33, 0.33, 0.39, 0.58, 0.28, 0.33, 0.28, 0.28,
    // 0     1     2     3     4     5     6     7     8     9
    0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
    // :     ;     <     =     >     ?     @
    0.28, 0.28, 0.58, 0.58, 0.58, 0.56, 1.01,
    // A     B     C     D     E     F     G     H     I     J     K     L     M
    0.67, 0.67, 0.72, 0.72, 0.67, 0.61, 0.78, 0.72, 0.28, 0.50, 0.67, 0.56, 0.83,
    // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
    0.72, 0.78, 0.67, 0.78, 0.72, 0.67, 0.61, 0.72, 0.67, 0.94, 0.67, 0.67, 0.61,
    // [     \     ]     ^     _     `
    0.28, 0.28, 0.28, 0.47, 0.56, 0.33,
    // a     b     c     d     e     f     g     h     i     j     k     l     m
    0.56, 0.56, 0.50, 0.56, 0.56, 0.28, 0.56, 0.56, 0.22, 0.22, 0.50, 0.22, 0.83,
    // n     o     p     q     r     s     t     u     v     w     x     y     z
    0.56, 0.56, 0.56, 0.56, 0.33, 0.50, 0.28, 0.56, 0.50, 0.72, 0.50, 0.50, 0.50,
    // {     |     }     ~
    0.33, 0.26, 0.33, 0.58,
];

/// Fallback width for non-ASCII codepoints. Arabic letterforms in Amiri
/// average a little under this; overestimating keeps lines inside the border.
const AVERAGE_NON_ASCII_EM: f32 = 0.55;

const SPACE_EM: f32 = 0.28;

/// Measures a string's rendered width in em units.
pub fn measure_em(text: &str) -> f32 {
    text.chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                WIDTHS[code - 32]
            } else {
                AVERAGE_NON_ASCII_EM
            }
        })
        .sum()
}

/// Measures a string's rendered width in millimetres at the given font size.
pub fn measure_mm(text: &str, font_size_pt: f32) -> f32 {
    measure_em(text) * font_size_pt * MM_PER_PT
}

/// Greedy word wrap at `max_width_mm`, preserving the poem's own line
/// breaks. Words longer than a full line are placed alone and allowed to
/// overhang rather than split mid-word.
pub fn wrap_lines(text: &str, font_size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut wrapped = Vec::new();

    for paragraph in text.lines() {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            // Blank stanza separator: keep the vertical gap.
            wrapped.push(String::new());
            continue;
        }

        let space_mm = SPACE_EM * font_size_pt * MM_PER_PT;
        let mut current = String::new();
        let mut current_mm = 0.0_f32;

        for word in words {
            let word_mm = measure_mm(word, font_size_pt);
            if !current.is_empty() && current_mm + space_mm + word_mm > max_width_mm {
                wrapped.push(std::mem::take(&mut current));
                current_mm = word_mm;
                current.push_str(word);
            } else {
                if !current.is_empty() {
                    current.push(' ');
                    current_mm += space_mm;
                }
                current.push_str(word);
                current_mm += word_mm;
            }
        }
        wrapped.push(current);
    }

    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_em_empty_is_zero() {
        assert_eq!(measure_em(""), 0.0);
    }

    #[test]
    fn test_measure_em_ascii() {
        // "Day" = D(0.72) + a(0.56) + y(0.50) = 1.78
        let width = measure_em("Day");
        assert!((width - 1.78).abs() < 1e-3, "Day should be ~1.78em, got {width}");
    }

    #[test]
    fn test_arabic_uses_average_fallback() {
        let width = measure_em("عز");
        assert!((width - 2.0 * AVERAGE_NON_ASCII_EM).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_preserves_poem_line_breaks() {
        let lines = wrap_lines("first verse\n\nsecond verse", 20.0, 170.0);
        assert_eq!(lines, vec!["first verse", "", "second verse"]);
    }

    #[test]
    fn test_wrap_splits_long_lines() {
        let long = "word ".repeat(40);
        let lines = wrap_lines(long.trim(), 25.0, 170.0);
        assert!(lines.len() > 1, "40 words at 25pt must wrap, got {lines:?}");
        for line in &lines {
            assert!(measure_mm(line, 25.0) <= 175.0, "wrapped line too wide: {line}");
        }
    }

    #[test]
    fn test_wrap_short_line_untouched() {
        let lines = wrap_lines("short", 25.0, 170.0);
        assert_eq!(lines, vec!["short"]);
    }
}
