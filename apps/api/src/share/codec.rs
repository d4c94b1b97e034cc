//! Share-Link Codec — invertible, URL-safe encoding of the poem text.
//!
//! `decode_token(encode_token(x)) == x` for all valid UTF-8 `x`. Tokens are
//! attacker-reachable (arbitrary query-string input), so decoding classifies
//! every malformed input as `CorruptToken` and never panics.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::errors::PoemError;

/// Serializes poem text into a URL-safe token.
pub fn encode_token(text: &str) -> String {
    URL_SAFE_NO_PAD.encode(text.as_bytes())
}

/// Recovers poem text from a token. Malformed base64 or a non-UTF-8 payload
/// is `CorruptToken`; callers on the guest-view path treat that as "no poem
/// attached" rather than an error screen.
pub fn decode_token(token: &str) -> Result<String, PoemError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.as_bytes())
        .map_err(|_| PoemError::CorruptToken)?;
    String::from_utf8(bytes).map_err(|_| PoemError::CorruptToken)
}

/// The shareable URL for a token: `<base-url>/?poem=<token>`.
pub fn share_url(base_url: &str, token: &str) -> String {
    format!("{}/?poem={token}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_english() {
        let poem = "A poem of palms and pride,\nwritten for Foundation Day.";
        assert_eq!(decode_token(&encode_token(poem)).unwrap(), poem);
    }

    #[test]
    fn test_round_trip_arabic() {
        let poem = "يا موطن العز والتاريخ يا وطني\nفيك القصيد على الأمجاد ينهمر";
        assert_eq!(decode_token(&encode_token(poem)).unwrap(), poem);
    }

    #[test]
    fn test_round_trip_mixed_and_emoji() {
        let poem = "عز & pride 🇸🇦 — 1727";
        assert_eq!(decode_token(&encode_token(poem)).unwrap(), poem);
    }

    #[test]
    fn test_round_trip_empty_string() {
        assert_eq!(decode_token(&encode_token("")).unwrap(), "");
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = encode_token("نظم قصيدة عن العز والفخر؟ نعم!");
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_non_base64_token_is_corrupt() {
        assert!(matches!(
            decode_token("not!!valid%%token"),
            Err(PoemError::CorruptToken)
        ));
    }

    #[test]
    fn test_truncated_token_is_corrupt() {
        let token = encode_token("يا دار مجدٍ تليد");
        let truncated = &token[..token.len() - 1];
        // Dropping one character either breaks base64 framing or corrupts the
        // trailing UTF-8 sequence; both classify as CorruptToken.
        assert!(matches!(
            decode_token(truncated),
            Err(PoemError::CorruptToken)
        ));
    }

    #[test]
    fn test_valid_base64_of_invalid_utf8_is_corrupt() {
        let token = URL_SAFE_NO_PAD.encode([0xFF, 0xFE, 0xFD]);
        assert!(matches!(decode_token(&token), Err(PoemError::CorruptToken)));
    }

    #[test]
    fn test_share_url_shape() {
        assert_eq!(
            share_url("https://poem.example.com/", "QUJD"),
            "https://poem.example.com/?poem=QUJD"
        );
    }
}
