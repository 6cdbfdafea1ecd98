//! Response body decoding.
//!
//! The static stage receives raw bytes. The charset comes from the
//! `Content-Type` response header when it names one, otherwise from a
//! charset declaration in the head of the markup, otherwise UTF-8.
//! Undecodable sequences become U+FFFD; decoding never fails.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Bytes of markup inspected for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// `charset=...` parameter of a `Content-Type` header value
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"';\s]+)"#).expect("valid regex")
});

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>]+)"#).expect("valid regex")
});

/// `<meta http-equiv="Content-Type" content="...; charset=...">`
#[allow(clippy::expect_used)]
static META_CONTENT_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Decode a response body to a UTF-8 string.
///
/// # Examples
///
/// ```
/// use universal_scraper::encoding::decode_body;
///
/// let body = b"<html><body>Caf\xE9</body></html>";
/// let text = decode_body(body, Some("text/html; charset=ISO-8859-1"));
/// assert!(text.contains("Café"));
/// ```
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_from_header)
        .or_else(|| charset_from_markup(body))
        .unwrap_or(UTF_8);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(body).into_owned();
    }

    let (decoded, _used, _had_errors) = encoding.decode(body);
    decoded.into_owned()
}

/// Encoding named by a `Content-Type` header, if it names a known one.
#[must_use]
pub fn charset_from_header(content_type: &str) -> Option<&'static Encoding> {
    HEADER_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Encoding declared in the first bytes of the markup, if any.
#[must_use]
pub fn charset_from_markup(body: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&body[..body.len().min(SNIFF_LEN)]);

    [&*META_CHARSET_RE, &*META_CONTENT_TYPE_RE]
        .into_iter()
        .filter_map(|re| re.captures(&head).and_then(|c| c.get(1)))
        .find_map(|m| Encoding::for_label(m.as_str().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_charset_wins_over_meta() {
        let body = b"<html><head><meta charset=\"utf-8\"></head><body>\x93Hi\x94</body></html>";
        let text = decode_body(body, Some("text/html; charset=windows-1252"));
        assert!(text.contains("\u{201C}Hi\u{201D}"));
    }

    #[test]
    fn test_meta_charset_used_without_header_charset() {
        let body = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
        let text = decode_body(body, Some("text/html"));
        assert!(text.contains("Café"));
    }

    #[test]
    fn test_http_equiv_declaration_detected() {
        let body = br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        // encoding_rs maps ISO-8859-1 to windows-1252 per WHATWG
        assert_eq!(charset_from_markup(body).map(Encoding::name), Some("windows-1252"));
    }

    #[test]
    fn test_unknown_header_label_falls_through() {
        assert!(charset_from_header("text/html; charset=klingon").is_none());
        assert_eq!(
            charset_from_header("text/html; Charset=\"UTF-8\"").map(Encoding::name),
            Some("UTF-8")
        );
    }

    #[test]
    fn test_defaults_to_utf8_and_replaces_invalid_bytes() {
        let body = b"<html><body>Test \xFF\xFE Invalid</body></html>";
        let text = decode_body(body, None);
        assert!(text.contains("Test"));
        assert!(text.contains('\u{FFFD}'));
        assert!(text.contains("Invalid"));
    }
}
