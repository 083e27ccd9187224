//! Charset detection and decoding for fetched pages.
//!
//! Listing pages are overwhelmingly UTF-8, but the decode path still honors
//! the Content-Type header, an in-document `<meta>` declaration, and finally
//! a heuristic guess, in that order.

use std::sync::LazyLock;

use encoding_rs::Encoding;
use regex::Regex;

use crate::fetcher::errors::FetchError;

static HEADER_CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

/// How far into the body we look for a `<meta>` charset declaration.
const SNIFF_WINDOW: usize = 4096;

pub fn decode_body(content_type: &str, body: &[u8]) -> Result<String, FetchError> {
    let encoding = detect_encoding(content_type, body);
    let (decoded, _, had_errors) = encoding.decode(body);
    if had_errors {
        return Err(FetchError::Charset(format!(
            "body is not valid {}",
            encoding.name()
        )));
    }
    Ok(decoded.into_owned())
}

fn detect_encoding(content_type: &str, body: &[u8]) -> &'static Encoding {
    if let Some(encoding) = label_from_regex(&HEADER_CHARSET_RE, content_type) {
        return encoding;
    }

    let window = &body[..body.len().min(SNIFF_WINDOW)];
    let window_str = String::from_utf8_lossy(window);
    if let Some(encoding) = label_from_regex(&META_CHARSET_RE, &window_str) {
        return encoding;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(window, false);
    detector.guess(None, true)
}

fn label_from_regex(re: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = re.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_from_content_type_header() {
        let body = b"<html><head><title>Test</title></head></html>";
        let encoding = detect_encoding("text/html; charset=utf-8", body);
        assert_eq!(encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn charset_from_meta_tag() {
        let body = b"<html><head><meta charset=\"iso-8859-1\"><title>Test</title></head></html>";
        // ISO-8859-1 maps to windows-1252 in encoding_rs (superset)
        let encoding = detect_encoding("text/html", body);
        assert_eq!(encoding, encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn decode_utf8_body() {
        let body = "Hello, 世界!".as_bytes();
        let decoded = decode_body("text/html; charset=utf-8", body).unwrap();
        assert_eq!(decoded, "Hello, 世界!");
    }

    #[test]
    fn decode_windows_1252_body() {
        // 0xE9 is 'é' in windows-1252
        let body = b"<html>caf\xe9</html>";
        let decoded = decode_body("text/html; charset=windows-1252", body).unwrap();
        assert!(decoded.contains("café"));
    }

    #[test]
    fn invalid_bytes_for_declared_charset() {
        // Lone continuation byte is never valid UTF-8
        let body = b"<html>\xff\xfe\xfd broken</html>";
        let result = decode_body("text/html; charset=utf-8", body);
        assert!(matches!(result, Err(FetchError::Charset(_))));
    }
}
