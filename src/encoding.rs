//! Character encoding detection for raw page captures.
//!
//! Captured pages arrive as bytes. The charset is read from the first
//! `<meta>` declaration and the page is decoded to UTF-8 before any
//! feature is computed.

use encoding_rs::{Encoding, UTF_8};

use crate::patterns::{CHARSET_META, CONTENT_TYPE_CHARSET};

/// Bytes inspected for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// Detect character encoding from HTML bytes.
///
/// Checks `<meta charset>` first, then the `Content-Type` http-equiv form,
/// and defaults to UTF-8. A declared UTF-16 or replacement charset cannot
/// describe bytes that were sniffed as ASCII, so it also maps to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);

    [&*CHARSET_META, &*CONTENT_TYPE_CHARSET]
        .iter()
        .filter_map(|re| re.captures(&head).and_then(|c| c.get(1)))
        .find_map(|label| Encoding::for_label(label.as_str().as_bytes()))
        .map_or(UTF_8, Encoding::output_encoding)
}

/// Decode HTML bytes to a UTF-8 string.
///
/// Undecodable sequences become U+FFFD rather than errors.
///
/// # Examples
///
/// ```
/// use rs_http_features::encoding::transcode_to_utf8;
///
/// let page = b"<html><head><meta charset=\"ISO-8859-1\"></head><title>Caf\xE9</title></html>";
/// assert!(transcode_to_utf8(page).contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }
    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}
