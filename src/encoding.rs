//! Encoding resolution for plain-text documents
//!
//! Bytes are decoded as UTF-8 first. When U+FFFD replacement characters make up
//! 5% or more of the decoded text, the bytes are decoded again as windows-1251 and
//! that result is used as is.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1251};
use tracing::debug;

/// Share of replacement characters at which a primary decode is rejected.
pub const REPLACEMENT_THRESHOLD: f64 = 0.05;

/// Legacy single-byte encoding tried when UTF-8 decoding looks wrong.
pub fn fallback_encoding() -> &'static Encoding {
    WINDOWS_1251
}

/// Decode with a single encoding. Malformed sequences become U+FFFD.
pub fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _used, _had_errors) = encoding.decode(bytes);
    text.into_owned()
}

/// Decode as UTF-8 without any fallback.
pub fn decode_utf8(bytes: &[u8]) -> String {
    decode_with(bytes, UTF_8)
}

/// True when the decoded text has fewer replacement characters than the threshold.
///
/// Length is measured in UTF-16 code units, so characters outside the Basic
/// Multilingual Plane weigh two. An empty text has a zero threshold and is
/// therefore never valid; decoding empty input again yields the same empty text.
pub fn is_plausible(text: &str) -> bool {
    let mut len = 0usize;
    let mut replacements = 0usize;
    for ch in text.chars() {
        len += ch.len_utf16();
        if ch == char::REPLACEMENT_CHARACTER {
            replacements += 1;
        }
    }
    (replacements as f64) < (len as f64) * REPLACEMENT_THRESHOLD
}

/// Decode with `primary`, retrying once with the fallback encoding when the result
/// fails [`is_plausible`]. The fallback result is trusted unconditionally.
pub fn decode(bytes: &[u8], primary: &'static Encoding) -> String {
    let text = decode_with(bytes, primary);
    if is_plausible(&text) {
        return text;
    }
    debug!(
        primary = primary.name(),
        fallback = fallback_encoding().name(),
        bytes = bytes.len(),
        "Primary decoding rejected, using fallback encoding"
    );
    decode_with(bytes, fallback_encoding())
}

/// Two-stage decode used for `txt` documents: UTF-8, then windows-1251.
pub fn decode_text_document(bytes: &[u8]) -> String {
    decode(bytes, UTF_8)
}
