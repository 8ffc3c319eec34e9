//! Text extraction and word counting
//!
//! Decoding depends on the format: `txt` goes through the two-stage resolver in
//! [`crate::encoding`], everything else is read as UTF-8. Markup stripping then
//! runs in a fixed order:
//!
//! 1. `fb2` only: `<binary>` and `<description>` blocks are replaced by a space.
//! 2. Any remaining `<...>` tag is replaced by a space.
//! 3. Every character that is not a letter, digit or whitespace becomes a space.
//! 4. Whitespace runs collapse to one space and the ends are trimmed.
//!
//! Words are the non-empty whitespace-separated runs of what is left.

use crate::encoding;
use crate::error::ExtractionError;
use crate::format::DocumentFormat;
use crate::source::ByteSource;
use once_cell::sync::Lazy;
use regex::Regex;

static FB2_BINARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<binary[^>]*>.*?</binary>").expect("valid fb2 binary pattern")
});
static FB2_DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<description[^>]*>.*?</description>")
        .expect("valid fb2 description pattern")
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("valid non-word pattern"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Plain text left after markup stripping, with its word count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub words: u64,
}

/// Strip markup from already-decoded text. `fb2` additionally drops embedded
/// binaries and the metadata description.
pub fn clean_text(text: &str, format: Option<DocumentFormat>) -> String {
    let mut processed = text.to_string();
    if format == Some(DocumentFormat::Fb2) {
        processed = FB2_BINARY.replace_all(&processed, " ").into_owned();
        processed = FB2_DESCRIPTION.replace_all(&processed, " ").into_owned();
    }
    let processed = TAG.replace_all(&processed, " ");
    let processed = NON_WORD.replace_all(&processed, " ");
    let processed = WHITESPACE_RUN.replace_all(&processed, " ");
    processed.trim().to_string()
}

/// Count words in decoded text after markup stripping.
pub fn count_words(text: &str, format: Option<DocumentFormat>) -> u64 {
    let cleaned = clean_text(text, format);
    cleaned.split_whitespace().filter(|w| !w.is_empty()).count() as u64
}

/// Decode a document's bytes according to its format: `txt` with fallback,
/// everything else as UTF-8 only.
pub fn decode_document(bytes: &[u8], format: DocumentFormat) -> String {
    match format {
        DocumentFormat::Txt => encoding::decode_text_document(bytes),
        _ => encoding::decode_utf8(bytes),
    }
}

/// Decode, strip and count a document held in memory.
pub fn extract(bytes: &[u8], format: DocumentFormat) -> ExtractedText {
    let decoded = decode_document(bytes, format);
    let text = clean_text(&decoded, Some(format));
    let words = text.split_whitespace().count() as u64;
    ExtractedText { text, words }
}

/// Word count of a document held in memory.
pub fn extract_word_count(bytes: &[u8], format: DocumentFormat) -> u64 {
    extract(bytes, format).words
}

/// Read a byte source and count its words. Only reading can fail.
pub fn extract_from_source(
    source: &dyn ByteSource,
    format: DocumentFormat,
) -> Result<u64, ExtractionError> {
    let bytes = source.read()?;
    Ok(extract_word_count(&bytes, format))
}
