//! Plain-text input with character-set detection.
//!
//! Files are decoded by, in order: a byte order mark, strict UTF-8, and
//! finally chardetng's statistical guess among legacy encodings.

use crate::reader::Document;
use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;

pub fn read(path: &Path) -> Result<Document> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read text file: {}", path.display()))?;
    Ok(Document::untitled(decode(&bytes)))
}

/// Decode raw bytes to a `String`, never failing; malformed sequences become U+FFFD.
pub fn decode(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    tracing::debug!(encoding = encoding.name(), "decoding non-UTF-8 text");

    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_passes_through() {
        assert_eq!(decode("naïve café".as_bytes()), "naïve café");
        assert_eq!(decode(b""), "");
    }

    #[test]
    fn utf8_bom_is_stripped() {
        assert_eq!(decode(b"\xEF\xBB\xBFhello"), "hello");
    }

    #[test]
    fn utf16le_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "Hi!".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode(&bytes), "Hi!");
    }

    #[test]
    fn latin1_text_is_detected() {
        let (bytes, _, _) = encoding_rs::WINDOWS_1252
            .encode("Le café était très animé, déjà plein à midi. Voilà la façon française.");
        let text = decode(&bytes);
        assert!(text.contains("café"));
        assert!(text.contains("très"));
    }
}
