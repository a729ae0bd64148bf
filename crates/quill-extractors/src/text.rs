//! Plain text extraction.

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedContent, Modality, MIME_TEXT};
use crate::Extractor;
use async_trait::async_trait;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Strict UTF-8 text extractor.
///
/// Invalid byte sequences are rejected rather than replaced, since a
/// substituted character can turn a marker line into something else.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    /// Create new plain text extractor.
    pub fn new() -> Self {
        Self
    }

    /// Decode bytes as UTF-8, dropping a leading byte order mark.
    pub fn decode(content: &[u8]) -> ExtractResult<String> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
        std::str::from_utf8(content)
            .map(str::to_owned)
            .map_err(|e| {
                ExtractError::Decode(format!(
                    "invalid UTF-8 at byte {}: {}",
                    e.valid_up_to(),
                    e
                ))
            })
    }
}

#[async_trait]
impl Extractor for PlainTextExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let text = Self::decode(content)?;
        let size = content.len();
        Ok(ExtractedContent::new(text, Modality::PlainText).with_metadata("original_size", size))
    }

    fn supported_types(&self) -> &[&str] {
        &[MIME_TEXT]
    }

    fn name(&self) -> &str {
        "utf8"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plain_text_extraction() {
        let extractor = PlainTextExtractor::new();
        let result = extractor.extract("I. Start\nfirst".as_bytes()).await.unwrap();
        assert_eq!(result.text, "I. Start\nfirst");
        assert_eq!(result.modality, Modality::PlainText);
        assert!(result.styles.is_none());
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_rejected() {
        let extractor = PlainTextExtractor::new();
        let result = extractor.extract(&[b'o', b'k', 0xFF, 0xFE]).await;
        assert!(matches!(result, Err(ExtractError::Decode(_))));
    }

    #[test]
    fn test_bom_is_dropped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"I. Start");
        assert_eq!(PlainTextExtractor::decode(&bytes).unwrap(), "I. Start");
    }

    #[test]
    fn test_supports_parameters() {
        let extractor = PlainTextExtractor::new();
        assert!(extractor.supports("text/plain; charset=utf-8"));
        assert!(!extractor.supports("text/html"));
    }
}
