//! PDF content extraction using pdf-extract.

use crate::error::{ExtractError, ExtractResult};
use crate::types::{DocumentStructure, ExtractedContent, Modality, MIME_PDF};
use crate::Extractor;
use async_trait::async_trait;
use tracing::debug;

/// PDF content extractor using pdf-extract library.
///
/// Extracts text page by page, wrapping synchronous pdf-extract calls in
/// spawn_blocking to avoid blocking the async runtime. Pages are joined by a
/// blank line so page boundaries survive as section boundaries.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor {
    /// Whether to keep pages that contain only whitespace.
    keep_blank_pages: bool,
}

impl PdfExtractor {
    /// Create new PDF extractor with default settings.
    pub fn new() -> Self {
        Self {
            keep_blank_pages: false,
        }
    }

    /// Configure whether whitespace-only pages are kept as empty pages.
    pub fn with_blank_pages(mut self, keep: bool) -> Self {
        self.keep_blank_pages = keep;
        self
    }

    /// Trim raw per-page output, dropping blank pages unless configured.
    fn clean_pages(raw: Vec<String>, keep_blank_pages: bool) -> Vec<String> {
        raw.into_iter()
            .map(|page| page.trim().to_string())
            .filter(|page| keep_blank_pages || !page.is_empty())
            .collect()
    }

    /// Join pages, keeping each break as a blank line.
    fn join_pages(pages: &[String]) -> String {
        pages.join("\n\n")
    }
}

#[async_trait]
impl Extractor for PdfExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();

        // pdf-extract panics on some malformed inputs; a panicked task is
        // reported as a decode failure of the document.
        let raw = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem_by_pages(&content)
                .map_err(|e| ExtractError::Pdf(format!("Failed to parse PDF: {}", e)))
        })
        .await
        .map_err(|e| {
            if e.is_panic() {
                ExtractError::Pdf("PDF parser aborted on malformed input".to_string())
            } else {
                ExtractError::TaskJoin(e)
            }
        })??;

        let page_count = raw.len();
        let pages = Self::clean_pages(raw, self.keep_blank_pages);
        debug!(pages = page_count, kept = pages.len(), bytes = content_len, "Extracted PDF text");

        let structure = DocumentStructure {
            page_count: Some(page_count),
            sections: Vec::new(),
        };

        Ok(ExtractedContent::new(Self::join_pages(&pages), Modality::Pdf)
            .with_structure(structure)
            .with_metadata("original_size", content_len))
    }

    fn supported_types(&self) -> &[&str] {
        &[MIME_PDF]
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}
