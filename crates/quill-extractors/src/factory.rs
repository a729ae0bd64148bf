//! Factory for creating extractors.

use std::sync::Arc;

use crate::error::{ExtractError, ExtractResult};
use crate::text::PlainTextExtractor;
use crate::types::Modality;
use crate::Extractor;

#[cfg(feature = "pdf")]
use crate::PdfExtractor;

#[cfg(feature = "docx")]
use crate::DocxExtractor;

#[cfg(feature = "doc")]
use crate::DocExtractor;

/// Factory for creating content extractors.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create a plain text extractor.
    pub fn plain_text() -> Arc<dyn Extractor> {
        Arc::new(PlainTextExtractor::new())
    }

    /// Create a PDF extractor.
    #[cfg(feature = "pdf")]
    pub fn pdf() -> Arc<dyn Extractor> {
        Arc::new(PdfExtractor::new())
    }

    /// Create a DOCX extractor.
    #[cfg(feature = "docx")]
    pub fn docx() -> Arc<dyn Extractor> {
        Arc::new(DocxExtractor::new())
    }

    /// Create a DOCX extractor with custom configuration.
    #[cfg(feature = "docx")]
    pub fn docx_configured(preserve_tables: bool, extract_headings: bool) -> Arc<dyn Extractor> {
        Arc::new(
            DocxExtractor::new()
                .with_tables(preserve_tables)
                .with_headings(extract_headings),
        )
    }

    /// Create a legacy DOC extractor.
    #[cfg(feature = "doc")]
    pub fn doc() -> Arc<dyn Extractor> {
        Arc::new(DocExtractor::new())
    }

    /// Create the extractor for a modality.
    pub fn for_modality(modality: Modality) -> ExtractResult<Arc<dyn Extractor>> {
        match modality {
            Modality::PlainText => Ok(Self::plain_text()),

            #[cfg(feature = "pdf")]
            Modality::Pdf => Ok(Self::pdf()),

            #[cfg(feature = "doc")]
            Modality::LegacyDoc => Ok(Self::doc()),

            #[cfg(feature = "docx")]
            Modality::Docx => Ok(Self::docx()),

            #[allow(unreachable_patterns)]
            other => Err(ExtractError::UnsupportedFormat(other.mime_type().to_string())),
        }
    }

    /// Create extractor for a given MIME type.
    pub fn for_mime_type(mime_type: &str) -> ExtractResult<Arc<dyn Extractor>> {
        let modality = Modality::from_mime_type(mime_type)
            .ok_or_else(|| ExtractError::UnsupportedFormat(mime_type.to_string()))?;
        Self::for_modality(modality)
    }

    /// Get all available extractors.
    #[allow(clippy::vec_init_then_push)]
    pub fn all() -> Vec<Arc<dyn Extractor>> {
        let mut extractors: Vec<Arc<dyn Extractor>> = Vec::new();

        extractors.push(Self::plain_text());

        #[cfg(feature = "pdf")]
        extractors.push(Self::pdf());

        #[cfg(feature = "doc")]
        extractors.push(Self::doc());

        #[cfg(feature = "docx")]
        extractors.push(Self::docx());

        extractors
    }
}
