//! quill-extractors - Text extraction for outline samples.
//!
//! Turns uploaded document bytes into plain text plus, where the format
//! carries it, a parallel sequence of per-line paragraph style tags.
//!
//! # Features
//!
//! - `pdf` (default) - PDF text extraction via pdf-extract
//! - `docx` (default) - DOCX text and paragraph styles via docx-rs
//! - `doc` (default) - Word 97-2003 text via the OLE piece table (cfb)
//! - `full` - All extraction features
//!
//! Plain text is always available.
//!
//! # Example
//!
//! ```ignore
//! use quill_extractors::{ExtractionPipeline, ExtractorFactory};
//!
//! // Use pipeline for automatic MIME type routing
//! let pipeline = ExtractionPipeline::with_defaults();
//! let result = pipeline.extract(&doc_bytes, "application/msword").await?;
//!
//! for (line, style) in result.lines() {
//!     println!("{style:?}: {line}");
//! }
//! ```

mod error;
mod factory;
mod pipeline;
mod text;
mod types;

#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "docx")]
mod docx;

#[cfg(feature = "doc")]
mod doc;

pub use error::{ExtractError, ExtractResult};
pub use factory::ExtractorFactory;
pub use pipeline::ExtractionPipeline;
pub use text::PlainTextExtractor;
pub use types::{normalize_mime_type, DocumentStructure, ExtractedContent, Modality, StyleTag};

#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;

#[cfg(feature = "docx")]
pub use docx::DocxExtractor;

#[cfg(feature = "doc")]
pub use doc::DocExtractor;

use async_trait::async_trait;

/// Core Extractor trait - every format extractor implements this.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract text content from bytes.
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent>;

    /// Supported MIME types for this extractor.
    fn supported_types(&self) -> &[&str];

    /// Check if this extractor handles the given MIME type.
    fn supports(&self, mime_type: &str) -> bool {
        let normalized = normalize_mime_type(mime_type);
        self.supported_types().contains(&normalized.as_str())
    }

    /// Human-readable name for this extractor.
    fn name(&self) -> &str;
}
