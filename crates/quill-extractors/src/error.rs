//! Extraction error types.

use thiserror::Error;

/// Errors that can occur during content extraction.
///
/// No variant ever carries partial text: a failed extraction yields nothing.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Media type is not one of the accepted formats.
    #[error("Unsupported content type: {0}")]
    UnsupportedFormat(String),

    /// Bytes are not valid text for the declared format.
    #[error("Decode error: {0}")]
    Decode(String),

    /// PDF-specific extraction error.
    #[cfg(feature = "pdf")]
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// DOCX-specific extraction error.
    #[cfg(feature = "docx")]
    #[error("DOCX extraction error: {0}")]
    Docx(String),

    /// Legacy DOC-specific extraction error.
    #[cfg(feature = "doc")]
    #[error("DOC extraction error: {0}")]
    Doc(String),

    /// IO error during extraction.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Task join error from spawn_blocking.
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ExtractError {
    /// Whether the bytes themselves were the problem (as opposed to the
    /// media type or the runtime).
    pub fn is_decode(&self) -> bool {
        match self {
            Self::Decode(_) => true,
            #[cfg(feature = "pdf")]
            Self::Pdf(_) => true,
            #[cfg(feature = "docx")]
            Self::Docx(_) => true,
            #[cfg(feature = "doc")]
            Self::Doc(_) => true,
            _ => false,
        }
    }
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
