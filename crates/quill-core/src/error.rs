//! Error types for quill operations.
//!
//! Every failure of the ingestion and synthesis pipeline maps to one
//! distinct kind with a structured error code. Callers decide how to present
//! it; nothing here is retried or downgraded to a default result.

use quill_extractors::ExtractError;
use thiserror::Error;

/// Result type alias for quill operations.
pub type QuillResult<T> = Result<T, QuillError>;

/// Main error type for all quill operations.
#[derive(Error, Debug)]
pub enum QuillError {
    /// Declared media type is not one of the accepted formats.
    #[error("Unsupported format: {media_type}")]
    UnsupportedFormat { media_type: String, code: ErrorCode },

    /// Bytes cannot be interpreted as text under the declared format.
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The text contains no section headings, so it cannot serve as a template.
    #[error("No structure found: {message}")]
    NoStructureFound { message: String, code: ErrorCode },

    /// Topic is empty or too long.
    #[error("Invalid topic: {message}")]
    InvalidTopic { message: String, code: ErrorCode },

    /// Referenced record does not exist.
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        code: ErrorCode,
        id: Option<u64>,
    },

    /// Generation requested before any sample was ingested.
    #[error("No sample outline available")]
    NoSampleAvailable { code: ErrorCode },

    /// Upload exceeds the configured size cap.
    #[error("Payload too large: {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge {
        size: usize,
        limit: usize,
        code: ErrorCode,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Format (FMT_xxx)
    FmtUnsupported,

    // Decode (DEC_xxx)
    DecInvalidBytes,

    // Structure (STR_xxx)
    StrNoHeadings,

    // Topic (TOP_xxx)
    TopEmpty,
    TopTooLong,

    // Samples (SMP_xxx)
    SmpNotFound,
    SmpNoneAvailable,

    // Outlines (OUT_xxx)
    OutNotFound,

    // Upload (UPL_xxx)
    UplTooLarge,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::FmtUnsupported => "FMT_001",
            ErrorCode::DecInvalidBytes => "DEC_001",
            ErrorCode::StrNoHeadings => "STR_001",
            ErrorCode::TopEmpty => "TOP_001",
            ErrorCode::TopTooLong => "TOP_002",
            ErrorCode::SmpNotFound => "SMP_001",
            ErrorCode::SmpNoneAvailable => "SMP_002",
            ErrorCode::OutNotFound => "OUT_001",
            ErrorCode::UplTooLarge => "UPL_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl QuillError {
    /// Create an unsupported format error.
    pub fn unsupported_format(media_type: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            media_type: media_type.into(),
            code: ErrorCode::FmtUnsupported,
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            code: ErrorCode::DecInvalidBytes,
            source: None,
        }
    }

    /// Create a no-structure error.
    pub fn no_structure(message: impl Into<String>) -> Self {
        Self::NoStructureFound {
            message: message.into(),
            code: ErrorCode::StrNoHeadings,
        }
    }

    /// Create an invalid topic error for an empty topic.
    pub fn empty_topic() -> Self {
        Self::InvalidTopic {
            message: "topic must not be empty".to_string(),
            code: ErrorCode::TopEmpty,
        }
    }

    /// Create an invalid topic error for an oversized topic.
    pub fn topic_too_long(len: usize, max: usize) -> Self {
        Self::InvalidTopic {
            message: format!("topic is {} characters, maximum is {}", len, max),
            code: ErrorCode::TopTooLong,
        }
    }

    /// Create a not found error for a sample.
    pub fn sample_not_found(id: u64) -> Self {
        Self::NotFound {
            message: format!("Sample outline with id '{}' not found", id),
            code: ErrorCode::SmpNotFound,
            id: Some(id),
        }
    }

    /// Create a not found error for a generated outline.
    pub fn outline_not_found(id: u64) -> Self {
        Self::NotFound {
            message: format!("Generated outline with id '{}' not found", id),
            code: ErrorCode::OutNotFound,
            id: Some(id),
        }
    }

    /// Create a no-sample error.
    pub fn no_sample() -> Self {
        Self::NoSampleAvailable {
            code: ErrorCode::SmpNoneAvailable,
        }
    }

    /// Create a payload-too-large error.
    pub fn payload_too_large(size: usize, limit: usize) -> Self {
        Self::PayloadTooLarge {
            size,
            limit,
            code: ErrorCode::UplTooLarge,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedFormat { code, .. } => *code,
            Self::Decode { code, .. } => *code,
            Self::NoStructureFound { code, .. } => *code,
            Self::InvalidTopic { code, .. } => *code,
            Self::NotFound { code, .. } => *code,
            Self::NoSampleAvailable { code } => *code,
            Self::PayloadTooLarge { code, .. } => *code,
            _ => ErrorCode::Internal,
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::UnsupportedFormat { .. } => Some("Upload a DOCX, DOC, TXT, or PDF file"),
            Self::Decode { .. } => Some("Check that the file is not corrupted and matches its extension"),
            Self::NoStructureFound { .. } => {
                Some("Use a sample with numbered or lettered section headings (I., 1., A)) or heading styles")
            }
            Self::InvalidTopic { .. } => Some("Enter a topic between 3 and 200 characters"),
            Self::NotFound { .. } => Some("Please check the id and ensure it exists"),
            Self::NoSampleAvailable { .. } => Some("Please upload a sample first"),
            Self::PayloadTooLarge { .. } => Some("Upload a file smaller than 5 MB"),
            _ => None,
        }
    }
}

impl From<ExtractError> for QuillError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat(media_type) => Self::unsupported_format(media_type),
            err if err.is_decode() => Self::Decode {
                message: err.to_string(),
                code: ErrorCode::DecInvalidBytes,
                source: Some(Box::new(err)),
            },
            ExtractError::Io(e) => Self::Io(e),
            other => Self::Internal(other.to_string()),
        }
    }
}
