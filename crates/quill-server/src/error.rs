//! Error handling for the REST API server.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quill_core::QuillError;
use serde::Serialize;
use std::fmt;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", message)
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, "UPL_001", message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

// Convert from quill-core errors
impl From<QuillError> for ApiError {
    fn from(err: QuillError) -> Self {
        let status = match &err {
            QuillError::UnsupportedFormat { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            QuillError::Decode { .. }
            | QuillError::NoStructureFound { .. }
            | QuillError::InvalidTopic { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            QuillError::NotFound { .. } => StatusCode::NOT_FOUND,
            QuillError::NoSampleAvailable { .. } | QuillError::Configuration(_) => {
                StatusCode::BAD_REQUEST
            }
            QuillError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            QuillError::Io(_) | QuillError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let mut api_error = ApiError::new(status, err.code().as_str(), err.to_string());
        if let Some(suggestion) = err.suggestion() {
            api_error = api_error.with_details(serde_json::json!({ "suggestion": suggestion }));
        }
        api_error
    }
}

// Body-limit violations surface while reading the multipart stream.
impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::payload_too_large(err.body_text())
        } else {
            ApiError::bad_request(format!("Multipart error: {}", err.body_text()))
        }
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_status_mapping() {
        let cases = [
            (QuillError::unsupported_format("image/png"), StatusCode::UNSUPPORTED_MEDIA_TYPE, "FMT_001"),
            (QuillError::decode("bad bytes"), StatusCode::UNPROCESSABLE_ENTITY, "DEC_001"),
            (QuillError::no_structure("none"), StatusCode::UNPROCESSABLE_ENTITY, "STR_001"),
            (QuillError::empty_topic(), StatusCode::UNPROCESSABLE_ENTITY, "TOP_001"),
            (QuillError::topic_too_long(300, 200), StatusCode::UNPROCESSABLE_ENTITY, "TOP_002"),
            (QuillError::sample_not_found(3), StatusCode::NOT_FOUND, "SMP_001"),
            (QuillError::outline_not_found(3), StatusCode::NOT_FOUND, "OUT_001"),
            (QuillError::no_sample(), StatusCode::BAD_REQUEST, "SMP_002"),
            (QuillError::payload_too_large(10, 5), StatusCode::PAYLOAD_TOO_LARGE, "UPL_001"),
            (QuillError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR, "INT_001"),
            (
                QuillError::Io(std::io::Error::other("disk")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INT_001",
            ),
        ];

        for (err, status, code) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status, status);
            assert_eq!(api.code, code);
        }
    }

    #[test]
    fn test_suggestion_goes_to_details() {
        let api: ApiError = QuillError::no_sample().into();
        let details = api.details.unwrap();
        assert_eq!(details["suggestion"], "Please upload a sample first");
    }
}
