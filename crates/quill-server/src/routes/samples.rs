//! Sample upload and lookup endpoints.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use quill_core::SampleOutline;
use quill_extractors::{normalize_mime_type, Modality};
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Multipart field carrying the uploaded document.
pub const FILE_FIELD: &str = "file";

const OCTET_STREAM: &str = "application/octet-stream";

/// Response for an accepted upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: u64,
    pub name: String,
    pub preview: String,
}

/// One entry of the sample listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSummary {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<SampleOutline> for SampleSummary {
    fn from(sample: SampleOutline) -> Self {
        Self {
            id: sample.id,
            name: sample.name,
            created_at: sample.created_at,
        }
    }
}

/// Media type for an upload part. Generic or missing content types fall
/// back to the filename extension.
fn resolve_media_type(content_type: Option<&str>, filename: &str) -> String {
    match content_type.map(normalize_mime_type) {
        Some(declared) if !declared.is_empty() && declared != OCTET_STREAM => declared,
        declared => Modality::from_filename(filename)
            .map(|m| m.mime_type().to_string())
            .or(declared)
            .unwrap_or_else(|| OCTET_STREAM.to_string()),
    }
}

/// Upload a sample outline.
/// POST /api/upload-sample
pub async fn upload_sample(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("unnamed").to_string();
        let media_type = resolve_media_type(field.content_type(), &filename);
        let bytes = field.bytes().await?;

        debug!(filename = %filename, media_type = %media_type, bytes = bytes.len(), "Received upload");

        let sample = state
            .service
            .ingest(&bytes, &media_type, &filename, None)
            .await?;

        let response = UploadResponse {
            id: sample.id,
            preview: sample.preview(state.config().preview_chars),
            name: sample.name,
        };
        return Ok((StatusCode::CREATED, Json(response)));
    }

    Err(ApiError::bad_request(format!(
        "No '{}' field in multipart body",
        FILE_FIELD
    )))
}

/// List uploaded samples, oldest first.
/// GET /api/samples
pub async fn list_samples(State(state): State<AppState>) -> ApiResult<Json<Vec<SampleSummary>>> {
    let samples = state.service.list_samples()?;
    Ok(Json(samples.into_iter().map(Into::into).collect()))
}

/// Get a sample with its sections and skeleton.
/// GET /api/samples/:id
pub async fn get_sample(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<SampleOutline>> {
    Ok(Json(state.service.get_sample(id)?))
}
