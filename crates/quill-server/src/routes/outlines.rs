//! Outline generation endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use quill_core::{GeneratedOutline, OutlineContent};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Shortest topic accepted over HTTP, in characters after trimming.
pub const MIN_TOPIC_CHARS: usize = 3;

/// Request body for generating an outline.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutlineRequest {
    /// Topic to write about.
    pub topic: String,
    /// Sample to take the shape from; the latest sample when absent.
    pub sample_id: Option<u64>,
}

/// Response for a generated outline.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutlineResponse {
    pub id: u64,
    pub topic: String,
    pub sample_id: u64,
    pub content: OutlineContent,
}

impl From<GeneratedOutline> for GenerateOutlineResponse {
    fn from(outline: GeneratedOutline) -> Self {
        Self {
            id: outline.id,
            topic: outline.topic,
            sample_id: outline.sample_id,
            content: outline.content,
        }
    }
}

/// Generate an outline for a topic.
/// POST /api/generate-outline
pub async fn generate_outline(
    State(state): State<AppState>,
    Json(request): Json<GenerateOutlineRequest>,
) -> ApiResult<(StatusCode, Json<GenerateOutlineResponse>)> {
    // Empty and oversized topics are rejected by the core with their own codes.
    let length = request.topic.trim().chars().count();
    if length > 0 && length < MIN_TOPIC_CHARS {
        return Err(ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "TOP_001",
            format!("topic must be at least {} characters", MIN_TOPIC_CHARS),
        ));
    }

    let outline = match request.sample_id {
        Some(sample_id) => {
            state
                .service
                .generate_from_sample(sample_id, &request.topic, None)
                .await?
        }
        None => state.service.generate_for_topic(&request.topic, None).await?,
    };

    Ok((StatusCode::CREATED, Json(outline.into())))
}

/// Get a generated outline.
/// GET /api/outlines/:id
pub async fn get_outline(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<GeneratedOutline>> {
    Ok(Json(state.service.get_generated(id)?))
}
