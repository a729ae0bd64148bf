//! Stored records: uploaded samples and generated outlines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::outline::{OutlineContent, Section, StructuralSkeleton};

/// A sample outline accepted as a structural template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleOutline {
    /// Repository-assigned identifier.
    pub id: u64,
    /// Owner of the sample.
    pub owner_id: u64,
    /// Original filename.
    pub name: String,
    /// Declared media type of the upload.
    pub media_type: String,
    /// Extracted plain text.
    pub raw_text: String,
    /// Sections recovered by structure analysis.
    pub sections: Vec<Section>,
    /// Shape used as the synthesis blueprint.
    pub structural_skeleton: StructuralSkeleton,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl SampleOutline {
    /// First `max_chars` characters of the raw text, with `...` appended
    /// when the text was cut.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut chars = self.raw_text.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }
}

/// Input for storing a new sample; the repository assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSampleOutline {
    pub owner_id: u64,
    pub name: String,
    pub media_type: String,
    pub raw_text: String,
    pub sections: Vec<Section>,
    pub structural_skeleton: StructuralSkeleton,
}

/// An outline generated for a topic from a sample's skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedOutline {
    /// Repository-assigned identifier.
    pub id: u64,
    /// Owner of the outline.
    pub owner_id: u64,
    /// Sample the shape came from. Not owning: the sample may be gone.
    pub sample_id: u64,
    /// Topic the outline was generated for.
    pub topic: String,
    /// Generated outline.
    pub content: OutlineContent,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for storing a new generated outline.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGeneratedOutline {
    pub owner_id: u64,
    pub sample_id: u64,
    pub topic: String,
    pub content: OutlineContent,
}
