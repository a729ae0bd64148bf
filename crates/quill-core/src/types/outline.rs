//! Outline content and structural skeleton types.

use serde::{Deserialize, Serialize};

/// One section of an outline: a heading and its ordered items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading.
    pub heading: String,
    /// Ordered item strings (never empty in a valid outline).
    pub items: Vec<String>,
}

impl Section {
    /// Create a new section.
    pub fn new(heading: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            heading: heading.into(),
            items,
        }
    }
}

/// A complete outline. Serializes as
/// `{ "title": ..., "sections": [{ "heading": ..., "items": [...] }] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineContent {
    /// Outline title.
    pub title: String,
    /// Ordered sections.
    pub sections: Vec<Section>,
}

impl OutlineContent {
    /// Shape of this outline, if it satisfies the non-empty invariants.
    pub fn skeleton(&self) -> Option<StructuralSkeleton> {
        StructuralSkeleton::new(self.sections.iter().map(|s| s.items.len()).collect()).ok()
    }
}

/// The shape of an outline, independent of its text.
///
/// Always holds at least one section and at least one item per section;
/// construction and deserialization reject anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSkeleton", into = "RawSkeleton")]
pub struct StructuralSkeleton {
    item_counts: Vec<usize>,
}

/// Serialized form of a skeleton.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSkeleton {
    section_count: usize,
    item_counts_per_section: Vec<usize>,
}

/// Why a skeleton was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkeletonError {
    #[error("skeleton must contain at least one section")]
    NoSections,
    #[error("section {0} has no items")]
    EmptySection(usize),
    #[error("section count {declared} does not match {actual} item counts")]
    CountMismatch { declared: usize, actual: usize },
}

impl StructuralSkeleton {
    /// Create a skeleton from per-section item counts.
    pub fn new(item_counts: Vec<usize>) -> Result<Self, SkeletonError> {
        if item_counts.is_empty() {
            return Err(SkeletonError::NoSections);
        }
        if let Some(index) = item_counts.iter().position(|count| *count == 0) {
            return Err(SkeletonError::EmptySection(index));
        }
        Ok(Self { item_counts })
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.item_counts.len()
    }

    /// Item count of every section, in order.
    pub fn item_counts_per_section(&self) -> &[usize] {
        &self.item_counts
    }

    /// Total number of items across all sections.
    pub fn total_items(&self) -> usize {
        self.item_counts.iter().sum()
    }
}

impl TryFrom<RawSkeleton> for StructuralSkeleton {
    type Error = SkeletonError;

    fn try_from(raw: RawSkeleton) -> Result<Self, Self::Error> {
        if raw.section_count != raw.item_counts_per_section.len() {
            return Err(SkeletonError::CountMismatch {
                declared: raw.section_count,
                actual: raw.item_counts_per_section.len(),
            });
        }
        Self::new(raw.item_counts_per_section)
    }
}

impl From<StructuralSkeleton> for RawSkeleton {
    fn from(skeleton: StructuralSkeleton) -> Self {
        Self {
            section_count: skeleton.item_counts.len(),
            item_counts_per_section: skeleton.item_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_rejects_empty_shapes() {
        assert_eq!(StructuralSkeleton::new(vec![]), Err(SkeletonError::NoSections));
        assert_eq!(
            StructuralSkeleton::new(vec![2, 0, 1]),
            Err(SkeletonError::EmptySection(1))
        );
    }

    #[test]
    fn test_skeleton_serialized_shape() {
        let skeleton = StructuralSkeleton::new(vec![3, 2]).unwrap();
        let json = serde_json::to_value(&skeleton).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "sectionCount": 2, "itemCountsPerSection": [3, 2] })
        );

        let back: StructuralSkeleton = serde_json::from_value(json).unwrap();
        assert_eq!(back, skeleton);
    }

    #[test]
    fn test_skeleton_deserialization_checks_invariants() {
        let mismatched = serde_json::json!({ "sectionCount": 3, "itemCountsPerSection": [1, 1] });
        assert!(serde_json::from_value::<StructuralSkeleton>(mismatched).is_err());

        let empty_section = serde_json::json!({ "sectionCount": 1, "itemCountsPerSection": [0] });
        assert!(serde_json::from_value::<StructuralSkeleton>(empty_section).is_err());
    }

    #[test]
    fn test_outline_content_wire_shape() {
        let outline = OutlineContent {
            title: "Time Management".to_string(),
            sections: vec![Section::new("I. Introduction", vec!["Why it matters".to_string()])],
        };

        let json = serde_json::to_string(&outline).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Time Management","sections":[{"heading":"I. Introduction","items":["Why it matters"]}]}"#
        );
        let back: OutlineContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outline);
        assert_eq!(back.skeleton().unwrap().item_counts_per_section(), &[1]);
    }
}
