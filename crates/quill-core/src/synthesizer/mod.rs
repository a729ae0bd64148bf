//! Outline synthesis: fill a structural skeleton with topic-specific text.
//!
//! The generated outline always has exactly the skeleton's shape. Section
//! headings are ordinal-prefixed role headings, items come from the role's
//! template library.

mod templates;

pub use templates::{roman_numeral, SectionRole};

use tracing::debug;

use crate::config::SynthesisConfig;
use crate::error::{QuillError, QuillResult};
use crate::types::{OutlineContent, Section, StructuralSkeleton};

/// Trim and bound a topic.
pub fn validate_topic(topic: &str, config: &SynthesisConfig) -> QuillResult<String> {
    let trimmed = topic.trim();
    if trimmed.is_empty() {
        return Err(QuillError::empty_topic());
    }
    let len = trimmed.chars().count();
    if len > config.max_topic_chars {
        return Err(QuillError::topic_too_long(len, config.max_topic_chars));
    }
    Ok(trimmed.to_string())
}

/// Produce an outline about `topic` shaped exactly like `skeleton`.
pub fn synthesize(
    topic: &str,
    skeleton: &StructuralSkeleton,
    config: &SynthesisConfig,
) -> QuillResult<OutlineContent> {
    let topic = validate_topic(topic, config)?;
    let counts = skeleton.item_counts_per_section();

    let sections = counts
        .iter()
        .enumerate()
        .map(|(index, &item_count)| {
            let role = SectionRole::for_position(index, counts.len());
            let heading = format!(
                "{}. {}",
                roman_numeral(index + 1),
                templates::render(role.heading_template(), &topic)
            );
            let items = role
                .item_templates()
                .iter()
                .cycle()
                .take(item_count)
                .map(|template| templates::render(template, &topic))
                .collect();
            Section::new(heading, items)
        })
        .collect();

    debug!(
        topic = %topic,
        sections = counts.len(),
        items = skeleton.total_items(),
        "Synthesized outline"
    );

    Ok(OutlineContent {
        title: topic,
        sections,
    })
}
