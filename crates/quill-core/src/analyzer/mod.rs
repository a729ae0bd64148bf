//! Structure analysis: recover the section skeleton of a sample outline.
//!
//! Lines are scanned in order. A heading signal opens a new section, every
//! other non-blank line becomes an item of the open section, and blank
//! lines are skipped. The heading signal comes from paragraph style tags
//! when the extractor surfaced any heading styles, otherwise from ordinal
//! markers (`I.`, `1.`, `A)`) at the outermost indentation level.
//!
//! A heading candidate directly followed by another candidate, or ending
//! the input, would produce an empty section; it is folded into the open
//! section as an item instead.

mod marker;

pub use marker::{Marker, MarkerFamily};

use quill_extractors::{ExtractedContent, StyleTag};
use tracing::debug;

use crate::error::{QuillError, QuillResult};
use crate::types::{Section, StructuralSkeleton};

/// Which signal decided the section boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum HeadingSignal {
    /// Paragraph heading styles at the given level.
    StyleTags { level: u8 },
    /// Textual ordinal markers of the given family.
    TextMarkers { family: MarkerFamily },
}

/// Result of structure analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Sections in document order, each with at least one item.
    pub sections: Vec<Section>,
    /// Shape of `sections`.
    pub skeleton: StructuralSkeleton,
    /// Lines before the first heading.
    pub preamble: Vec<String>,
    /// Signal that produced the headings.
    pub signal: HeadingSignal,
}

/// One non-blank input line.
#[derive(Debug)]
struct Line<'a> {
    text: &'a str,
    indent: usize,
    style: Option<StyleTag>,
}

/// Analyze extracted content using its style tags, if any.
pub fn analyze_content(content: &ExtractedContent) -> QuillResult<Analysis> {
    analyze(&content.text, content.styles.as_deref())
}

/// Analyze text, optionally with one style tag per `\n`-separated line.
pub fn analyze(text: &str, styles: Option<&[StyleTag]>) -> QuillResult<Analysis> {
    let lines = collect_lines(text, styles);

    let (signal, candidates) = match heading_level(&lines) {
        Some(level) => (
            Some(HeadingSignal::StyleTags { level }),
            lines
                .iter()
                .map(|line| line.style == Some(StyleTag::Heading(level)))
                .collect(),
        ),
        None => match marker_candidates(&lines) {
            Some((family, candidates)) => (Some(HeadingSignal::TextMarkers { family }), candidates),
            None => (None, vec![false; lines.len()]),
        },
    };

    let signal = signal.ok_or_else(|| QuillError::no_structure("no heading lines found"))?;

    let mut sections: Vec<Section> = Vec::new();
    let mut preamble: Vec<String> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let next_is_content = candidates.get(i + 1).map(|next| !next).unwrap_or(false);

        if candidates[i] && next_is_content {
            sections.push(Section::new(line.text, Vec::new()));
            continue;
        }

        if candidates[i] {
            debug!(line = line.text, "Folding heading without content into items");
        }
        match sections.last_mut() {
            Some(section) => section.items.push(line.text.to_string()),
            None => preamble.push(line.text.to_string()),
        }
    }

    if sections.is_empty() {
        return Err(QuillError::no_structure(
            "every heading line was immediately followed by another heading",
        ));
    }

    let skeleton = StructuralSkeleton::new(sections.iter().map(|s| s.items.len()).collect())
        .map_err(|e| QuillError::Internal(format!("analysis produced invalid skeleton: {}", e)))?;

    debug!(
        %signal,
        sections = skeleton.section_count(),
        items = skeleton.total_items(),
        preamble = preamble.len(),
        "Analyzed sample structure"
    );

    Ok(Analysis {
        sections,
        skeleton,
        preamble,
        signal,
    })
}

fn collect_lines<'a>(text: &'a str, styles: Option<&[StyleTag]>) -> Vec<Line<'a>> {
    text.split('\n')
        .enumerate()
        .filter_map(|(i, raw)| {
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            Some(Line {
                text: trimmed,
                indent: indentation(raw),
                style: styles.and_then(|s| s.get(i).copied()),
            })
        })
        .collect()
}

fn indentation(raw: &str) -> usize {
    raw.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Shallowest heading level present in the style tags.
fn heading_level(lines: &[Line<'_>]) -> Option<u8> {
    lines
        .iter()
        .filter_map(|line| line.style.and_then(|s| s.heading_level()))
        .min()
}

/// Mark lines starting with an outermost marker of the document's top family.
///
/// Roman lists only accept single-letter numerals in sequence, so an
/// unindented `A.`/`B.`/`C.` sub-list under `I.` stays items.
fn marker_candidates(lines: &[Line<'_>]) -> Option<(MarkerFamily, Vec<bool>)> {
    let min_indent = lines.iter().map(|line| line.indent).min()?;

    let markers: Vec<Option<Marker>> = lines
        .iter()
        .map(|line| {
            if line.indent == min_indent {
                Marker::parse(line.text)
            } else {
                None
            }
        })
        .collect();

    let family = markers
        .iter()
        .flatten()
        .find_map(|marker| marker.primary_family())?;

    let mut previous: Option<u32> = None;
    let candidates = markers
        .iter()
        .map(|marker| match (marker, family) {
            (Some(m), MarkerFamily::Roman) => {
                let continues = m.continues_roman(previous);
                if continues {
                    previous = m.roman_value();
                }
                continues
            }
            (Some(m), _) => m.belongs_to(family),
            (None, _) => false,
        })
        .collect();

    Some((family, candidates))
}
