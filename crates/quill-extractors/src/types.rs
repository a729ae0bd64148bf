//! Core types for content extraction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// MIME type for plain text.
pub const MIME_TEXT: &str = "text/plain";
/// MIME type for PDF.
pub const MIME_PDF: &str = "application/pdf";
/// MIME type for Word 97-2003 binary documents.
pub const MIME_DOC: &str = "application/msword";
/// MIME type for Office Open XML word-processing documents.
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Normalize a declared media type for matching: parameters are dropped and
/// ASCII case is folded (`Text/Plain; charset=UTF-8` -> `text/plain`).
pub fn normalize_mime_type(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Format of the original document. Each variant has exactly one extractor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Modality {
    /// UTF-8 plain text.
    PlainText,
    /// PDF document.
    Pdf,
    /// Word 97-2003 binary document.
    LegacyDoc,
    /// Office Open XML word-processing document.
    Docx,
}

impl Modality {
    /// Resolve a declared media type. Only the four accepted types map.
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        match normalize_mime_type(mime_type).as_str() {
            MIME_TEXT => Some(Self::PlainText),
            MIME_PDF => Some(Self::Pdf),
            MIME_DOC => Some(Self::LegacyDoc),
            MIME_DOCX => Some(Self::Docx),
            _ => None,
        }
    }

    /// Guess the modality from a filename extension, for uploads sent as
    /// `application/octet-stream` or without a content type.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            "doc" => Some(Self::LegacyDoc),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Canonical MIME type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::PlainText => MIME_TEXT,
            Self::Pdf => MIME_PDF,
            Self::LegacyDoc => MIME_DOC,
            Self::Docx => MIME_DOCX,
        }
    }
}

/// Paragraph style of one extracted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StyleTag {
    /// Ordinary body paragraph.
    #[default]
    Body,
    /// Document title style.
    Title,
    /// Heading with its outline level (1 is the top level).
    Heading(u8),
}

impl StyleTag {
    /// Heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Self::Heading(level) => Some(*level),
            _ => None,
        }
    }

    /// Whether this tag marks a heading.
    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }

    /// Map a word-processor style id or name (`Heading1`, `heading 2`,
    /// `Title`) to a tag.
    pub fn from_style_name(style: &str) -> Self {
        let normalized: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        if let Some(level) = normalized.strip_prefix("heading") {
            return match level.parse::<u8>() {
                Ok(n) if (1..=9).contains(&n) => Self::Heading(n),
                _ => Self::Heading(1),
            };
        }
        if normalized == "title" {
            return Self::Title;
        }
        Self::Body
    }
}

/// Document structure metadata (optional, for structured documents).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Total page count (for PDFs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,

    /// Heading texts in document order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sections: Vec<String>,
}

/// Extracted content with metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Extracted text, lines separated by `\n`.
    pub text: String,

    /// Original content modality.
    pub modality: Modality,

    /// One style tag per `\n`-separated line of `text`, when the format
    /// carries paragraph styles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<StyleTag>>,

    /// Document structure (if preserved).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<DocumentStructure>,

    /// Additional metadata (format-specific).
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ExtractedContent {
    /// Create new extracted content without style information.
    pub fn new(text: String, modality: Modality) -> Self {
        Self {
            text,
            modality,
            styles: None,
            structure: None,
            metadata: HashMap::new(),
        }
    }

    /// Build content from styled lines, keeping text and tags parallel.
    pub fn from_styled_lines(lines: Vec<(String, StyleTag)>, modality: Modality) -> Self {
        let (texts, styles): (Vec<String>, Vec<StyleTag>) = lines.into_iter().unzip();
        Self {
            text: texts.join("\n"),
            modality,
            styles: Some(styles),
            structure: None,
            metadata: HashMap::new(),
        }
    }

    /// Add structure information.
    pub fn with_structure(mut self, structure: DocumentStructure) -> Self {
        self.structure = Some(structure);
        self
    }

    /// Add metadata entry.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Iterate lines together with their style tag, if any.
    pub fn lines(&self) -> impl Iterator<Item = (&str, Option<StyleTag>)> + '_ {
        self.text.split('\n').enumerate().map(move |(i, line)| {
            let style = self.styles.as_ref().and_then(|s| s.get(i).copied());
            (line.strip_suffix('\r').unwrap_or(line), style)
        })
    }

    /// Check if extraction produced meaningful content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Get content length.
    pub fn len(&self) -> usize {
        self.text.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_mime_normalization() {
        assert_eq!(normalize_mime_type("Text/Plain; charset=UTF-8"), "text/plain");
        assert_eq!(normalize_mime_type(" application/pdf "), "application/pdf");
    }

    #[test]
    fn test_modality_mime_mapping() {
        for modality in Modality::iter() {
            assert_eq!(Modality::from_mime_type(modality.mime_type()), Some(modality));
        }
        assert_eq!(Modality::from_mime_type("image/png"), None);
        assert_eq!(Modality::from_mime_type("application/docx"), None);
        assert_eq!(Modality::LegacyDoc.to_string(), "legacy_doc");
    }

    #[test]
    fn test_modality_from_filename() {
        assert_eq!(Modality::from_filename("notes.TXT"), Some(Modality::PlainText));
        assert_eq!(Modality::from_filename("a.b.docx"), Some(Modality::Docx));
        assert_eq!(Modality::from_filename("old.doc"), Some(Modality::LegacyDoc));
        assert_eq!(Modality::from_filename("slides.pptx"), None);
        assert_eq!(Modality::from_filename("README"), None);
    }

    #[test]
    fn test_style_from_name() {
        assert_eq!(StyleTag::from_style_name("Heading1"), StyleTag::Heading(1));
        assert_eq!(StyleTag::from_style_name("heading 3"), StyleTag::Heading(3));
        assert_eq!(StyleTag::from_style_name("Heading"), StyleTag::Heading(1));
        assert_eq!(StyleTag::from_style_name("Title"), StyleTag::Title);
        assert_eq!(StyleTag::from_style_name("ListParagraph"), StyleTag::Body);
    }

    #[test]
    fn test_styled_lines_stay_parallel() {
        let content = ExtractedContent::from_styled_lines(
            vec![
                ("Intro".to_string(), StyleTag::Heading(1)),
                ("First point".to_string(), StyleTag::Body),
            ],
            Modality::Docx,
        );

        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], ("Intro", Some(StyleTag::Heading(1))));
        assert_eq!(lines[1], ("First point", Some(StyleTag::Body)));
    }

    #[test]
    fn test_unstyled_lines_strip_carriage_returns() {
        let content = ExtractedContent::new("a\r\nb".to_string(), Modality::PlainText);
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec![("a", None), ("b", None)]);
    }
}
