//! DOCX content extraction using docx-rs.
//!
//! Extracts paragraph text in document order together with the paragraph
//! style of every line, so heading paragraphs can drive structure analysis.

use crate::error::{ExtractError, ExtractResult};
use crate::types::{DocumentStructure, ExtractedContent, Modality, StyleTag, MIME_DOCX};
use crate::Extractor;
use async_trait::async_trait;
use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableChild, TableRowChild};
use tracing::debug;

/// DOCX content extractor using docx-rs library.
///
/// Extracts text from DOCX files including paragraphs and tables, tagging
/// every output line with its paragraph style. Wraps synchronous docx-rs
/// calls in spawn_blocking to avoid blocking the async runtime.
#[derive(Debug, Clone, Default)]
pub struct DocxExtractor {
    /// Whether to preserve table structure in output.
    preserve_tables: bool,
    /// Whether to surface heading styles (otherwise every line is body).
    extract_headings: bool,
}

impl DocxExtractor {
    /// Create new DOCX extractor with default settings.
    pub fn new() -> Self {
        Self {
            preserve_tables: true,
            extract_headings: true,
        }
    }

    /// Configure whether to preserve table structure.
    pub fn with_tables(mut self, preserve: bool) -> Self {
        self.preserve_tables = preserve;
        self
    }

    /// Configure whether to surface heading styles.
    pub fn with_headings(mut self, extract: bool) -> Self {
        self.extract_headings = extract;
        self
    }

    /// Extract styled lines synchronously (called within spawn_blocking).
    fn extract_sync(
        content: Vec<u8>,
        preserve_tables: bool,
        extract_headings: bool,
    ) -> Result<Vec<(String, StyleTag)>, ExtractError> {
        let docx = docx_rs::read_docx(&content)
            .map_err(|e| ExtractError::Docx(format!("Failed to parse DOCX: {}", e)))?;

        let mut lines: Vec<(String, StyleTag)> = Vec::new();

        for child in docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => {
                    let para_text = Self::extract_paragraph_text(&p);
                    let style = if extract_headings {
                        p.property
                            .style
                            .as_ref()
                            .map(|s| StyleTag::from_style_name(&s.val))
                            .unwrap_or_default()
                    } else {
                        StyleTag::Body
                    };

                    // Soft breaks split a paragraph into several lines of
                    // the same style.
                    for line in para_text.split('\n') {
                        lines.push((line.to_string(), style));
                    }
                }
                DocumentChild::Table(t) => {
                    if preserve_tables {
                        for row in Self::extract_table_rows(&t) {
                            if !row.trim().is_empty() {
                                lines.push((row, StyleTag::Body));
                            }
                        }
                    } else {
                        for row in &t.rows {
                            let TableChild::TableRow(r) = row;
                            for cell in &r.cells {
                                let TableRowChild::TableCell(c) = cell;
                                for child in &c.children {
                                    if let docx_rs::TableCellContent::Paragraph(p) = child {
                                        let cell_text = Self::extract_paragraph_text(p);
                                        for line in cell_text.split('\n') {
                                            if !line.trim().is_empty() {
                                                lines.push((line.to_string(), StyleTag::Body));
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(lines)
    }

    /// Extract text from a paragraph.
    fn extract_paragraph_text(p: &docx_rs::Paragraph) -> String {
        let mut text = String::new();

        for child in &p.children {
            match child {
                ParagraphChild::Run(r) => {
                    for run_child in &r.children {
                        match run_child {
                            RunChild::Text(t) => text.push_str(&t.text),
                            RunChild::Tab(_) => text.push('\t'),
                            RunChild::Break(_) => text.push('\n'),
                            _ => {}
                        }
                    }
                }
                ParagraphChild::Hyperlink(h) => {
                    for child in &h.children {
                        if let ParagraphChild::Run(r) = child {
                            for run_child in &r.children {
                                if let RunChild::Text(t) = run_child {
                                    text.push_str(&t.text);
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        text
    }

    /// Extract table rows as `cell | cell` lines.
    fn extract_table_rows(t: &docx_rs::Table) -> Vec<String> {
        let mut rows: Vec<String> = Vec::new();

        for row in &t.rows {
            let TableChild::TableRow(r) = row;
            let mut cells: Vec<String> = Vec::new();
            for cell in &r.cells {
                let TableRowChild::TableCell(c) = cell;
                let mut cell_text = String::new();
                for child in &c.children {
                    if let docx_rs::TableCellContent::Paragraph(p) = child {
                        let para = Self::extract_paragraph_text(p);
                        if !cell_text.is_empty() && !para.is_empty() {
                            cell_text.push(' ');
                        }
                        cell_text.push_str(&para.replace('\n', " "));
                    }
                }
                cells.push(cell_text.trim().to_string());
            }
            rows.push(cells.join(" | "));
        }

        rows
    }
}

#[async_trait]
impl Extractor for DocxExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();
        let preserve_tables = self.preserve_tables;
        let extract_headings = self.extract_headings;

        let lines = tokio::task::spawn_blocking(move || {
            Self::extract_sync(content, preserve_tables, extract_headings)
        })
        .await??;

        let headings: Vec<String> = lines
            .iter()
            .filter(|(text, style)| style.is_heading() && !text.trim().is_empty())
            .map(|(text, _)| text.trim().to_string())
            .collect();
        debug!(lines = lines.len(), headings = headings.len(), "Extracted DOCX text");

        let structure = DocumentStructure {
            page_count: None, // DOCX doesn't have inherent page structure
            sections: headings,
        };

        Ok(ExtractedContent::from_styled_lines(lines, Modality::Docx)
            .with_structure(structure)
            .with_metadata("original_size", content_len))
    }

    fn supported_types(&self) -> &[&str] {
        &[MIME_DOCX]
    }

    fn name(&self) -> &str {
        "docx-rs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{BreakType, Docx, Paragraph, Run, Table, TableCell, TableRow};
    use std::io::Cursor;

    fn build_docx(paragraphs: &[(&str, Option<&str>)]) -> Vec<u8> {
        let mut docx = Docx::new();
        for (text, style) in paragraphs {
            let mut paragraph = Paragraph::new().add_run(Run::new().add_text(*text));
            if let Some(style) = style {
                paragraph = paragraph.style(style);
            }
            docx = docx.add_paragraph(paragraph);
        }

        let mut buffer = Cursor::new(Vec::new());
        docx.build().pack(&mut buffer).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_docx_extractor_creation() {
        let extractor = DocxExtractor::new();
        assert_eq!(extractor.name(), "docx-rs");
        assert!(extractor
            .supports("application/vnd.openxmlformats-officedocument.wordprocessingml.document"));
        assert!(!extractor.supports("application/pdf"));
    }

    #[tokio::test]
    async fn test_docx_extractor_empty_content() {
        let extractor = DocxExtractor::new();
        let result = extractor.extract(&[]).await;
        assert!(result.unwrap_err().is_decode());
    }

    #[test]
    fn test_docx_extractor_configuration() {
        let extractor = DocxExtractor::new().with_tables(false).with_headings(true);

        assert!(!extractor.preserve_tables);
        assert!(extractor.extract_headings);
    }

    #[tokio::test]
    async fn test_docx_heading_styles_are_surfaced() {
        let bytes = build_docx(&[
            ("Introduction", Some("Heading1")),
            ("Why it matters", None),
            ("Details", Some("Heading2")),
            ("Wrap up", Some("Heading1")),
            ("Final thought", None),
        ]);

        let result = DocxExtractor::new().extract(&bytes).await.unwrap();
        let lines: Vec<_> = result.lines().collect();

        assert_eq!(lines[0], ("Introduction", Some(StyleTag::Heading(1))));
        assert_eq!(lines[1], ("Why it matters", Some(StyleTag::Body)));
        assert_eq!(lines[2], ("Details", Some(StyleTag::Heading(2))));
        assert_eq!(
            result.structure.unwrap().sections,
            vec!["Introduction", "Details", "Wrap up"]
        );
    }

    #[tokio::test]
    async fn test_unpreserved_table_cells_keep_styles_aligned() {
        let cell = TableCell::new().add_paragraph(
            Paragraph::new().add_run(
                Run::new()
                    .add_text("left")
                    .add_break(BreakType::TextWrapping)
                    .add_text("right"),
            ),
        );
        let docx = Docx::new()
            .add_table(Table::new(vec![TableRow::new(vec![cell])]))
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Intro"))
                    .style("Heading1"),
            )
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("body")));
        let mut buffer = Cursor::new(Vec::new());
        docx.build().pack(&mut buffer).unwrap();

        let result = DocxExtractor::new()
            .with_tables(false)
            .extract(&buffer.into_inner())
            .await
            .unwrap();
        let lines: Vec<_> = result.lines().collect();

        assert_eq!(result.styles.as_ref().unwrap().len(), result.text.split('\n').count());
        assert_eq!(lines[0], ("left", Some(StyleTag::Body)));
        assert_eq!(lines[1], ("right", Some(StyleTag::Body)));
        assert_eq!(lines[2], ("Intro", Some(StyleTag::Heading(1))));
        assert_eq!(lines[3], ("body", Some(StyleTag::Body)));
    }

    #[tokio::test]
    async fn test_docx_headings_can_be_ignored() {
        let bytes = build_docx(&[("Introduction", Some("Heading1")), ("Body", None)]);

        let result = DocxExtractor::new()
            .with_headings(false)
            .extract(&bytes)
            .await
            .unwrap();

        assert!(result
            .styles
            .unwrap()
            .iter()
            .all(|s| *s == StyleTag::Body));
    }
}
