//! Word 97-2003 (`.doc`) text extraction.
//!
//! A `.doc` file is an OLE compound file. The `WordDocument` stream starts
//! with the File Information Block (FIB), which locates the piece table
//! (`Clx`) inside the `0Table` or `1Table` stream. The piece table maps
//! character positions of the main document to byte ranges of the
//! `WordDocument` stream, each either 8-bit (cp1252) or UTF-16LE.
//!
//! Paragraph styles come from two more FIB entries: the stylesheet (`STSH`)
//! maps a style index to a built-in style id, and `PlcBtePapx` lists the
//! paragraph property pages (FKPs) that map stream offsets of paragraph
//! marks to a style index.

use std::io::{Cursor, Read};

use crate::error::{ExtractError, ExtractResult};
use crate::types::{DocumentStructure, ExtractedContent, Modality, StyleTag, MIME_DOC};
use crate::Extractor;
use async_trait::async_trait;
use tracing::debug;

const FIB_MAGIC: u16 = 0xA5EC;
const FIB_FLAGS_OFFSET: usize = 0x000A;
const FIB_CCP_TEXT_OFFSET: usize = 0x004C;
const FIB_FC_STSHF_OFFSET: usize = 0x00A2;
const FIB_LCB_STSHF_OFFSET: usize = 0x00A6;
const FIB_FC_BTE_PAPX_OFFSET: usize = 0x0102;
const FIB_LCB_BTE_PAPX_OFFSET: usize = 0x0106;
const FIB_FC_CLX_OFFSET: usize = 0x01A2;
const FIB_LCB_CLX_OFFSET: usize = 0x01A6;

const FLAG_ENCRYPTED: u16 = 0x0100;
const FLAG_WHICH_TABLE: u16 = 0x0200;

const CLX_PRC: u8 = 0x01;
const CLX_PCDT: u8 = 0x02;
const PCD_SIZE: usize = 8;
const FC_COMPRESSED: u32 = 0x4000_0000;
const FC_MASK: u32 = 0x3FFF_FFFF;

const FKP_SIZE: usize = 512;
const BX_PAP_SIZE: usize = 13;
const PN_MASK: u32 = 0x003F_FFFF;
const STI_MASK: u16 = 0x0FFF;
const STI_TITLE: u16 = 62;

/// Legacy Word document extractor reading the piece table via cfb.
#[derive(Debug, Clone, Default)]
pub struct DocExtractor;

/// One piece of the main document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Piece {
    cp_start: u32,
    cp_end: u32,
    /// Byte offset in the WordDocument stream.
    offset: usize,
    compressed: bool,
}

/// Stream offsets `[fc_start, fc_end)` sharing one paragraph style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParagraphRun {
    fc_start: u32,
    fc_end: u32,
    istd: u16,
}

/// Paragraph style lookup by stream offset of the paragraph mark.
#[derive(Debug, Default)]
struct StyleMap {
    /// Built-in style id per style index; `None` for empty slots.
    stis: Vec<Option<u16>>,
    /// Sorted by `fc_start`.
    runs: Vec<ParagraphRun>,
}

impl StyleMap {
    fn parse(word: &[u8], stsh: &[u8], plc_bte_papx: &[u8]) -> ExtractResult<Self> {
        let stis = parse_stylesheet(stsh)?;
        let mut runs = parse_bte_papx(word, plc_bte_papx)?;
        runs.sort_by_key(|run| run.fc_start);
        Ok(Self { stis, runs })
    }

    fn style_at(&self, fc: usize) -> StyleTag {
        let Ok(fc) = u32::try_from(fc) else {
            return StyleTag::Body;
        };
        let idx = self.runs.partition_point(|run| run.fc_start <= fc);
        idx.checked_sub(1)
            .map(|i| self.runs[i])
            .filter(|run| fc < run.fc_end)
            .and_then(|run| self.stis.get(run.istd as usize).copied().flatten())
            .map(style_for_sti)
            .unwrap_or_default()
    }
}

impl DocExtractor {
    /// Create new DOC extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract main document lines synchronously (called within
    /// spawn_blocking). The flag tells whether the file carried styles.
    fn extract_sync(content: Vec<u8>) -> ExtractResult<(Vec<(String, StyleTag)>, bool)> {
        let mut file = cfb::CompoundFile::open(Cursor::new(content))
            .map_err(|e| ExtractError::Doc(format!("Not an OLE compound file: {}", e)))?;

        let word = read_stream(&mut file, "/WordDocument")?;

        let magic = read_u16(&word, 0)?;
        if magic != FIB_MAGIC {
            return Err(ExtractError::Doc(format!(
                "Unexpected FIB magic 0x{:04X}",
                magic
            )));
        }

        let flags = read_u16(&word, FIB_FLAGS_OFFSET)?;
        if flags & FLAG_ENCRYPTED != 0 {
            return Err(ExtractError::Doc("Encrypted documents are not supported".to_string()));
        }

        let ccp_text = read_u32(&word, FIB_CCP_TEXT_OFFSET)?;
        let fc_clx = read_u32(&word, FIB_FC_CLX_OFFSET)? as usize;
        let lcb_clx = read_u32(&word, FIB_LCB_CLX_OFFSET)? as usize;

        let table_name = if flags & FLAG_WHICH_TABLE != 0 {
            "/1Table"
        } else {
            "/0Table"
        };
        let table = read_stream(&mut file, table_name)?;
        let clx = slice(&table, fc_clx, lcb_clx)?;

        let pieces = parse_clx(clx)?;
        debug!(pieces = pieces.len(), ccp_text, "Parsed DOC piece table");

        let mut raw: Vec<(char, usize)> = Vec::new();
        for piece in pieces {
            if piece.cp_start >= ccp_text {
                break;
            }
            let cp_end = piece.cp_end.min(ccp_text);
            let chars = (cp_end - piece.cp_start) as usize;
            decode_piece(&word, &piece, chars, &mut raw)?;
        }

        let styles = read_style_map(&word, &table)?;
        let lines = split_lines(&raw, styles.as_ref());
        Ok((lines, styles.is_some()))
    }
}

/// Load the style tables, if the FIB points at both of them.
fn read_style_map(word: &[u8], table: &[u8]) -> ExtractResult<Option<StyleMap>> {
    let fc_stshf = read_u32(word, FIB_FC_STSHF_OFFSET)? as usize;
    let lcb_stshf = read_u32(word, FIB_LCB_STSHF_OFFSET)? as usize;
    let fc_bte = read_u32(word, FIB_FC_BTE_PAPX_OFFSET)? as usize;
    let lcb_bte = read_u32(word, FIB_LCB_BTE_PAPX_OFFSET)? as usize;

    if lcb_stshf == 0 || lcb_bte == 0 {
        return Ok(None);
    }

    let map = StyleMap::parse(
        word,
        slice(table, fc_stshf, lcb_stshf)?,
        slice(table, fc_bte, lcb_bte)?,
    )?;
    debug!(styles = map.stis.len(), runs = map.runs.len(), "Parsed DOC paragraph styles");
    Ok(Some(map))
}

fn read_stream<F: Read + std::io::Seek>(
    file: &mut cfb::CompoundFile<F>,
    path: &str,
) -> ExtractResult<Vec<u8>> {
    let mut stream = file
        .open_stream(path)
        .map_err(|e| ExtractError::Doc(format!("Missing stream {}: {}", path, e)))?;
    let mut buffer = Vec::new();
    stream
        .read_to_end(&mut buffer)
        .map_err(|e| ExtractError::Doc(format!("Unreadable stream {}: {}", path, e)))?;
    Ok(buffer)
}

fn slice(data: &[u8], offset: usize, len: usize) -> ExtractResult<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| {
            ExtractError::Doc(format!(
                "Truncated document: need {} bytes at offset {}",
                len, offset
            ))
        })
}

fn read_u8(data: &[u8], offset: usize) -> ExtractResult<u8> {
    Ok(slice(data, offset, 1)?[0])
}

fn read_u16(data: &[u8], offset: usize) -> ExtractResult<u16> {
    let bytes = slice(data, offset, 2)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], offset: usize) -> ExtractResult<u32> {
    let bytes = slice(data, offset, 4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Walk the Clx: skip property modifiers, then read the piece table.
fn parse_clx(clx: &[u8]) -> ExtractResult<Vec<Piece>> {
    let mut pos = 0;
    while pos < clx.len() {
        match clx[pos] {
            CLX_PRC => {
                let size = read_u16(clx, pos + 1)? as usize;
                pos += 3 + size;
            }
            CLX_PCDT => {
                let lcb = read_u32(clx, pos + 1)? as usize;
                let plc = slice(clx, pos + 5, lcb)?;
                return parse_plc_pcd(plc);
            }
            other => {
                return Err(ExtractError::Doc(format!(
                    "Unexpected Clx entry 0x{:02X}",
                    other
                )))
            }
        }
    }
    Err(ExtractError::Doc("Piece table not found".to_string()))
}

/// PlcPcd: n+1 character positions followed by n 8-byte piece descriptors.
fn parse_plc_pcd(plc: &[u8]) -> ExtractResult<Vec<Piece>> {
    if plc.len() < 4 || (plc.len() - 4) % (4 + PCD_SIZE) != 0 {
        return Err(ExtractError::Doc("Malformed piece table".to_string()));
    }
    let count = (plc.len() - 4) / (4 + PCD_SIZE);
    let pcd_base = (count + 1) * 4;

    let mut pieces = Vec::with_capacity(count);
    for i in 0..count {
        let cp_start = read_u32(plc, i * 4)?;
        let cp_end = read_u32(plc, (i + 1) * 4)?;
        if cp_end < cp_start {
            return Err(ExtractError::Doc("Piece table positions out of order".to_string()));
        }
        let fc = read_u32(plc, pcd_base + i * PCD_SIZE + 2)?;
        let compressed = fc & FC_COMPRESSED != 0;
        let fc = fc & FC_MASK;
        let offset = (if compressed { fc / 2 } else { fc }) as usize;
        pieces.push(Piece {
            cp_start,
            cp_end,
            offset,
            compressed,
        });
    }
    Ok(pieces)
}

/// Decode `chars` characters of a piece, each with its stream offset.
fn decode_piece(
    word: &[u8],
    piece: &Piece,
    chars: usize,
    out: &mut Vec<(char, usize)>,
) -> ExtractResult<()> {
    if piece.compressed {
        let bytes = slice(word, piece.offset, chars)?;
        out.extend(
            bytes
                .iter()
                .enumerate()
                .map(|(i, b)| (cp1252_char(*b), piece.offset + i)),
        );
    } else {
        let bytes = slice(word, piece.offset, chars * 2)?;
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        let mut unit = 0;
        for decoded in char::decode_utf16(units) {
            let (c, width) = match decoded {
                Ok(c) => (c, c.len_utf16()),
                Err(_) => (char::REPLACEMENT_CHARACTER, 1),
            };
            out.push((c, piece.offset + unit * 2));
            unit += width;
        }
    }
    Ok(())
}

/// Map an 8-bit piece byte. Only 0x80..=0x9F differ from Latin-1.
fn cp1252_char(byte: u8) -> char {
    match byte {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x8B => '\u{2039}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x99 => '\u{2122}',
        0x9B => '\u{203A}',
        other => other as char,
    }
}

/// STSH: `cbStshi`, the Stshi (starting with `cstd`), then `cstd`
/// length-prefixed STDs whose first word holds the built-in style id.
fn parse_stylesheet(stsh: &[u8]) -> ExtractResult<Vec<Option<u16>>> {
    let cb_stshi = read_u16(stsh, 0)? as usize;
    let cstd = read_u16(stsh, 2)? as usize;

    let mut pos = 2 + cb_stshi;
    let mut stis = Vec::with_capacity(cstd);
    for _ in 0..cstd {
        let cb_std = read_u16(stsh, pos)? as usize;
        pos += 2;
        if cb_std == 0 {
            stis.push(None);
            continue;
        }
        let std = slice(stsh, pos, cb_std)?;
        stis.push(Some(read_u16(std, 0)? & STI_MASK));
        pos += cb_std;
    }
    Ok(stis)
}

/// PlcBtePapx: n+1 stream offsets followed by n FKP page numbers.
fn parse_bte_papx(word: &[u8], plc: &[u8]) -> ExtractResult<Vec<ParagraphRun>> {
    if plc.len() < 4 || (plc.len() - 4) % 8 != 0 {
        return Err(ExtractError::Doc("Malformed paragraph bin table".to_string()));
    }
    let count = (plc.len() - 4) / 8;
    let pn_base = (count + 1) * 4;

    let mut runs = Vec::new();
    for i in 0..count {
        let pn = (read_u32(plc, pn_base + i * 4)? & PN_MASK) as usize;
        let page = slice(word, pn * FKP_SIZE, FKP_SIZE)?;
        runs.extend(parse_papx_fkp(page)?);
    }
    Ok(runs)
}

/// PapxFkp: `crun` in the last byte, `crun + 1` offsets, then `crun`
/// BxPap entries whose first byte is the word offset of the PAPX.
fn parse_papx_fkp(page: &[u8]) -> ExtractResult<Vec<ParagraphRun>> {
    let crun = read_u8(page, FKP_SIZE - 1)? as usize;
    let bx_base = (crun + 1) * 4;
    if bx_base + crun * BX_PAP_SIZE > FKP_SIZE - 1 {
        return Err(ExtractError::Doc(format!(
            "Paragraph property page claims {} runs",
            crun
        )));
    }

    let mut runs = Vec::with_capacity(crun);
    for i in 0..crun {
        let fc_start = read_u32(page, i * 4)?;
        let fc_end = read_u32(page, (i + 1) * 4)?;
        let papx = read_u8(page, bx_base + i * BX_PAP_SIZE)? as usize * 2;
        // A zero offset means default properties, i.e. the Normal style.
        let istd = if papx == 0 { 0 } else { read_papx_istd(page, papx)? };
        runs.push(ParagraphRun {
            fc_start,
            fc_end,
            istd,
        });
    }
    Ok(runs)
}

/// PapxInFkp: a size byte (`cb`, or `0` then `cb'`) then the style index.
fn read_papx_istd(page: &[u8], offset: usize) -> ExtractResult<u16> {
    let cb = read_u8(page, offset)? as usize;
    let (start, len) = if cb == 0 {
        (offset + 2, 2 * read_u8(page, offset + 1)? as usize)
    } else {
        (offset + 1, 2 * cb - 1)
    };
    if len < 2 {
        return Err(ExtractError::Doc("Paragraph properties without a style".to_string()));
    }
    read_u16(page, start)
}

fn style_for_sti(sti: u16) -> StyleTag {
    match sti {
        1..=9 => StyleTag::Heading(sti as u8),
        STI_TITLE => StyleTag::Title,
        _ => StyleTag::Body,
    }
}

/// Turn Word control characters into styled plain text lines.
///
/// Paragraph marks and cell marks end a paragraph; every line of the
/// paragraph takes the style of its mark. Vertical tabs end a line, page
/// and section breaks add a blank line. Field codes (between 0x13 and 0x14)
/// are dropped while field results are kept.
fn split_lines(raw: &[(char, usize)], styles: Option<&StyleMap>) -> Vec<(String, StyleTag)> {
    let mut lines: Vec<(String, StyleTag)> = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut current = String::new();
    // One entry per open field: true while still inside its code part.
    let mut in_field_code: Vec<bool> = Vec::new();

    for &(c, fc) in raw {
        match c {
            '\u{13}' => in_field_code.push(true),
            '\u{14}' => {
                if let Some(last) = in_field_code.last_mut() {
                    *last = false;
                }
            }
            '\u{15}' => {
                in_field_code.pop();
            }
            _ if in_field_code.iter().any(|code| *code) => {}
            '\r' | '\u{07}' => {
                paragraph.push(std::mem::take(&mut current));
                let style = styles.map(|s| s.style_at(fc)).unwrap_or_default();
                lines.extend(paragraph.drain(..).map(|line| {
                    let style = if line.trim().is_empty() {
                        StyleTag::Body
                    } else {
                        style
                    };
                    (line, style)
                }));
            }
            '\u{0B}' => paragraph.push(std::mem::take(&mut current)),
            '\u{0C}' => {
                paragraph.push(std::mem::take(&mut current));
                paragraph.push(String::new());
            }
            '\t' => current.push('\t'),
            c if c.is_control() => {}
            c => current.push(c),
        }
    }

    // Text after the last paragraph mark has no style of its own.
    paragraph.push(current);
    lines.extend(paragraph.into_iter().map(|line| (line, StyleTag::Body)));

    while matches!(lines.last(), Some((line, _)) if line.is_empty()) {
        lines.pop();
    }
    lines
}

/// A panicked parser task is a decode failure of the document.
fn join_error(e: tokio::task::JoinError) -> ExtractError {
    if e.is_panic() {
        ExtractError::Doc("DOC parser aborted on malformed input".to_string())
    } else {
        ExtractError::TaskJoin(e)
    }
}

#[async_trait]
impl Extractor for DocExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();

        let (lines, styled) = tokio::task::spawn_blocking(move || Self::extract_sync(content))
            .await
            .map_err(join_error)??;

        if !styled {
            let text = lines
                .into_iter()
                .map(|(line, _)| line)
                .collect::<Vec<_>>()
                .join("\n");
            return Ok(ExtractedContent::new(text, Modality::LegacyDoc)
                .with_metadata("original_size", content_len));
        }

        let headings: Vec<String> = lines
            .iter()
            .filter(|(text, style)| style.is_heading() && !text.trim().is_empty())
            .map(|(text, _)| text.trim().to_string())
            .collect();
        debug!(lines = lines.len(), headings = headings.len(), "Extracted DOC text");

        let structure = DocumentStructure {
            page_count: None,
            sections: headings,
        };

        Ok(ExtractedContent::from_styled_lines(lines, Modality::LegacyDoc)
            .with_structure(structure)
            .with_metadata("original_size", content_len))
    }

    fn supported_types(&self) -> &[&str] {
        &[MIME_DOC]
    }

    fn name(&self) -> &str {
        "cfb-piece-table"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TEXT_OFFSET: usize = 0x200;
    const FKP_PAGE: usize = 2;

    const ISTD_NORMAL: u16 = 0;
    const ISTD_HEADING_1: u16 = 1;
    const ISTD_TITLE: u16 = 2;
    const ISTD_HEADING_2: u16 = 3;

    fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
        buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// FIB plus a single 8-bit piece at `TEXT_OFFSET`, and its Clx.
    fn word_and_clx(encoded: &[u8]) -> (Vec<u8>, Vec<u8>) {
        let mut word = vec![0u8; TEXT_OFFSET];
        word[0..2].copy_from_slice(&FIB_MAGIC.to_le_bytes());
        put_u32(&mut word, FIB_CCP_TEXT_OFFSET, encoded.len() as u32);

        let mut plc = Vec::new();
        plc.extend_from_slice(&0u32.to_le_bytes());
        plc.extend_from_slice(&(encoded.len() as u32).to_le_bytes());
        plc.extend_from_slice(&0u16.to_le_bytes());
        plc.extend_from_slice(&(((TEXT_OFFSET * 2) as u32) | FC_COMPRESSED).to_le_bytes());
        plc.extend_from_slice(&0u16.to_le_bytes());

        let mut clx = vec![CLX_PCDT];
        clx.extend_from_slice(&(plc.len() as u32).to_le_bytes());
        clx.extend_from_slice(&plc);

        put_u32(&mut word, FIB_FC_CLX_OFFSET, 0);
        put_u32(&mut word, FIB_LCB_CLX_OFFSET, clx.len() as u32);
        word.extend_from_slice(encoded);
        (word, clx)
    }

    fn pack(word: &[u8], table: &[u8]) -> Vec<u8> {
        let mut file = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
        {
            let mut stream = file.create_stream("/WordDocument").unwrap();
            stream.write_all(word).unwrap();
        }
        {
            let mut stream = file.create_stream("/0Table").unwrap();
            stream.write_all(table).unwrap();
        }
        file.flush().unwrap();
        file.into_inner().into_inner()
    }

    /// Build a minimal Word 97 file whose main text is a single 8-bit piece.
    fn build_doc(text: &str) -> Vec<u8> {
        let encoded: Vec<u8> = text.chars().map(|c| c as u8).collect();
        let (word, clx) = word_and_clx(&encoded);
        pack(&word, &clx)
    }

    /// Stylesheet with Normal, Heading 1, Title and Heading 2.
    fn stylesheet() -> Vec<u8> {
        let stis = [0u16, 1, STI_TITLE, 2];
        let mut stsh = Vec::new();
        stsh.extend_from_slice(&18u16.to_le_bytes());
        let mut stshi = vec![0u8; 18];
        stshi[0..2].copy_from_slice(&(stis.len() as u16).to_le_bytes());
        stshi[2..4].copy_from_slice(&10u16.to_le_bytes());
        stsh.extend_from_slice(&stshi);
        for sti in stis {
            stsh.extend_from_slice(&10u16.to_le_bytes());
            let mut std = vec![0u8; 10];
            std[0..2].copy_from_slice(&sti.to_le_bytes());
            stsh.extend_from_slice(&std);
        }
        stsh
    }

    /// Build a Word 97 file with one paragraph per entry, each carrying the
    /// given style index in a single paragraph property page.
    fn build_styled_doc(paragraphs: &[(&str, u16)]) -> Vec<u8> {
        let text: String = paragraphs.iter().map(|(p, _)| format!("{}\r", p)).collect();
        let encoded: Vec<u8> = text.chars().map(|c| c as u8).collect();
        assert!(encoded.len() < FKP_SIZE);
        let (mut word, clx) = word_and_clx(&encoded);

        let mut fkp = vec![0u8; FKP_SIZE];
        let bx_base = (paragraphs.len() + 1) * 4;
        let mut fc = TEXT_OFFSET as u32;
        for (i, (paragraph, istd)) in paragraphs.iter().enumerate() {
            put_u32(&mut fkp, i * 4, fc);
            fc += paragraph.len() as u32 + 1;

            let papx = 0x100 + i * 4;
            fkp[bx_base + i * BX_PAP_SIZE] = (papx / 2) as u8;
            fkp[papx] = 0;
            fkp[papx + 1] = 1;
            fkp[papx + 2..papx + 4].copy_from_slice(&istd.to_le_bytes());
        }
        put_u32(&mut fkp, paragraphs.len() * 4, fc);
        fkp[FKP_SIZE - 1] = paragraphs.len() as u8;

        word.resize(FKP_PAGE * FKP_SIZE, 0);
        word.extend_from_slice(&fkp);

        let stsh = stylesheet();
        let mut bte = Vec::new();
        bte.extend_from_slice(&(TEXT_OFFSET as u32).to_le_bytes());
        bte.extend_from_slice(&fc.to_le_bytes());
        bte.extend_from_slice(&(FKP_PAGE as u32).to_le_bytes());

        let mut table = clx;
        put_u32(&mut word, FIB_FC_STSHF_OFFSET, table.len() as u32);
        put_u32(&mut word, FIB_LCB_STSHF_OFFSET, stsh.len() as u32);
        table.extend_from_slice(&stsh);
        put_u32(&mut word, FIB_FC_BTE_PAPX_OFFSET, table.len() as u32);
        put_u32(&mut word, FIB_LCB_BTE_PAPX_OFFSET, bte.len() as u32);
        table.extend_from_slice(&bte);

        pack(&word, &table)
    }

    fn plain_lines(raw: &str) -> Vec<String> {
        let chars: Vec<(char, usize)> = raw.chars().enumerate().map(|(i, c)| (c, i)).collect();
        split_lines(&chars, None).into_iter().map(|(line, _)| line).collect()
    }

    #[tokio::test]
    async fn test_doc_piece_table_extraction() {
        let bytes = build_doc("I. Start\rone\rtwo\r\x0CII. End\rlast\r");
        let result = DocExtractor::new().extract(&bytes).await.unwrap();

        assert_eq!(result.modality, Modality::LegacyDoc);
        assert_eq!(result.text, "I. Start\none\ntwo\n\n\nII. End\nlast");
        assert!(result.styles.is_none());
    }

    #[tokio::test]
    async fn test_doc_paragraph_styles_are_surfaced() {
        let bytes = build_styled_doc(&[
            ("Productivity", ISTD_TITLE),
            ("Start", ISTD_HEADING_1),
            ("why", ISTD_NORMAL),
            ("how", ISTD_NORMAL),
            ("Detail", ISTD_HEADING_2),
            ("End", ISTD_HEADING_1),
            ("recap", ISTD_NORMAL),
        ]);
        let result = DocExtractor::new().extract(&bytes).await.unwrap();

        assert_eq!(result.text, "Productivity\nStart\nwhy\nhow\nDetail\nEnd\nrecap");
        assert_eq!(
            result.styles.as_deref().unwrap(),
            &[
                StyleTag::Title,
                StyleTag::Heading(1),
                StyleTag::Body,
                StyleTag::Body,
                StyleTag::Heading(2),
                StyleTag::Heading(1),
                StyleTag::Body,
            ]
        );
        assert_eq!(
            result.structure.unwrap().sections,
            vec!["Start", "Detail", "End"]
        );
    }

    #[test]
    fn test_field_codes_are_dropped() {
        let raw = "See \u{13} HYPERLINK \"x\" \u{14}the site\u{15} now\r";
        assert_eq!(plain_lines(raw), vec!["See the site now"]);
    }

    #[test]
    fn test_soft_breaks_take_the_paragraph_style() {
        let map = StyleMap {
            stis: vec![Some(0), Some(1)],
            runs: vec![
                ParagraphRun {
                    fc_start: 0,
                    fc_end: 12,
                    istd: 1,
                },
                ParagraphRun {
                    fc_start: 12,
                    fc_end: 20,
                    istd: 0,
                },
            ],
        };

        let chars: Vec<(char, usize)> = "Two\x0Blines\rbody\r"
            .chars()
            .enumerate()
            .map(|(i, c)| (c, i + 1))
            .collect();
        let lines = split_lines(&chars, Some(&map));

        assert_eq!(
            lines,
            vec![
                ("Two".to_string(), StyleTag::Heading(1)),
                ("lines".to_string(), StyleTag::Heading(1)),
                ("body".to_string(), StyleTag::Body),
            ]
        );
    }

    #[test]
    fn test_papx_size_forms() {
        let mut page = vec![0u8; FKP_SIZE];
        // cb = 0, cb' = 1: two bytes holding the style index.
        page[0x40] = 0;
        page[0x41] = 1;
        page[0x42..0x44].copy_from_slice(&7u16.to_le_bytes());
        // cb = 2: three bytes, style index first.
        page[0x50] = 2;
        page[0x51..0x53].copy_from_slice(&3u16.to_le_bytes());
        // cb = 1: one byte, too short for a style index.
        page[0x60] = 1;

        assert_eq!(read_papx_istd(&page, 0x40).unwrap(), 7);
        assert_eq!(read_papx_istd(&page, 0x50).unwrap(), 3);
        assert!(matches!(read_papx_istd(&page, 0x60), Err(ExtractError::Doc(_))));
    }

    #[test]
    fn test_builtin_style_ids() {
        assert_eq!(style_for_sti(0), StyleTag::Body);
        assert_eq!(style_for_sti(1), StyleTag::Heading(1));
        assert_eq!(style_for_sti(9), StyleTag::Heading(9));
        assert_eq!(style_for_sti(STI_TITLE), StyleTag::Title);
        assert_eq!(style_for_sti(105), StyleTag::Body);
    }

    #[test]
    fn test_cp1252_quotes() {
        assert_eq!(cp1252_char(0x93), '\u{201C}');
        assert_eq!(cp1252_char(b'A'), 'A');
        assert_eq!(cp1252_char(0xE9), '\u{E9}');
    }

    #[test]
    fn test_piece_table_offsets() {
        let mut plc = Vec::new();
        plc.extend_from_slice(&0u32.to_le_bytes());
        plc.extend_from_slice(&5u32.to_le_bytes());
        plc.extend_from_slice(&0u16.to_le_bytes());
        plc.extend_from_slice(&0x400u32.to_le_bytes());
        plc.extend_from_slice(&0u16.to_le_bytes());

        let pieces = parse_plc_pcd(&plc).unwrap();
        assert_eq!(
            pieces,
            vec![Piece {
                cp_start: 0,
                cp_end: 5,
                offset: 0x400,
                compressed: false
            }]
        );
    }

    #[tokio::test]
    async fn test_non_ole_bytes_are_rejected() {
        let result = DocExtractor::new().extract(b"I. Start\nplain text").await;
        assert!(matches!(result, Err(ExtractError::Doc(_))));
    }

    #[tokio::test]
    async fn test_truncated_compound_file_is_a_doc_error() {
        let mut bytes = build_doc("I. Start\rone\r");
        bytes.truncate(1024);

        let result = DocExtractor::new().extract(&bytes).await;
        assert!(matches!(result, Err(ExtractError::Doc(_))));
    }

    #[tokio::test]
    async fn test_parser_panic_is_a_doc_error() {
        let panicked = tokio::task::spawn_blocking(|| -> ExtractResult<()> {
            panic!("corrupt piece table")
        })
        .await
        .unwrap_err();

        let err = join_error(panicked);
        assert!(matches!(err, ExtractError::Doc(_)));
        assert!(err.is_decode());
    }
}
