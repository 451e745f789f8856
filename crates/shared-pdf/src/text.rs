//! Page text extraction
//!
//! Any backend that yields full text per page in reading order can stand in
//! for [`LopdfTextSource`]; the engine never sees anything but the strings.

use crate::error::PdfTextError;
use lopdf::{content::Content, Document, Object, ObjectId};
use shared_types::BrandKitDocument;
use tracing::{debug, warn};

/// TJ adjustments more negative than this (thousandths of an em) read as a word gap
const TJ_WORD_GAP: f32 = -100.0;

/// Produces the text of each page of a document, in page order
pub trait PageTextSource: Send + Sync {
    /// Extract one string per page (newline-delimited lines within a page)
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, PdfTextError>;

    /// Source identifier for logging
    fn name(&self) -> &str;
}

/// Text source that walks each page's content stream with lopdf.
///
/// Text-showing operators (`Tj`, `TJ`, `'`, `"`) supply the characters; the
/// positioning operators decide where one line ends and the next begins.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfTextSource;

impl LopdfTextSource {
    pub fn new() -> Self {
        Self
    }
}

impl PageTextSource for LopdfTextSource {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, PdfTextError> {
        if !is_pdf(bytes) {
            return Err(PdfTextError::NotAPdf);
        }

        let doc = Document::load_mem(bytes).map_err(|e| PdfTextError::Parse(e.to_string()))?;

        // BTreeMap keyed by page number, so iteration is already in page order
        let pages = doc.get_pages();
        if pages.is_empty() {
            return Err(PdfTextError::Empty);
        }

        let texts = pages
            .iter()
            .map(|(&number, &page_id)| match page_text(&doc, page_id) {
                Ok(text) => text,
                Err(e) => {
                    // Keep the slot so page order and count survive
                    warn!("Could not extract text from page {}: {}", number, e);
                    String::new()
                }
            })
            .collect::<Vec<_>>();

        debug!("Extracted text from {} pages", texts.len());
        Ok(texts)
    }

    fn name(&self) -> &str {
        "lopdf"
    }
}

/// Returns true if the bytes start with the `%PDF-` magic
pub fn is_pdf(head: &[u8]) -> bool {
    head.starts_with(b"%PDF-")
}

/// Read an uploaded brand kit into a [`BrandKitDocument`]
pub fn load_brand_kit(
    source: &dyn PageTextSource,
    filename: &str,
    bytes: &[u8],
) -> Result<BrandKitDocument, PdfTextError> {
    let pages = source.page_texts(bytes)?;
    debug!(
        "Loaded brand kit '{}' via {} ({} pages)",
        filename,
        source.name(),
        pages.len()
    );
    Ok(BrandKitDocument::new(filename, pages))
}

/// Concatenated content streams of one page
fn page_content(doc: &Document, page_id: ObjectId) -> lopdf::Result<Vec<u8>> {
    let mut content = Vec::new();
    for stream_id in doc.get_page_contents(page_id) {
        let stream = doc.get_object(stream_id)?.as_stream()?;
        let data = if stream.dict.has(b"Filter") {
            stream.decompressed_content()?
        } else {
            stream.content.clone()
        };
        content.extend_from_slice(&data);
        content.push(b'\n');
    }
    Ok(content)
}

/// Text of one page, one `\n`-terminated line per text line.
///
/// A line ends at `ET`, `T*`, `'`, `"`, a `Td`/`TD` with a vertical offset,
/// or a `Tm` that moves to a new baseline. A purely horizontal `Td` inserts a
/// space. Lines with no visible text are dropped.
fn page_text(doc: &Document, page_id: ObjectId) -> lopdf::Result<String> {
    let content = Content::decode(&page_content(doc, page_id)?)?;
    let mut lines = LineBuffer::default();
    let mut baseline: Option<f32> = None;

    for op in &content.operations {
        match op.operator.as_str() {
            "Tj" | "TJ" => lines.push_operands(&op.operands),
            "'" | "\"" => {
                lines.break_line();
                lines.push_operands(&op.operands);
            }
            "T*" | "ET" => lines.break_line(),
            "Td" | "TD" => match operand_pair(&op.operands) {
                Some((_, ty)) if ty != 0.0 => lines.break_line(),
                Some((tx, _)) if tx != 0.0 => lines.push_space(),
                _ => {}
            },
            "Tm" => {
                let y = op.operands.get(5).and_then(|o| o.as_float().ok());
                if y != baseline {
                    lines.break_line();
                }
                baseline = y;
            }
            _ => {}
        }
    }

    Ok(lines.finish())
}

fn operand_pair(operands: &[Object]) -> Option<(f32, f32)> {
    match operands {
        [x, y, ..] => Some((x.as_float().ok()?, y.as_float().ok()?)),
        _ => None,
    }
}

#[derive(Default)]
struct LineBuffer {
    text: String,
    current: String,
}

impl LineBuffer {
    fn push_operands(&mut self, operands: &[Object]) {
        for operand in operands {
            self.push_object(operand);
        }
    }

    fn push_object(&mut self, object: &Object) {
        match object {
            Object::String(bytes, _) => self.current.push_str(&decode_pdf_string(bytes)),
            Object::Array(items) => {
                for item in items {
                    match item {
                        Object::String(..) => self.push_object(item),
                        Object::Integer(_) | Object::Real(_) => {
                            if item.as_float().map_or(false, |n| n < TJ_WORD_GAP) {
                                self.push_space();
                            }
                        }
                        _ => {}
                    }
                }
            }
            // Spacing operands of `"`
            _ => {}
        }
    }

    fn push_space(&mut self) {
        if !self.current.is_empty() && !self.current.ends_with(' ') {
            self.current.push(' ');
        }
    }

    fn break_line(&mut self) {
        let line = self.current.trim_end();
        if !line.trim().is_empty() {
            self.text.push_str(line);
            self.text.push('\n');
        }
        self.current.clear();
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.text
    }
}

/// Decode a PDF string operand: UTF-16BE with BOM, then UTF-8, then Latin-1
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
