//! Positioned text extraction using lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object};
use tracing::{debug, trace};

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::order::{PageItem, TextFragment};

/// Kerning adjustment (thousandths of text space) treated as a word gap.
const WORD_GAP_ADJUSTMENT: f32 = -200.0;

/// PDF text engine built on lopdf content-stream decoding.
pub struct PdfExtractor {
    document: Option<Document>,
}

/// Affine matrix `[a b c d e f]` as used by PDF operators.
type Matrix = [f32; 6];

const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

fn multiply(m1: &Matrix, m2: &Matrix) -> Matrix {
    [
        m1[0] * m2[0] + m1[1] * m2[2],
        m1[0] * m2[1] + m1[1] * m2[3],
        m1[2] * m2[0] + m1[3] * m2[2],
        m1[2] * m2[1] + m1[3] * m2[3],
        m1[4] * m2[0] + m1[5] * m2[2] + m2[4],
        m1[4] * m2[1] + m1[5] * m2[3] + m2[5],
    ]
}

/// Graphics and text state needed to place text vertically.
#[derive(Debug, Clone)]
struct TextState {
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    leading: f32,
    rise: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            ctm: IDENTITY,
            ctm_stack: Vec::new(),
            text_matrix: IDENTITY,
            line_matrix: IDENTITY,
            leading: 0.0,
            rise: 0.0,
        }
    }
}

impl TextState {
    fn begin_text(&mut self) {
        self.text_matrix = IDENTITY;
        self.line_matrix = IDENTITY;
    }

    fn set_matrix(&mut self, m: Matrix) {
        self.text_matrix = m;
        self.line_matrix = m;
    }

    fn translate_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = multiply(&[1.0, 0.0, 0.0, 1.0, tx, ty], &self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.translate_line(0.0, -self.leading);
    }

    /// Vertical position of the current text origin in user space.
    fn y(&self) -> f32 {
        let rise = [1.0, 0.0, 0.0, 1.0, 0.0, self.rise];
        multiply(&multiply(&rise, &self.text_matrix), &self.ctm)[5]
    }
}

fn number(operand: Option<&Object>) -> Option<f32> {
    operand.and_then(|o| o.as_float().ok())
}

fn numbers<const N: usize>(operands: &[Object]) -> Option<[f32; N]> {
    if operands.len() < N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, operand) in out.iter_mut().zip(operands) {
        *slot = operand.as_float().ok()?;
    }
    Some(out)
}

/// Decode a PDF string operand.
///
/// UTF-16BE strings carry a byte-order mark; everything else is read as a
/// single-byte encoding.
fn decode_string(bytes: &[u8]) -> String {
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

fn show_text(operand: Option<&Object>) -> Option<String> {
    match operand? {
        Object::String(bytes, _) => Some(decode_string(bytes)),
        _ => None,
    }
}

/// Concatenate the strings of a `TJ` array, turning wide gaps into spaces.
fn show_text_array(operand: Option<&Object>) -> Option<String> {
    let Object::Array(elements) = operand? else {
        return None;
    };
    let mut text = String::new();
    for element in elements {
        match element {
            Object::String(bytes, _) => text.push_str(&decode_string(bytes)),
            other => {
                if let Ok(adjustment) = other.as_float() {
                    if adjustment < WORD_GAP_ADJUSTMENT && !text.ends_with(' ') {
                        text.push(' ');
                    }
                }
            }
        }
    }
    Some(text)
}

fn emit(items: &mut Vec<PageItem>, text: Option<String>, state: &TextState) {
    if let Some(text) = text {
        items.push(PageItem::Text(TextFragment::new(text, state.y())));
    }
}

/// Walk a page's operations and emit its items.
fn collect_items(operations: &[Operation]) -> Vec<PageItem> {
    let mut state = TextState::default();
    let mut items = Vec::new();

    for op in operations {
        let operands = op.operands.as_slice();
        match op.operator.as_str() {
            "q" => state.ctm_stack.push(state.ctm),
            "Q" => {
                if let Some(ctm) = state.ctm_stack.pop() {
                    state.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = numbers::<6>(operands) {
                    state.ctm = multiply(&m, &state.ctm);
                }
            }
            "BT" => state.begin_text(),
            "Tm" => {
                if let Some(m) = numbers::<6>(operands) {
                    state.set_matrix(m);
                }
            }
            "Td" => {
                if let Some([tx, ty]) = numbers::<2>(operands) {
                    state.translate_line(tx, ty);
                }
            }
            "TD" => {
                if let Some([tx, ty]) = numbers::<2>(operands) {
                    state.leading = -ty;
                    state.translate_line(tx, ty);
                }
            }
            "T*" => state.next_line(),
            "TL" => {
                if let Some(v) = number(operands.first()) {
                    state.leading = v;
                }
            }
            "Ts" => {
                if let Some(v) = number(operands.first()) {
                    state.rise = v;
                }
            }
            "Tj" => emit(&mut items, show_text(operands.first()), &state),
            "TJ" => emit(&mut items, show_text_array(operands.first()), &state),
            "'" => {
                state.next_line();
                emit(&mut items, show_text(operands.first()), &state);
            }
            "\"" => {
                state.next_line();
                emit(&mut items, show_text(operands.get(2)), &state);
            }
            "BMC" | "BDC" | "EMC" => items.push(PageItem::MarkedContent),
            _ => {}
        }
    }

    items
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self { document: None }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_items(&self, page: u32) -> Result<Vec<PageItem>> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        let pages = doc.get_pages();
        let page_id = pages.get(&page).ok_or(PdfError::InvalidPage(page))?;

        let raw = doc
            .get_page_content(*page_id)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        let content =
            Content::decode(&raw).map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let items = collect_items(&content.operations);
        trace!("Extracted {} items from page {}", items.len(), page);
        Ok(items)
    }
}
