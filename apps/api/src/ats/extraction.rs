//! Document extraction: turns an uploaded file into the resume text and the
//! positioned fragments the formatting and layout scorers read.
//!
//! PDF text comes from `pdf-extract`. Fragments come from walking each page's
//! content stream with `lopdf`: one fragment per text line, positioned by the
//! text matrix, sized by `Tf`, named by the font's `BaseFont`. Word documents
//! are read by `docx`.
//!
//! Structure extraction never fails the upload: a PDF whose content streams
//! can't be walked simply yields no fragments, and scoring falls back to the
//! neutral visual scores.

use std::collections::HashMap;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, warn};

use crate::ats::docx::read_docx;
use crate::errors::AppError;
use crate::models::fragment::TextFragment;

/// Kerning adjustments below this (thousandths of an em) read as a word gap.
const TJ_SPACE_THRESHOLD: i64 = -100;
/// Vertical movement smaller than this (points) stays on the same line.
const SAME_LINE_TOLERANCE: f64 = 0.5;
const MAX_PARENT_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Detects the kind from the uploaded file name. `None` for unsupported formats.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if lower.ends_with(".docx") {
            Some(DocumentKind::Docx)
        } else if lower.ends_with(".txt") {
            Some(DocumentKind::PlainText)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtractedDocument {
    pub text: String,
    /// `None` for formats that carry no layout (plain text). DOCX fragments
    /// have no position (`x == 0`).
    pub fragments: Option<Vec<TextFragment>>,
}

/// Extracts text and, for PDF and DOCX, layout fragments. CPU-bound: call from a blocking task.
pub fn extract_document(kind: DocumentKind, bytes: &[u8]) -> Result<ExtractedDocument, AppError> {
    match kind {
        DocumentKind::PlainText => Ok(ExtractedDocument {
            text: String::from_utf8_lossy(bytes).into_owned(),
            fragments: None,
        }),
        DocumentKind::Pdf => {
            let text = pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| AppError::Extraction(format!("PDF text extraction failed: {e}")))?;
            let fragments = pdf_structure(bytes).unwrap_or_else(|e| {
                warn!("PDF structure extraction failed: {e}");
                Vec::new()
            });
            debug!(
                chars = text.len(),
                fragments = fragments.len(),
                "Extracted PDF"
            );
            Ok(ExtractedDocument {
                text,
                fragments: Some(fragments),
            })
        }
        DocumentKind::Docx => {
            let content = read_docx(bytes)
                .map_err(|e| AppError::Extraction(format!("DOCX extraction failed: {e}")))?;
            debug!(
                chars = content.text.len(),
                fragments = content.fragments.len(),
                "Extracted DOCX"
            );
            Ok(ExtractedDocument {
                text: content.text,
                fragments: Some(content.fragments),
            })
        }
    }
}

/// Walks every page's content stream and collects one fragment per text line.
pub fn pdf_structure(bytes: &[u8]) -> Result<Vec<TextFragment>, lopdf::Error> {
    let doc = Document::load_mem(bytes)?;
    let mut fragments = Vec::new();

    for (page_num, page_id) in doc.get_pages() {
        let fonts = page_font_names(&doc, page_id);
        let operations = match doc
            .get_page_content(page_id)
            .and_then(|raw| Content::decode(&raw))
        {
            Ok(content) => content.operations,
            Err(e) => {
                warn!("Skipping page {page_num}: unreadable content stream: {e}");
                continue;
            }
        };

        let mut walker = LineWalker::new(&fonts);
        for op in &operations {
            walker.apply(op);
        }
        fragments.extend(walker.finish());
    }

    Ok(fragments)
}

/// Resource name (`F1`) → base font name (`Calibri-Bold`) for one page.
fn page_font_names(doc: &Document, page_id: ObjectId) -> HashMap<Vec<u8>, String> {
    let mut names = HashMap::new();

    let Some(resources) = inherited_resources(doc, page_id) else {
        return names;
    };
    let Some(fonts) = resources
        .get(b"Font")
        .ok()
        .and_then(|f| resolve_dict(doc, f))
    else {
        return names;
    };

    for (key, value) in fonts.iter() {
        let Some(font) = resolve_dict(doc, value) else {
            continue;
        };
        if let Ok(Object::Name(base)) = font.get(b"BaseFont") {
            names.insert(key.clone(), strip_subset_prefix(&String::from_utf8_lossy(base)));
        }
    }
    names
}

/// Page resources, following `Parent` links for inherited dictionaries.
fn inherited_resources(doc: &Document, page_id: ObjectId) -> Option<&Dictionary> {
    let mut node = doc.get_object(page_id).ok()?.as_dict().ok()?;
    for _ in 0..MAX_PARENT_DEPTH {
        if let Some(resources) = node.get(b"Resources").ok().and_then(|r| resolve_dict(doc, r)) {
            return Some(resources);
        }
        node = node.get(b"Parent").ok().and_then(|p| resolve_dict(doc, p))?;
    }
    None
}

fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        other => other.as_dict().ok(),
    }
}

/// Embedded subsets are named `ABCDEF+RealName`.
fn strip_subset_prefix(name: &str) -> String {
    match name.split_once('+') {
        Some((prefix, rest))
            if prefix.len() == 6 && prefix.chars().all(|c| c.is_ascii_uppercase()) =>
        {
            rest.to_string()
        }
        _ => name.to_string(),
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Best-effort decoding of a PDF string: UTF-16BE with BOM, UTF-8, then Latin-1.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn shown_text(operand: &Object) -> String {
    match operand {
        Object::String(bytes, _) => decode_pdf_string(bytes),
        Object::Array(items) => {
            let mut text = String::new();
            for item in items {
                match item {
                    Object::String(bytes, _) => text.push_str(&decode_pdf_string(bytes)),
                    Object::Integer(n) if *n < TJ_SPACE_THRESHOLD => text.push(' '),
                    Object::Real(n) if f64::from(*n) < TJ_SPACE_THRESHOLD as f64 => {
                        text.push(' ')
                    }
                    _ => {}
                }
            }
            text
        }
        _ => String::new(),
    }
}

/// Affine text matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy)]
struct Matrix([f64; 6]);

impl Matrix {
    const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn translated(self, tx: f64, ty: f64) -> Matrix {
        let [a, b, c, d, e, f] = self.0;
        Matrix([a, b, c, d, tx * a + ty * c + e, tx * b + ty * d + f])
    }

    fn origin(&self) -> (f64, f64) {
        (self.0[4], self.0[5])
    }

    fn vertical_scale(&self) -> f64 {
        let scale = self.0[2].hypot(self.0[3]);
        if scale > 0.0 {
            scale
        } else {
            1.0
        }
    }
}

#[derive(Debug)]
struct PendingLine {
    text: String,
    x: f64,
    y: f64,
    font_size: Option<f64>,
    font_name: Option<String>,
}

/// Tracks text state through a content stream and groups shown text into lines.
struct LineWalker<'a> {
    fonts: &'a HashMap<Vec<u8>, String>,
    line_matrix: Matrix,
    leading: f64,
    font_resource: Option<Vec<u8>>,
    font_size: f64,
    pending: Option<PendingLine>,
    done: Vec<TextFragment>,
}

impl<'a> LineWalker<'a> {
    fn new(fonts: &'a HashMap<Vec<u8>, String>) -> Self {
        Self {
            fonts,
            line_matrix: Matrix::IDENTITY,
            leading: 0.0,
            font_resource: None,
            font_size: 0.0,
            pending: None,
            done: Vec::new(),
        }
    }

    fn apply(&mut self, op: &Operation) {
        let nums: Vec<f64> = op.operands.iter().filter_map(number).collect();
        match op.operator.as_str() {
            "BT" => {
                self.flush();
                self.line_matrix = Matrix::IDENTITY;
            }
            "ET" => self.flush(),
            "Tf" => {
                if let Some(Object::Name(name)) = op.operands.first() {
                    self.font_resource = Some(name.clone());
                }
                if let Some(size) = nums.last() {
                    self.font_size = *size;
                }
            }
            "TL" => {
                if let Some(leading) = nums.first() {
                    self.leading = *leading;
                }
            }
            "Td" | "TD" => {
                if let [tx, ty] = nums[..] {
                    if op.operator == "TD" {
                        self.leading = -ty;
                    }
                    self.move_to(self.line_matrix.translated(tx, ty));
                }
            }
            "Tm" => {
                if let [a, b, c, d, e, f] = nums[..] {
                    self.move_to(Matrix([a, b, c, d, e, f]));
                }
            }
            "T*" => self.next_line(),
            "Tj" | "TJ" => {
                if let Some(operand) = op.operands.first() {
                    self.show(&shown_text(operand));
                }
            }
            "'" => {
                self.next_line();
                if let Some(operand) = op.operands.first() {
                    self.show(&shown_text(operand));
                }
            }
            "\"" => {
                self.next_line();
                if let Some(operand) = op.operands.last() {
                    self.show(&shown_text(operand));
                }
            }
            _ => {}
        }
    }

    fn next_line(&mut self) {
        self.move_to(self.line_matrix.translated(0.0, -self.leading));
    }

    /// Moves the line origin, closing the pending line if the baseline changed.
    fn move_to(&mut self, matrix: Matrix) {
        let (_, y) = matrix.origin();
        let same_line = self
            .pending
            .as_ref()
            .is_some_and(|line| (line.y - y).abs() < SAME_LINE_TOLERANCE);
        if same_line {
            if let Some(line) = self.pending.as_mut() {
                if !line.text.ends_with(' ') {
                    line.text.push(' ');
                }
            }
        } else {
            self.flush();
        }
        self.line_matrix = matrix;
    }

    fn show(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.pending.is_none() {
            let (x, y) = self.line_matrix.origin();
            let size = self.font_size * self.line_matrix.vertical_scale();
            self.pending = Some(PendingLine {
                text: String::new(),
                x,
                y,
                font_size: (size > 0.0).then_some(size),
                font_name: self.current_font_name(),
            });
        }
        if let Some(line) = self.pending.as_mut() {
            line.text.push_str(text);
        }
    }

    fn current_font_name(&self) -> Option<String> {
        let resource = self.font_resource.as_ref()?;
        Some(
            self.fonts
                .get(resource)
                .cloned()
                .unwrap_or_else(|| String::from_utf8_lossy(resource).into_owned()),
        )
    }

    fn flush(&mut self) {
        let Some(line) = self.pending.take() else {
            return;
        };
        let text = line.text.trim();
        if text.is_empty() {
            return;
        }
        self.done.push(TextFragment {
            text: text.to_string(),
            x: line.x,
            y: line.y,
            font_size: line.font_size,
            font_name: line.font_name,
        });
    }

    fn finish(mut self) -> Vec<TextFragment> {
        self.flush();
        self.done
    }
}
