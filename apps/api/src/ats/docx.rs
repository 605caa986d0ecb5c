//! DOCX reading: body paragraph text plus one fragment per non-empty paragraph.
//!
//! Word documents carry no page coordinates, so every fragment sits at the
//! origin and the layout scorer treats its position as unknown. Size and font
//! come from the paragraph's first run, with Word's defaults when unset.

use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::models::fragment::TextFragment;

const DOCUMENT_PART: &str = "word/document.xml";
const DEFAULT_FONT_SIZE_PT: f64 = 11.0;
const DEFAULT_FONT_NAME: &str = "Normal";

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("not a DOCX archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("failed to read word/document.xml: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),
}

#[derive(Debug, Default)]
pub struct DocxContent {
    /// Every body paragraph, newline-terminated, blank ones included.
    pub text: String,
    pub fragments: Vec<TextFragment>,
}

#[derive(Debug, Default)]
struct Paragraph {
    text: String,
    size_pt: Option<f64>,
    font: Option<String>,
}

pub fn read_docx(bytes: &[u8]) -> Result<DocxContent, DocxError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;

    let paragraphs = body_paragraphs(&xml)?;

    let mut text = String::new();
    for paragraph in &paragraphs {
        text.push_str(&paragraph.text);
        text.push('\n');
    }

    let fragments = paragraphs
        .into_iter()
        .filter_map(|paragraph| {
            let line = paragraph.text.trim();
            if line.is_empty() {
                return None;
            }
            Some(TextFragment {
                text: line.to_string(),
                x: 0.0,
                y: 0.0,
                font_size: Some(paragraph.size_pt.unwrap_or(DEFAULT_FONT_SIZE_PT)),
                font_name: Some(
                    paragraph
                        .font
                        .unwrap_or_else(|| DEFAULT_FONT_NAME.to_string()),
                ),
            })
        })
        .collect();

    Ok(DocxContent { text, fragments })
}

/// Top-level body paragraphs in document order. Paragraphs inside tables and
/// nested text boxes are not body paragraphs and are skipped.
fn body_paragraphs(xml: &str) -> Result<Vec<Paragraph>, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();

    let mut current: Option<Paragraph> = None;
    let mut paragraph_depth = 0usize;
    let mut runs_seen = 0usize;
    let mut in_first_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                match name.as_slice() {
                    b"p" if current.is_none() && !stack.iter().any(|n| n == b"tbl") => {
                        current = Some(Paragraph::default());
                        paragraph_depth = stack.len();
                        runs_seen = 0;
                        in_first_run = false;
                    }
                    b"r" if current.is_some() && stack.last().is_some_and(|n| n == b"p") => {
                        runs_seen += 1;
                        in_first_run = runs_seen == 1;
                    }
                    _ => {}
                }
                if let Some(paragraph) = current.as_mut() {
                    apply_element(paragraph, &e, &stack, in_first_run);
                }
                stack.push(name);
            }
            Event::Empty(e) => match current.as_mut() {
                Some(paragraph) => apply_element(paragraph, &e, &stack, in_first_run),
                // <w:p/> is an empty body paragraph
                None if e.local_name().as_ref() == b"p"
                    && !stack.iter().any(|n| n == b"tbl") =>
                {
                    paragraphs.push(Paragraph::default());
                }
                None => {}
            },
            Event::Text(t) => {
                if let Some(paragraph) = current.as_mut() {
                    if stack.last().is_some_and(|n| n == b"t") {
                        paragraph.text.push_str(&t.unescape()?);
                    }
                }
            }
            Event::End(_) => {
                let name = stack.pop();
                match name.as_deref() {
                    Some(b"r") => in_first_run = false,
                    Some(b"p") if stack.len() == paragraph_depth => {
                        if let Some(paragraph) = current.take() {
                            paragraphs.push(paragraph);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Handles run-level markup: tabs and breaks in the text, size and font of the first run.
fn apply_element(paragraph: &mut Paragraph, e: &BytesStart<'_>, stack: &[Vec<u8>], in_first_run: bool) {
    let parent: &[u8] = stack.last().map(|n| n.as_slice()).unwrap_or_default();
    match e.local_name().as_ref() {
        b"tab" if parent == b"r" => paragraph.text.push('\t'),
        b"br" | b"cr" if parent == b"r" => paragraph.text.push('\n'),
        // w:sz is in half-points
        b"sz" if in_first_run && parent == b"rPr" => {
            if let Some(half_points) = attribute(e, b"val").and_then(|v| v.parse::<f64>().ok()) {
                paragraph.size_pt = Some(half_points / 2.0);
            }
        }
        b"rFonts" if in_first_run && parent == b"rPr" => {
            if let Some(font) = attribute(e, b"ascii") {
                paragraph.font = Some(font);
            }
        }
        _ => {}
    }
}

fn attribute(e: &BytesStart<'_>, local_name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == local_name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::{Cursor, Write};

    /// Minimal in-memory .docx whose body is `body_xml`.
    pub(crate) fn build_docx(body_xml: &str) -> Vec<u8> {
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body_xml}</w:body></w:document>"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(document.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }
}
