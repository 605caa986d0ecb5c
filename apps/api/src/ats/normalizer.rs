//! Document Normalizer — turns raw extracted text and optional fragments into
//! the inputs every scorer shares.

use std::collections::HashSet;

use regex::Regex;

use crate::models::fragment::TextFragment;

/// Scorer-ready view of one resume.
#[derive(Debug)]
pub struct NormalizedDocument<'a> {
    pub text: &'a str,
    /// Lower-cased `\w+` tokens, in document order.
    pub words: Vec<String>,
    pub word_set: HashSet<String>,
    /// Length of `text` in characters.
    pub char_len: usize,
    /// `None` when no fragments were supplied or the list was empty.
    pub fragments: Option<&'a [TextFragment]>,
}

impl<'a> NormalizedDocument<'a> {
    pub fn new(
        text: &'a str,
        fragments: Option<&'a [TextFragment]>,
        word_pattern: &Regex,
    ) -> Self {
        let lowered = text.to_lowercase();
        let words: Vec<String> = word_pattern
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect();
        let word_set = words.iter().cloned().collect();

        Self {
            text,
            words,
            word_set,
            char_len: text.chars().count(),
            fragments: fragments.filter(|f| !f.is_empty()),
        }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// First `max_chars` characters of the text, with `...` appended when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
