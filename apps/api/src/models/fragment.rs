use serde::{Deserialize, Serialize};

/// One line of extracted resume text with its position and typography.
///
/// Produced by the document extraction layer. `x == 0.0` means the extractor
/// could not place the line (DOCX-style sources report every line at the origin).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default, alias = "size")]
    pub font_size: Option<f64>,
    #[serde(default, alias = "font")]
    pub font_name: Option<String>,
}

impl TextFragment {
    /// Horizontal position when the extractor actually knew it.
    pub fn known_x(&self) -> Option<f64> {
        (self.x != 0.0 && self.x.is_finite()).then_some(self.x)
    }

    /// Font size when present and non-zero.
    pub fn known_font_size(&self) -> Option<f64> {
        self.font_size.filter(|s| *s != 0.0 && s.is_finite())
    }

    /// Font name when present and non-blank.
    pub fn known_font_name(&self) -> Option<&str> {
        self.font_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
