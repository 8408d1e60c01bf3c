//! Label text payload.

use serde::{Deserialize, Serialize};

/// Average glyph advance relative to the font size.
const CHAR_WIDTH_FACTOR: f64 = 0.6;
/// Line height relative to the font size.
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// A text annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelText {
    pub text: String,
    /// Font size in pixels.
    pub font_size: f64,
}

impl LabelText {
    pub fn new(text: impl Into<String>, font_size: f64) -> Self {
        Self {
            text: text.into(),
            font_size,
        }
    }

    /// Approximate layout width without a text shaper.
    pub fn approximate_width(&self) -> f64 {
        let max_line_len = self
            .text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        max_line_len as f64 * self.font_size * CHAR_WIDTH_FACTOR
    }

    /// Approximate layout height (empty text still takes one line).
    pub fn approximate_height(&self) -> f64 {
        let line_count = self.text.lines().count().max(1);
        let line_count = if self.text.ends_with('\n') {
            line_count + 1
        } else {
            line_count
        };
        line_count as f64 * self.font_size * LINE_HEIGHT_FACTOR
    }
}
