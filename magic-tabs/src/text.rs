//! Text measurement seam.
//!
//! Label placement needs two facts about a font: its vertical metrics (to
//! centre the baseline in a slot) and the advance width of a string (to centre
//! the selected label next to its icon). Hosts with a real text stack
//! implement [`TextMeasure`]; [`ApproximateTextMeasure`] is a dependency-free
//! fallback with typical sans-serif proportions.

use unicode_segmentation::UnicodeSegmentation;

/// Vertical font metrics relative to the baseline, in pixels.
///
/// `top` is negative (above the baseline) and `bottom` positive, following
/// the usual y-down convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub top: f32,
    pub bottom: f32,
}

impl FontMetrics {
    /// Baseline that vertically centres the font's box on `center_y`.
    pub fn centered_baseline(&self, center_y: f32) -> f32 {
        center_y - self.top / 2.0 - self.bottom / 2.0
    }
}

pub trait TextMeasure {
    /// Metrics of the font at `size` pixels.
    fn metrics(&self, size: f32) -> FontMetrics;

    /// Advance width of `text` at `size` pixels.
    fn advance(&self, text: &str, size: f32) -> f32;
}

/// Proportional approximation: every grapheme advances by
/// `advance_ratio * size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateTextMeasure {
    pub advance_ratio: f32,
    pub top_ratio: f32,
    pub bottom_ratio: f32,
}

impl Default for ApproximateTextMeasure {
    fn default() -> Self {
        Self {
            advance_ratio: 0.55,
            top_ratio: -1.056,
            bottom_ratio: 0.271,
        }
    }
}

impl TextMeasure for ApproximateTextMeasure {
    fn metrics(&self, size: f32) -> FontMetrics {
        FontMetrics {
            top: self.top_ratio * size,
            bottom: self.bottom_ratio * size,
        }
    }

    fn advance(&self, text: &str, size: f32) -> f32 {
        text.graphemes(true).count() as f32 * self.advance_ratio * size
    }
}
