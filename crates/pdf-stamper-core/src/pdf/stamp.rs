//! Stamp content generation.
//!
//! # Coordinate System
//!
//! PDF uses a **bottom-left origin** coordinate system where:
//! - (0, 0) is at the bottom-left corner of the page
//! - X increases to the right
//! - Y increases upward
//!
//! Template anchors are measured from the **top-left** corner instead, with
//! Y increasing downward, the way the template was laid out. The conversion
//! against the page's media box is:
//! ```text
//! pdf_x = media_x0 + x
//! pdf_y = media_y1 - y
//! ```
//!
//! # Stamp Strategy
//!
//! Each slot is drawn in its own saved graphics state:
//! 1. Fill the covering rectangle opaque white to erase what was there
//! 2. Draw the text at the anchor on top of it

use std::fmt::{self, Write as _};

use crate::config::{CoverMetrics, SlotConfig, TextColor};
use super::font::{FontStack, GlyphRun};

/// One of the two fixed stamp positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    A,
    B,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Rectangle erased before a slot's text is drawn, in top-left page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl CoverRect {
    /// Estimate the area `text` occupies when drawn at `slot`.
    ///
    /// Width is `chars * font_size * char_width_factor`; the rectangle runs from
    /// one font size above the baseline to half the line height below it.
    #[allow(clippy::cast_precision_loss)]
    pub fn estimate(text: &str, slot: &SlotConfig, metrics: &CoverMetrics) -> Self {
        let char_count = text.chars().count() as f32;
        let text_width = char_count * slot.font_size * metrics.char_width_factor;
        let text_height = slot.font_size * metrics.line_height_factor;
        let pad = metrics.padding;

        Self {
            x0: slot.anchor.x - pad,
            y0: slot.anchor.y - slot.font_size - pad,
            x1: slot.anchor.x + text_width + pad,
            y1: slot.anchor.y + text_height / 2.0 + pad,
        }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Whether two rectangles share any area.
    pub fn intersects(&self, other: &Self) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    /// Whether a top-left page point falls inside the rectangle.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (self.x0..=self.x1).contains(&x) && (self.y0..=self.y1).contains(&y)
    }

    /// Convert to a PDF `re` operand tuple `(x, y, width, height)`.
    pub fn to_pdf_rect(&self, media_box: &[f32; 4]) -> (f32, f32, f32, f32) {
        (
            media_box[0] + self.x0,
            media_box[3] - self.y1,
            self.width(),
            self.height(),
        )
    }
}

/// Pre-calculated data for drawing a single slot.
#[derive(Debug, Clone)]
struct SlotBlock {
    rect: (f32, f32, f32, f32),
    text_x: f32,
    text_y: f32,
    font_size: f32,
    runs: Vec<GlyphRun>,
}

/// Builds the content stream that stamps the page.
#[derive(Debug)]
pub struct StampLayer {
    media_box: [f32; 4],
    text_color: TextColor,
    metrics: CoverMetrics,
    blocks: Vec<SlotBlock>,
}

impl StampLayer {
    pub fn new(media_box: [f32; 4], text_color: TextColor, metrics: CoverMetrics) -> Self {
        Self {
            media_box,
            text_color,
            metrics,
            blocks: Vec::with_capacity(2),
        }
    }

    /// Queue `text` for the slot. Returns the area that will be erased.
    pub fn add_text(&mut self, fonts: &FontStack<'_>, slot: &SlotConfig, text: &str) -> CoverRect {
        let cover = CoverRect::estimate(text, slot, &self.metrics);

        self.blocks.push(SlotBlock {
            rect: cover.to_pdf_rect(&self.media_box),
            text_x: self.media_box[0] + slot.anchor.x,
            text_y: self.media_box[3] - slot.anchor.y,
            font_size: slot.font_size,
            runs: fonts.runs(text),
        });

        cover
    }

    /// Render queued slots as PDF content stream operators.
    pub fn to_content(&self) -> String {
        let mut content = String::new();
        let (r, g, b) = (self.text_color.r, self.text_color.g, self.text_color.b);
        let cover = TextColor::white();

        for block in &self.blocks {
            content.push_str("q\n");

            // Cover first so stale content never shows through the new text
            let (x, y, w, h) = block.rect;
            let _ = writeln!(content, "{} {} {} rg", cover.r, cover.g, cover.b);
            let _ = writeln!(content, "{x} {y} {w} {h} re f");

            let _ = writeln!(content, "{r} {g} {b} rg");
            // Fill mode; the page may have left invisible (3) set for OCR layers
            content.push_str("0 Tr\n");
            content.push_str("BT\n");
            let _ = writeln!(content, "{} {} Td", block.text_x, block.text_y);
            // Tj advances the pen, so runs in different fonts continue in place
            for run in &block.runs {
                let _ = writeln!(content, "/{} {} Tf", run.resource_name, block.font_size);
                let _ = writeln!(content, "<{}> Tj", run.hex_glyphs);
            }
            content.push_str("ET\n");

            content.push_str("Q\n");
        }

        content
    }
}
