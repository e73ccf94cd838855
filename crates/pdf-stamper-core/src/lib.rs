//! PDF Stamper Core Library
//!
//! Overwrites two fixed regions of a PDF template page with new text:
//! - Covering rectangles erase whatever the template printed there
//! - Text is drawn with embedded TrueType fonts (Hangul first, then a Latin/Cyrillic/Greek fallback)
//! - The result is written to a new file; the input is never modified

pub mod config;
pub mod error;
pub mod pdf;
pub mod util;

pub use config::{AppConfig, CoverMetrics, FontConfig, Point, SlotConfig, TemplateConfig, TextColor};
pub use error::{Error, Result};
pub use pdf::{CoverRect, FontStatus, Slot, StampDocument};

use std::path::PathBuf;
use tracing::{debug, info};

use pdf::{FontFile, FontStack, StampLayer};

/// One stamping job: where to read, where to write, what to write.
#[derive(Debug, Clone, Default)]
pub struct StampRequest {
    /// Template PDF to read
    pub input: PathBuf,
    /// Destination PDF, created or overwritten
    pub output: PathBuf,
    /// Text for slot A; empty leaves the slot untouched
    pub text_a: String,
    /// Text for slot B; empty leaves the slot untouched
    pub text_b: String,
}

impl StampRequest {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_text_a(mut self, text: impl Into<String>) -> Self {
        self.text_a = text.into();
        self
    }

    #[must_use]
    pub fn with_text_b(mut self, text: impl Into<String>) -> Self {
        self.text_b = text.into();
        self
    }

    fn slot_text(&self, slot: Slot) -> &str {
        match slot {
            Slot::A => &self.text_a,
            Slot::B => &self.text_b,
        }
    }
}

/// What a successful stamp did.
#[derive(Debug, Clone)]
pub struct StampOutcome {
    /// File that was written
    pub output: PathBuf,
    /// Slots that received text, in drawing order
    pub slots_written: Vec<Slot>,
    /// Whether the font had to be added to the page
    pub font_embedded: bool,
}

/// Stamps text onto the configured template slots.
pub struct Stamper {
    config: AppConfig,
}

impl Stamper {
    /// Create a stamper; rejects configurations it cannot draw with.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Stamp `request.input` and save the result to `request.output`.
    ///
    /// Nothing is written unless every step before the save succeeds.
    pub fn stamp(&self, request: &StampRequest) -> Result<StampOutcome> {
        info!(
            "Stamping {} -> {}",
            request.input.display(),
            request.output.display()
        );

        let mut doc = StampDocument::from_file(&request.input)?;
        let (slots_written, font_embedded) = self.apply(&mut doc, request)?;
        doc.save(&request.output)?;

        info!(
            "Saved {} ({} slot(s) stamped)",
            request.output.display(),
            slots_written.len()
        );

        Ok(StampOutcome {
            output: request.output.clone(),
            slots_written,
            font_embedded,
        })
    }

    /// In-memory variant of [`Stamper::stamp`]; paths in `request` are ignored.
    pub fn stamp_bytes(&self, pdf_bytes: &[u8], request: &StampRequest) -> Result<Vec<u8>> {
        let mut doc = StampDocument::from_bytes(pdf_bytes)?;
        self.apply(&mut doc, request)?;
        doc.to_bytes()
    }

    /// Draw every non-empty slot onto the template page.
    fn apply(&self, doc: &mut StampDocument, request: &StampRequest) -> Result<(Vec<Slot>, bool)> {
        let template = &self.config.template;
        let page_id = doc.page_id(template.page)?;

        let slots: Vec<(Slot, &SlotConfig, &str)> = [
            (Slot::A, &template.slot_a),
            (Slot::B, &template.slot_b),
        ]
        .into_iter()
        .map(|(slot, placement)| (slot, placement, request.slot_text(slot)))
        .filter(|(slot, _, text)| {
            if text.is_empty() {
                debug!("Slot {} is empty, skipping", slot);
            }
            !text.is_empty()
        })
        .collect();

        if slots.is_empty() {
            return Ok((Vec::new(), false));
        }

        let font_files = self
            .config
            .font
            .resolve_paths()
            .into_iter()
            .map(FontFile::load)
            .collect::<Result<Vec<_>>>()?;
        let fonts = FontStack::new(
            font_files
                .iter()
                .enumerate()
                .map(|(index, file)| Ok((self.config.font.resource_name_for(index), file.parse()?)))
                .collect::<Result<Vec<_>>>()?,
        );

        // Every character needs a glyph in some font of the stack
        for (slot, _, text) in &slots {
            let missing = fonts.missing_chars(text);
            if !missing.is_empty() {
                return Err(Error::FontMissingGlyphs {
                    slot: slot.to_string(),
                    chars: missing.into_iter().collect(),
                });
            }
        }

        let media_box = doc.media_box(page_id)?;
        let mut layer = StampLayer::new(media_box, template.text_color, template.cover);
        let mut font_embedded = false;
        let mut written = Vec::with_capacity(slots.len());

        for (slot, placement, text) in slots {
            let status = fonts.ensure_for_text(doc.inner_mut(), page_id, text)?;
            font_embedded |= status == FontStatus::Embedded;

            let cover = layer.add_text(&fonts, placement, text);
            debug!(
                "Slot {}: {:?} at ({}, {}), cover {:.1}x{:.1}",
                slot,
                text,
                placement.anchor.x,
                placement.anchor.y,
                cover.width(),
                cover.height()
            );
            written.push(slot);
        }

        doc.append_isolated_content(page_id, &layer.to_content())?;

        Ok((written, font_embedded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = StampRequest::new("in.pdf", "out.pdf").with_text_a("A-123");
        assert_eq!(request.slot_text(Slot::A), "A-123");
        assert_eq!(request.slot_text(Slot::B), "");
    }

    #[test]
    fn test_stamper_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.template.slot_b.font_size = -1.0;
        assert!(Stamper::new(config).is_err());
    }
}
