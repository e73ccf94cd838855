use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for pdf-stamper-core
///
/// Two families of failure reach the caller:
/// - Font errors (bundled font missing, unreadable, unparsable, lacking glyphs or not embeddable)
/// - Document errors (opening, locating the page, drawing, saving)
///
/// Configuration and plain I/O failures complete the set.
#[derive(Error, Debug)]
pub enum Error {
    // ==========================================================================
    // PDF Errors
    // ==========================================================================
    /// Failed to open or parse a PDF file
    #[error("failed to open PDF: {0}")]
    PdfOpen(String),

    /// Invalid page number requested
    #[error("invalid page number {page} (document has {total} pages)")]
    PdfInvalidPage { page: usize, total: usize },

    /// Failed to draw the stamp onto a page
    #[error("failed to stamp page: {0}")]
    PdfStamp(String),

    /// Failed to save a PDF
    #[error("failed to save PDF: {0}")]
    PdfSave(String),

    /// Error from the lopdf library
    #[error("lopdf error: {0}")]
    Lopdf(String),

    // ==========================================================================
    // Font Errors
    // ==========================================================================
    /// Font file could not be read
    #[error("failed to load font {}: {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    /// Font file was read but is not a usable TrueType/OpenType font
    #[error("failed to parse font: {0}")]
    FontParse(String),

    /// Font could not be registered on the page
    #[error("failed to embed font: {0}")]
    FontEmbed(String),

    /// Text contains characters none of the configured fonts can draw
    #[error("no configured font has glyphs for {chars:?} in slot {slot}")]
    FontMissingGlyphs { slot: String, chars: String },

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// Failed to load configuration file
    #[error("failed to load config: {0}")]
    ConfigLoad(String),

    /// Invalid configuration value
    #[error("invalid config value for '{field}': {reason}")]
    ConfigInvalid { field: String, reason: String },

    // ==========================================================================
    // I/O Errors
    // ==========================================================================
    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this failure came from the bundled font rather than the document.
    pub const fn is_font_error(&self) -> bool {
        matches!(
            self,
            Self::FontLoad { .. }
                | Self::FontParse(_)
                | Self::FontEmbed(_)
                | Self::FontMissingGlyphs { .. }
        )
    }
}

impl From<lopdf::Error> for Error {
    fn from(e: lopdf::Error) -> Self {
        Self::Lopdf(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
