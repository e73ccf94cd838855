mod document;
mod font;
mod page_index;
pub mod stamp;

pub use document::StampDocument;
pub use font::{EmbeddedFont, FontFile, FontStack, FontStatus, GlyphRun};
pub use stamp::{CoverRect, Slot, StampLayer};
