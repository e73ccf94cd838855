use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};
use super::page_index::PageIndex;

/// A PDF opened for stamping.
///
/// Owns the parsed lopdf document for the duration of one stamp operation.
/// Nothing touches the filesystem until [`StampDocument::save`].
pub struct StampDocument {
    doc: Document,
}

impl StampDocument {
    /// Open a PDF from a file path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            Error::PdfOpen(format!("Failed to read file {}: {}", path.display(), e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Open a PDF from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| Error::PdfOpen(format!("Failed to parse PDF: {e}")))?;
        Ok(Self { doc })
    }

    /// Get number of pages
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Object id of the page at a 0-based index.
    pub fn page_id(&self, page_num: usize) -> Result<ObjectId> {
        let pages = self.doc.get_pages();
        let page_index = PageIndex::try_from_page_num(page_num, pages.len())?;

        pages
            .get(&page_index.as_lopdf_page_number())
            .copied()
            .ok_or(Error::PdfInvalidPage {
                page: page_num,
                total: pages.len(),
            })
    }

    /// Media box of a page as `[x0, y0, x1, y1]`, inherited from parents if needed.
    pub fn media_box(&self, page_id: ObjectId) -> Result<[f32; 4]> {
        let page_obj = self.doc.get_object(page_id)
            .map_err(|e| Error::Lopdf(format!("Failed to get page object: {e}")))?;
        Ok(get_media_box(&self.doc, page_obj, 10))
    }

    pub const fn inner(&self) -> &Document {
        &self.doc
    }

    pub const fn inner_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Wrap the page's existing content in `q`/`Q` and append `content` after it.
    ///
    /// The wrap keeps graphics state left over by the original content streams
    /// (transforms, colors, clipping) from leaking into the appended stream.
    pub fn append_isolated_content(&mut self, page_id: ObjectId, content: &str) -> Result<()> {
        let existing = {
            let page = self.doc.get_dictionary(page_id)
                .map_err(|e| Error::Lopdf(format!("Failed to get page: {e}")))?;
            page.get(b"Contents").ok().cloned()
        };

        let mut contents = match existing {
            Some(Object::Reference(existing_id)) => match self.doc.get_object(existing_id) {
                // Contents may point at an array of streams rather than a stream
                Ok(Object::Array(arr)) => arr.clone(),
                _ => vec![Object::Reference(existing_id)],
            },
            Some(Object::Array(arr)) => arr,
            _ => Vec::new(),
        };

        if !contents.is_empty() {
            let save_id = self.add_content_stream("q\n");
            // Leading newline: the original stream may end mid-line
            let restore_id = self.add_content_stream("\nQ\n");
            contents.insert(0, Object::Reference(save_id));
            contents.push(Object::Reference(restore_id));
        }

        let content_id = self.add_content_stream(content);
        contents.push(Object::Reference(content_id));

        let page = self.doc.get_object_mut(page_id)
            .map_err(|e| Error::Lopdf(format!("Failed to get page: {e}")))?;

        match page {
            Object::Dictionary(dict) => {
                dict.set("Contents", Object::Array(contents));
                Ok(())
            }
            _ => Err(Error::PdfStamp("Page object is not a dictionary".to_string())),
        }
    }

    fn add_content_stream(&mut self, content: &str) -> ObjectId {
        let stream = Stream::new(Dictionary::new(), content.as_bytes().to_vec());
        self.doc.add_object(Object::Stream(stream))
    }

    /// Serialize to bytes.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.doc.save_to(&mut output)
            .map_err(|e| Error::PdfSave(format!("Failed to serialize PDF: {e}")))?;
        Ok(output)
    }

    /// Serialize and write to `path`, creating or overwriting it.
    ///
    /// The document is fully serialized in memory first, so a serialization
    /// failure never creates the output file.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes).map_err(|e| {
            Error::PdfSave(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

impl std::fmt::Debug for StampDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StampDocument")
            .field("version", &self.doc.version)
            .field("objects", &self.doc.objects.len())
            .finish()
    }
}

/// Get media box from page object.
fn get_media_box(doc: &Document, page_obj: &Object, depth: usize) -> [f32; 4] {
    if let Object::Dictionary(dict) = page_obj {
        if let Ok(Object::Array(arr)) = dict.get(b"MediaBox")
            && arr.len() == 4
        {
            let values: Vec<f32> = arr
                .iter()
                .filter_map(|o| match o {
                    #[allow(clippy::cast_precision_loss)]
                    Object::Integer(i) => Some(*i as f32),
                    Object::Real(r) => Some(*r),
                    _ => None,
                })
                .collect();

            if values.len() == 4 {
                return [values[0], values[1], values[2], values[3]];
            }
        }

        if depth > 0
            && let Ok(Object::Reference(parent_id)) = dict.get(b"Parent")
            && let Ok(parent) = doc.get_object(*parent_id)
        {
            return get_media_box(doc, parent, depth - 1);
        }
    }

    // Default to US Letter size
    [0.0, 0.0, 612.0, 792.0]
}
