//! Page index newtype for conversion between 0-based page numbers and lopdf.
//!
//! lopdf numbers pages from 1 in `Document::get_pages`; callers and config use
//! 0-based indices. This wrapper keeps that conversion in one place.

use crate::error::Error;

/// A validated 0-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageIndex(u32);

impl PageIndex {
    /// Get the 1-indexed page number lopdf uses as its page map key.
    #[must_use]
    pub const fn as_lopdf_page_number(self) -> u32 {
        self.0 + 1
    }

    /// Try to create a PageIndex from a 0-based page number.
    ///
    /// Returns an error if the page number exceeds the total page count.
    pub fn try_from_page_num(page_num: usize, total_pages: usize) -> Result<Self, Error> {
        if page_num >= total_pages {
            return Err(Error::PdfInvalidPage {
                page: page_num,
                total: total_pages,
            });
        }

        let index = u32::try_from(page_num).map_err(|_| Error::PdfInvalidPage {
            page: page_num,
            total: total_pages,
        })?;

        Ok(Self(index))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_page_num_valid() {
        let idx = PageIndex::try_from_page_num(5, 10).unwrap();
        assert_eq!(idx, PageIndex(5));
    }

    #[test]
    fn test_try_from_page_num_out_of_range() {
        let result = PageIndex::try_from_page_num(1, 1);
        assert!(matches!(result, Err(Error::PdfInvalidPage { page: 1, total: 1 })));
    }

    #[test]
    fn test_empty_document_has_no_first_page() {
        assert!(PageIndex::try_from_page_num(0, 0).is_err());
    }

    #[test]
    fn test_as_lopdf_page_number() {
        assert_eq!(PageIndex::try_from_page_num(0, 1).unwrap().as_lopdf_page_number(), 1);
        assert_eq!(PageIndex::try_from_page_num(5, 6).unwrap().as_lopdf_page_number(), 6);
    }
}
