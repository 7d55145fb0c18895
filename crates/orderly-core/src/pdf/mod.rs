//! PDF processing module.
//!
//! The text engine turns each page into [`PageItem`]s: positioned text
//! fragments plus marked-content boundaries, in content-stream order.

mod extractor;
#[cfg(test)]
pub(crate) mod fixtures;

pub use extractor::PdfExtractor;

use crate::error::PdfError;
use crate::models::order::PageItem;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text engines.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the content items of a specific page (1-indexed).
    fn extract_page_items(&self, page: u32) -> Result<Vec<PageItem>>;

    /// Extract the content items of every page, pages concatenated in order.
    fn extract_items(&self) -> Result<Vec<PageItem>> {
        let mut items = Vec::new();
        for page in 1..=self.page_count() {
            items.extend(self.extract_page_items(page)?);
        }
        Ok(items)
    }
}
