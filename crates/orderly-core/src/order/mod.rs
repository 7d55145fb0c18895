//! Order-form extraction: from page items to order records.
//!
//! The pipeline per document is line assembly, header parsing, row
//! segmentation and classification, driven by [`OrderExtractor`].

mod extractor;
pub mod header;
pub mod lines;
pub mod rows;

pub use extractor::{OrderExtractor, ProcessedDocument};
pub use header::{HeaderParser, OrderHeader};
pub use lines::assemble_lines;
pub use rows::{segment_rows, RawRow};

use crate::error::DocumentError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, DocumentError>;
