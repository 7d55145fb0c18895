//! Core library for order-form processing.
//!
//! This crate provides:
//! - PDF text extraction into positioned fragments
//! - Order-form parsing (logical lines, header, order rows)
//! - Product categorization with ordered matching rules
//! - Run reports grouped by category, client and frozen product

pub mod categorize;
pub mod error;
pub mod models;
pub mod order;
pub mod pdf;
pub mod report;
pub mod run;

pub use categorize::{Categorizer, CategoryRule, Matcher, ProductClassifier};
pub use error::{DocumentError, FormatError, OrderlyError, PdfError, Result};
pub use models::config::OrderlyConfig;
pub use models::order::{ExtractedDocument, LogicalLine, OrderRecord, PageItem, TextFragment};
pub use order::{OrderExtractor, ProcessedDocument};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use report::{ReportAggregator, Reports, RunWarning};
pub use run::{OrderRun, RunSummary};
