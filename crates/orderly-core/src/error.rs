//! Error types for the orderly-core library.

use thiserror::Error;

/// Main error type for the orderly library.
#[derive(Error, Debug)]
pub enum OrderlyError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Order form does not have the expected header structure.
    #[error("document structure error: {0}")]
    Document(#[from] DocumentError),

    /// A value could not be decomposed the way a report needs it.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Tabular output error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to decode a page content stream.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Header lines of an order form violate the expected shape.
///
/// Every variant names the offending document so a failed run can be traced
/// back to the file that stopped it.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DocumentError {
    /// The first line is not a single fragment starting with the date prefix.
    #[error("unable to find date for {document}")]
    MissingDate { document: String },

    /// The second line does not reduce to a single client fragment.
    #[error("unable to find client for {document}")]
    MissingClient { document: String },

    /// The document ran out of lines before the header was complete.
    #[error("{document} has no line {line}")]
    MissingLine { document: String, line: usize },
}

/// Errors raised while reshaping already-extracted values.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// A quantity is not `<number> <unit>`.
    #[error("invalid quantity {quantity:?}: {reason}")]
    Quantity { quantity: String, reason: String },
}

/// Result type for the orderly library.
pub type Result<T> = std::result::Result<T, OrderlyError>;
