//! Order-form data models: positioned text, logical lines and order records.

use serde::{Deserialize, Serialize};

/// A unit of text emitted by the PDF text engine, with its vertical position
/// in user space (grows upward, so larger values are nearer the top).
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    /// Decoded string payload.
    pub text: String,
    /// Vertical coordinate of the text origin.
    pub y: f32,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, y: f32) -> Self {
        Self {
            text: text.into(),
            y,
        }
    }
}

/// One item of a page's text content, in content-stream order.
#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    /// Positioned text.
    Text(TextFragment),
    /// Marked-content boundary (`BMC`/`BDC`/`EMC`) with no string payload.
    MarkedContent,
}

impl PageItem {
    /// Borrow the fragment when this item carries text.
    pub fn as_text(&self) -> Option<&TextFragment> {
        match self {
            PageItem::Text(fragment) => Some(fragment),
            PageItem::MarkedContent => None,
        }
    }
}

/// Fragments that share one vertical position, in the order they were drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalLine {
    /// Shared vertical position.
    pub y: f32,
    /// Fragment strings, left in insertion order.
    pub fragments: Vec<String>,
}

impl LogicalLine {
    /// Number of fragments on the line.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Check if the line has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragment at a column index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fragments.get(index).map(String::as_str)
    }
}

/// A single ordered product on a client's order form.
///
/// Field order is also the column order of every tabular output built from
/// records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Delivery date as printed on the form.
    pub date: String,
    /// Client name as printed on the form.
    pub client: String,
    /// Quantity with its unit, e.g. `5 lb`.
    pub quantity: String,
    /// Normalized product description.
    pub product: String,
    /// Resolved category, `None` when no rule matched.
    pub category: Option<String>,
}

impl OrderRecord {
    /// Check whether the record resolved to the given category label.
    pub fn is_category(&self, label: &str) -> bool {
        self.category.as_deref() == Some(label)
    }
}

/// Everything recovered from one order form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedDocument {
    /// Source identifier (file stem for files on disk).
    pub name: String,
    /// Date from the header.
    pub date: String,
    /// Client from the header.
    pub client: String,
    /// Order rows, in reading order.
    pub records: Vec<OrderRecord>,
}
