//! Segmentation of body lines into raw order rows.

use crate::models::order::LogicalLine;

/// Lines before this index are header material.
pub const FIRST_ROW_LINE: usize = 3;

/// Shorter lines are subtotals or footers.
pub const MIN_ROW_FRAGMENTS: usize = 4;

/// Column holding the quantity with its unit.
pub const QUANTITY_COLUMN: usize = 1;

/// Column holding the product description.
pub const PRODUCT_COLUMN: usize = 3;

/// Quantity and product columns of one order row, as printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub quantity: String,
    pub product: String,
}

impl RawRow {
    /// Read the row columns from a line, `None` if the line is too short.
    pub fn from_line(line: &LogicalLine) -> Option<Self> {
        if line.len() < MIN_ROW_FRAGMENTS {
            return None;
        }
        Some(Self {
            quantity: line.get(QUANTITY_COLUMN)?.to_string(),
            product: line.get(PRODUCT_COLUMN)?.to_string(),
        })
    }
}

/// Turn every line after the header into a row, dropping short lines.
pub fn segment_rows(lines: &[LogicalLine]) -> Vec<RawRow> {
    lines
        .iter()
        .skip(FIRST_ROW_LINE)
        .filter_map(RawRow::from_line)
        .collect()
}
