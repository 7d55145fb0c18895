//! Tabular (CSV) output.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// Columns of every output made of whole order records.
pub const RECORD_COLUMNS: [&str; 5] = ["date", "client", "quantity", "product", "category"];

/// Write `rows` under a header line, creating parent directories.
///
/// The header is written even when there are no rows.
pub fn write_rows<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(columns)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Write a zero-byte file.
pub fn write_empty(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, "")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::OrderRecord;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_records_with_missing_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("orders.csv");
        let rows = vec![
            OrderRecord {
                date: "2024-01-01".to_string(),
                client: "Acme, Inc".to_string(),
                quantity: "5 lb".to_string(),
                product: "whole milk".to_string(),
                category: Some("dairy".to_string()),
            },
            OrderRecord {
                date: "2024-01-01".to_string(),
                client: "Acme, Inc".to_string(),
                quantity: "1 ea".to_string(),
                product: "mystery box".to_string(),
                category: None,
            },
        ];
        write_rows(&path, &RECORD_COLUMNS, &rows).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "date,client,quantity,product,category\n\
             2024-01-01,\"Acme, Inc\",5 lb,whole milk,dairy\n\
             2024-01-01,\"Acme, Inc\",1 ea,mystery box,\n"
        );
    }

    #[test]
    fn test_header_only_when_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_rows::<OrderRecord>(&path, &RECORD_COLUMNS, &[]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "date,client,quantity,product,category\n"
        );
    }

    #[test]
    fn test_write_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uncategorized.csv");
        write_empty(&path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), Vec::<u8>::new());
    }
}
