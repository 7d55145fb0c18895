//! Whole-run driver: every order form in a folder, then the reports.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::models::config::OrderlyConfig;
use crate::models::order::OrderRecord;
use crate::order::{OrderExtractor, ProcessedDocument};
use crate::pdf::PdfExtractor;
use crate::report::{ReportAggregator, ReportPaths, Reports, RunWarning, ORDERS_DIR};

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Per-document results, in processing order.
    pub documents: Vec<ProcessedDocument>,
    /// All records of the run.
    pub records: Vec<OrderRecord>,
    /// Aggregated views.
    pub reports: Reports,
    /// Where the views were written.
    pub report_paths: ReportPaths,
    /// Soft validation findings.
    pub warnings: Vec<RunWarning>,
}

/// List the PDFs directly inside `input_dir`, sorted by file name.
pub fn discover_documents(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf && entry.file_type()?.is_file() {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}

/// One run over one target folder.
pub struct OrderRun<'a> {
    config: &'a OrderlyConfig,
    folder: String,
}

impl<'a> OrderRun<'a> {
    pub fn new(config: &'a OrderlyConfig, folder: impl Into<String>) -> Self {
        Self {
            config,
            folder: folder.into(),
        }
    }

    /// Directory holding the order forms.
    pub fn input_dir(&self) -> PathBuf {
        self.config.paths.input_dir(&self.folder)
    }

    /// Directory receiving the reports.
    pub fn output_dir(&self) -> PathBuf {
        self.config.paths.output_dir(&self.folder)
    }

    /// Directory receiving the per-document extracts.
    pub fn orders_dir(&self) -> PathBuf {
        self.output_dir().join(ORDERS_DIR)
    }

    /// Order forms to process.
    pub fn documents(&self) -> Result<Vec<PathBuf>> {
        discover_documents(&self.input_dir())
    }

    /// Process `documents` one after another, then aggregate and write the
    /// reports. `on_document` is called after each document completes.
    ///
    /// The first failing document stops the run.
    pub fn execute<F>(&self, documents: &[PathBuf], mut on_document: F) -> Result<RunSummary>
    where
        F: FnMut(&ProcessedDocument),
    {
        let orders_dir = self.orders_dir();
        fs::create_dir_all(&orders_dir)?;

        let extractor = OrderExtractor::new(self.config);
        let mut processed = Vec::with_capacity(documents.len());
        let mut records = Vec::new();

        for path in documents {
            debug!("Processing {}", path.display());
            let mut processor = PdfExtractor::new();
            let result = extractor.process_file(path, &mut processor, &orders_dir)?;
            records.extend(result.document.records.iter().cloned());
            on_document(&result);
            processed.push(result);
        }

        let aggregator = ReportAggregator::new(&records);
        let warnings = aggregator.validate();
        let reports = aggregator.aggregate()?;
        let report_paths = reports.write(&self.output_dir())?;

        info!(
            "Processed {} documents with {} orders from {}",
            processed.len(),
            records.len(),
            self.input_dir().display()
        );

        Ok(RunSummary {
            documents: processed,
            records,
            reports,
            report_paths,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::{CategoryRule, Matcher};
    use crate::error::{DocumentError, OrderlyError};
    use crate::pdf::fixtures::{order_form_pdf, text_line};
    use pretty_assertions::assert_eq;

    fn write_form(dir: &Path, file: &str, date: &str, client: &str, rows: &[[&str; 4]]) {
        let date_line = format!("Date: {}", date);
        let client_line = format!("Client: {}", client);
        let mut lines = vec![
            text_line(750, &[date_line.as_str()]),
            text_line(730, &[client_line.as_str()]),
            text_line(710, &["#", "Qty", "Unit", "Product"]),
        ];
        for (i, row) in rows.iter().enumerate() {
            lines.push(text_line(690 - 20 * i as i64, row));
        }
        fs::write(dir.join(file), order_form_pdf(&[lines])).unwrap();
    }

    fn setup() -> (tempfile::TempDir, OrderlyConfig) {
        let root = tempfile::tempdir().unwrap();
        let mut config = OrderlyConfig::default();
        config.paths.input_root = root.path().join("input");
        config.paths.output_root = root.path().join("output");
        config.categories = vec![
            CategoryRule::new("dairy", vec![Matcher::substring("milk")]),
            CategoryRule::new("customer specials", vec![Matcher::substring("cake")]),
        ];
        fs::create_dir_all(config.paths.input_dir("week1")).unwrap();
        (root, config)
    }

    #[test]
    fn test_discover_documents_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.pdf"), b"").unwrap();
        fs::write(dir.path().join("a.PDF"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let found = discover_documents(dir.path()).unwrap();
        assert_eq!(found, vec![dir.path().join("a.PDF"), dir.path().join("b.pdf")]);
    }

    #[test]
    fn test_two_clients_same_date() {
        let (_root, config) = setup();
        let input = config.paths.input_dir("week1");
        write_form(&input, "1.pdf", "2024-01-01", "Bistro", &[
            ["1", "2 gal", "ea", "Whole Milk"],
            ["2", "2 lb", "ea", "frz peas"],
        ]);
        write_form(&input, "2.pdf", "2024-01-01", "Acme", &[
            ["1", "1 gal", "ea", "whole milk"],
            ["2", "3 lb", "ea", "frz peas"],
            ["3", "1 ea", "ea", "birthday cake"],
        ]);

        let run = OrderRun::new(&config, "week1");
        let documents = run.documents().unwrap();
        let mut seen = Vec::new();
        let summary = run
            .execute(&documents, |doc| seen.push(doc.document.client.clone()))
            .unwrap();

        assert_eq!(seen, vec!["Bistro", "Acme"]);
        assert_eq!(summary.records.len(), 5);
        assert!(summary.warnings.is_empty());

        let roster: Vec<(usize, &str)> = summary
            .reports
            .roster
            .iter()
            .map(|r| (r.number, r.client.as_str()))
            .collect();
        assert_eq!(roster, vec![(1, "BISTRO"), (2, "ACME")]);

        let cake = summary
            .records
            .iter()
            .find(|r| r.product == "birthday cake")
            .unwrap();
        assert_eq!(cake.quantity, "1 ea / Acme");

        assert_eq!(
            summary.reports.frozen_by_product[0].quantity,
            "5 lb".to_string()
        );
        assert!(run.orders_dir().join("1.csv").exists());
        assert!(run.orders_dir().join("2.csv").exists());
        assert!(summary.report_paths.fresh.exists());
        assert_eq!(fs::read_to_string(&summary.report_paths.uncategorized).unwrap(), "");
    }

    #[test]
    fn test_mixed_dates_warn_but_complete() {
        let (_root, config) = setup();
        let input = config.paths.input_dir("week1");
        write_form(&input, "1.pdf", "2024-01-01", "Bistro", &[["1", "1 ea", "ea", "gizmo"]]);
        write_form(&input, "2.pdf", "2024-01-02", "Acme", &[["1", "1 gal", "ea", "milk"]]);

        let run = OrderRun::new(&config, "week1");
        let summary = run.execute(&run.documents().unwrap(), |_| {}).unwrap();
        assert_eq!(
            summary.warnings,
            vec![
                RunWarning::MultipleDates(vec!["2024-01-01".to_string(), "2024-01-02".to_string()]),
                RunWarning::Uncategorized(vec!["gizmo".to_string()]),
            ]
        );
        let uncategorized = fs::read_to_string(&summary.report_paths.uncategorized).unwrap();
        assert!(uncategorized.starts_with("date,client,quantity,product,category\n"));
    }

    #[test]
    fn test_bad_document_stops_run() {
        let (_root, config) = setup();
        let input = config.paths.input_dir("week1");
        let lines = vec![text_line(750, &["Packing slip", "2024-01-01"])];
        fs::write(input.join("bad.pdf"), order_form_pdf(&[lines])).unwrap();

        let run = OrderRun::new(&config, "week1");
        let err = run.execute(&run.documents().unwrap(), |_| {}).unwrap_err();
        assert!(matches!(
            err,
            OrderlyError::Document(DocumentError::MissingDate { .. })
        ));
        assert!(!run.output_dir().join("finalOrderList.csv").exists());
    }
}
