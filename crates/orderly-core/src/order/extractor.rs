//! Per-document extraction pipeline.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::header::{HeaderParser, OrderHeader};
use super::lines::assemble_lines;
use super::rows::{segment_rows, RawRow};
use crate::categorize::{is_customer_category, Categorizer, ProductClassifier};
use crate::models::config::OrderlyConfig;
use crate::models::order::{ExtractedDocument, OrderRecord, PageItem};
use crate::pdf::PdfProcessor;
use crate::report::writer::{write_rows, RECORD_COLUMNS};

/// Outcome of running the full pipeline on one file.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    /// File the order form was read from.
    pub source: PathBuf,
    /// Where the per-document extract was written.
    pub extract: PathBuf,
    /// New location of the source when renaming is enabled.
    pub renamed_to: Option<PathBuf>,
    /// Extracted header and records.
    pub document: ExtractedDocument,
}

/// Turns order-form PDFs into order records.
#[derive(Debug, Clone)]
pub struct OrderExtractor {
    header: HeaderParser,
    categorizer: Categorizer,
    /// Name extracts after the client and rename the source PDF.
    rename_documents: bool,
}

/// Make a value usable as a single path component.
fn file_stem_for(name: &str) -> String {
    name.replace(['/', '\\'], "-")
}

impl OrderExtractor {
    /// Create an extractor from the run configuration.
    pub fn new(config: &OrderlyConfig) -> Self {
        Self {
            header: HeaderParser::from_markers(&config.markers),
            categorizer: Categorizer::from_config(config),
            rename_documents: config.rename_documents,
        }
    }

    /// Set source renaming.
    pub fn with_rename(mut self, rename: bool) -> Self {
        self.rename_documents = rename;
        self
    }

    /// Categorizer used for every row.
    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Build the record for one row.
    ///
    /// Rows in a customer category carry the client in their quantity.
    pub fn build_record(&self, header: &OrderHeader, row: RawRow) -> OrderRecord {
        let product = row.product.trim().to_lowercase();
        let category = self.categorizer.classify(&product);

        let quantity = match category.as_deref() {
            Some(label) if is_customer_category(label) => {
                format!("{} / {}", row.quantity, header.client)
            }
            _ => row.quantity,
        };

        OrderRecord {
            date: header.date.clone(),
            client: header.client.clone(),
            quantity,
            product,
            category,
        }
    }

    /// Extract the records of one document from its page items.
    pub fn extract(&self, name: &str, items: &[PageItem]) -> super::Result<ExtractedDocument> {
        let lines = assemble_lines(items);
        let header = self.header.parse(&lines, name)?;
        let rows = segment_rows(&lines);
        debug!("{}: {} lines, {} order rows", name, lines.len(), rows.len());

        let records = rows
            .into_iter()
            .map(|row| self.build_record(&header, row))
            .collect();

        Ok(ExtractedDocument {
            name: name.to_string(),
            date: header.date,
            client: header.client,
            records,
        })
    }

    /// Load a PDF and extract its records.
    pub fn extract_file<P: PdfProcessor>(
        &self,
        path: &Path,
        processor: &mut P,
    ) -> crate::Result<ExtractedDocument> {
        let data = fs::read(path)?;
        processor.load(&data)?;
        let items = processor.extract_items()?;

        let mut document = self.extract(&path.display().to_string(), &items)?;
        document.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| document.name.clone());
        Ok(document)
    }

    /// File stem of the per-document extract.
    pub fn extract_stem(&self, document: &ExtractedDocument) -> String {
        if self.rename_documents {
            file_stem_for(&document.client)
        } else {
            file_stem_for(&document.name)
        }
    }

    /// Write the per-document extract into `orders_dir`.
    pub fn persist(&self, document: &ExtractedDocument, orders_dir: &Path) -> crate::Result<PathBuf> {
        let path = orders_dir.join(format!("{}.csv", self.extract_stem(document)));
        write_rows(&path, &RECORD_COLUMNS, &document.records)?;
        Ok(path)
    }

    /// Rename `source` after the client, keeping its directory.
    ///
    /// An existing file at the target is never replaced.
    pub fn rename_source(&self, source: &Path, client: &str) -> crate::Result<PathBuf> {
        let target = source.with_file_name(format!("{}.pdf", file_stem_for(client)));
        if target != source {
            if target.exists() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("cannot rename {}: {} exists", source.display(), target.display()),
                )
                .into());
            }
            fs::rename(source, &target)?;
            info!("Renamed {} to {}", source.display(), target.display());
        }
        Ok(target)
    }

    /// Run the whole pipeline on one file: extract, persist, then rename.
    ///
    /// A rename failure is returned as an error after the extract has been
    /// written; nothing is rolled back.
    pub fn process_file<P: PdfProcessor>(
        &self,
        source: &Path,
        processor: &mut P,
        orders_dir: &Path,
    ) -> crate::Result<ProcessedDocument> {
        let document = self.extract_file(source, processor)?;
        let extract = self.persist(&document, orders_dir)?;

        let renamed_to = if self.rename_documents {
            Some(self.rename_source(source, &document.client)?)
        } else {
            None
        };

        Ok(ProcessedDocument {
            source: source.to_path_buf(),
            extract,
            renamed_to,
            document,
        })
    }
}
