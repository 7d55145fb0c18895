//! Cross-cutting views over a run's order records.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use super::units::merge_units;
use super::writer::{write_empty, write_rows, RECORD_COLUMNS};
use super::{CLIENT_ROSTER, FRESH_LIST, FROZEN_PER_CLIENT, FROZEN_PER_PRODUCT, UNCATEGORIZED};
use crate::categorize::FROZEN_CATEGORY;
use crate::error::{FormatError, Result};
use crate::models::order::OrderRecord;

/// Numbered client, roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterRow {
    pub number: usize,
    pub client: String,
}

/// Quantities of one fresh product across all clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreshRow {
    pub category: String,
    pub product: String,
    pub quantity: String,
}

/// One frozen line of one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrozenByClientRow {
    pub client: String,
    pub product: String,
    pub quantity: String,
}

/// Merged quantities of one frozen product across all clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrozenByProductRow {
    pub product: String,
    pub quantity: String,
}

/// Non-fatal findings about a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunWarning {
    /// Records span more than one delivery date.
    MultipleDates(Vec<String>),
    /// Some products matched no category.
    Uncategorized(Vec<String>),
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunWarning::MultipleDates(dates) => {
                write!(f, "expected a single date, found {}", dates.join(", "))
            }
            RunWarning::Uncategorized(products) => write!(
                f,
                "{} orders have no category: {}",
                products.len(),
                products.join(", ")
            ),
        }
    }
}

/// All run views, ready to be written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reports {
    pub roster: Vec<RosterRow>,
    pub fresh: Vec<FreshRow>,
    pub frozen_by_client: Vec<FrozenByClientRow>,
    pub frozen_by_product: Vec<FrozenByProductRow>,
    pub uncategorized: Vec<OrderRecord>,
}

/// Sort weight of one character: whitespace and punctuation, then digits,
/// then letters, each compared without regard to case.
fn collation_key(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

/// Ordering used for every sorted view: whitespace and punctuation sort
/// before digits and digits before letters, case ignored; on a tie lower
/// case sorts before upper case.
///
/// This follows a locale-aware comparison for ASCII text. Accented letters
/// are ordered by code point rather than by their base letter.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(collation_key)
        .cmp(b.chars().map(collation_key))
        .then_with(|| b.cmp(a))
}

/// Builds the run views from the accumulated records.
pub struct ReportAggregator<'a> {
    records: &'a [OrderRecord],
}

impl<'a> ReportAggregator<'a> {
    pub fn new(records: &'a [OrderRecord]) -> Self {
        Self { records }
    }

    fn frozen(&self) -> impl Iterator<Item = &'a OrderRecord> {
        self.records.iter().filter(|r| r.is_category(FROZEN_CATEGORY))
    }

    /// Distinct upper-cased clients numbered from 1 in first-seen order.
    pub fn client_roster(&self) -> Vec<RosterRow> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.client.to_uppercase())
            .filter(|client| seen.insert(client.clone()))
            .enumerate()
            .map(|(i, client)| RosterRow {
                number: i + 1,
                client,
            })
            .collect()
    }

    /// Categorized non-frozen records grouped by category and product.
    pub fn fresh_list(&self) -> Vec<FreshRow> {
        let mut index: HashMap<(String, String), usize> = HashMap::new();
        let mut groups: Vec<(String, String, Vec<&str>)> = Vec::new();

        for record in self.records {
            let Some(category) = record.category.as_deref() else {
                continue;
            };
            if category == FROZEN_CATEGORY {
                continue;
            }
            let key = (category.to_lowercase(), record.product.trim().to_lowercase());
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                groups.push((key.0, key.1, Vec::new()));
                groups.len() - 1
            });
            groups[slot].2.push(&record.quantity);
        }

        let mut rows: Vec<FreshRow> = groups
            .into_iter()
            .map(|(category, product, quantities)| FreshRow {
                category,
                product,
                quantity: quantities.join(", "),
            })
            .collect();
        rows.sort_by(|a, b| {
            collate(&a.category, &b.category).then_with(|| collate(&a.product, &b.product))
        });
        rows
    }

    /// Every frozen record, sorted by client then product.
    pub fn frozen_by_client(&self) -> Vec<FrozenByClientRow> {
        let mut rows: Vec<FrozenByClientRow> = self
            .frozen()
            .map(|r| FrozenByClientRow {
                client: r.client.clone(),
                product: r.product.clone(),
                quantity: r.quantity.clone(),
            })
            .collect();
        rows.sort_by(|a, b| {
            collate(&a.client, &b.client).then_with(|| collate(&a.product, &b.product))
        });
        rows
    }

    /// Frozen records grouped by product with unit-merged quantities.
    pub fn frozen_by_product(&self) -> std::result::Result<Vec<FrozenByProductRow>, FormatError> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();

        for record in self.frozen() {
            let slot = *index.entry(record.product.as_str()).or_insert_with(|| {
                groups.push((record.product.as_str(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(&record.quantity);
        }

        let mut rows = groups
            .into_iter()
            .map(|(product, quantities)| {
                Ok(FrozenByProductRow {
                    product: product.to_string(),
                    quantity: merge_units(&quantities)?.join(","),
                })
            })
            .collect::<std::result::Result<Vec<_>, FormatError>>()?;
        rows.sort_by(|a, b| collate(&a.product, &b.product));
        Ok(rows)
    }

    /// Records with no category, unchanged.
    pub fn uncategorized(&self) -> Vec<OrderRecord> {
        self.records
            .iter()
            .filter(|r| r.category.is_none())
            .cloned()
            .collect()
    }

    /// Build all views.
    pub fn aggregate(&self) -> std::result::Result<Reports, FormatError> {
        Ok(Reports {
            roster: self.client_roster(),
            fresh: self.fresh_list(),
            frozen_by_client: self.frozen_by_client(),
            frozen_by_product: self.frozen_by_product()?,
            uncategorized: self.uncategorized(),
        })
    }

    /// Soft checks on the run, each also logged as a warning.
    pub fn validate(&self) -> Vec<RunWarning> {
        let mut warnings = Vec::new();

        let dates: BTreeSet<&str> = self.records.iter().map(|r| r.date.as_str()).collect();
        if dates.len() > 1 {
            warnings.push(RunWarning::MultipleDates(
                dates.into_iter().map(str::to_string).collect(),
            ));
        }

        let uncategorized: Vec<String> = self
            .records
            .iter()
            .filter(|r| r.category.is_none())
            .map(|r| r.product.clone())
            .collect();
        if !uncategorized.is_empty() {
            warnings.push(RunWarning::Uncategorized(uncategorized));
        }

        for warning in &warnings {
            warn!("{}", warning);
        }
        warnings
    }
}

/// Paths of the written run reports.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub roster: PathBuf,
    pub fresh: PathBuf,
    pub frozen_by_client: PathBuf,
    pub frozen_by_product: PathBuf,
    pub uncategorized: PathBuf,
}

impl ReportPaths {
    /// Report locations inside a run output directory.
    pub fn in_dir(output_dir: &Path) -> Self {
        let csv = |name: &str| output_dir.join(format!("{}.csv", name));
        Self {
            roster: csv(CLIENT_ROSTER),
            fresh: csv(FRESH_LIST),
            frozen_by_client: csv(FROZEN_PER_CLIENT),
            frozen_by_product: csv(FROZEN_PER_PRODUCT),
            uncategorized: csv(UNCATEGORIZED),
        }
    }
}

impl Reports {
    /// Write every view into `output_dir`.
    ///
    /// The uncategorized report is a zero-byte file when every record has a
    /// category.
    pub fn write(&self, output_dir: &Path) -> Result<ReportPaths> {
        let paths = ReportPaths::in_dir(output_dir);

        write_rows(&paths.roster, &["number", "client"], &self.roster)?;
        write_rows(&paths.fresh, &["category", "product", "quantity"], &self.fresh)?;
        write_rows(
            &paths.frozen_by_client,
            &["client", "product", "quantity"],
            &self.frozen_by_client,
        )?;
        write_rows(
            &paths.frozen_by_product,
            &["product", "quantity"],
            &self.frozen_by_product,
        )?;
        if self.uncategorized.is_empty() {
            write_empty(&paths.uncategorized)?;
        } else {
            write_rows(&paths.uncategorized, &RECORD_COLUMNS, &self.uncategorized)?;
        }

        info!(
            "Wrote reports: {} clients, {} fresh, {} frozen lines, {} frozen products, {} uncategorized",
            self.roster.len(),
            self.fresh.len(),
            self.frozen_by_client.len(),
            self.frozen_by_product.len(),
            self.uncategorized.len()
        );
        Ok(paths)
    }
}
