//! Configuration structures for the order pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::categorize::{CategoryRule, Matcher};
use crate::error::{OrderlyError, Result};

/// Main configuration for an orderly run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderlyConfig {
    /// Fixed prefixes that identify header lines and frozen products.
    pub markers: MarkerConfig,

    /// Category rules, tried in the order they are listed.
    pub categories: Vec<CategoryRule>,

    /// Input/output folder layout.
    pub paths: PathConfig,

    /// Name per-document extracts after the client and rename the source PDF.
    pub rename_documents: bool,
}

impl Default for OrderlyConfig {
    fn default() -> Self {
        Self {
            markers: MarkerConfig::default(),
            categories: default_categories(),
            paths: PathConfig::default(),
            rename_documents: false,
        }
    }
}

/// Header and product markers printed on the order forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Text that starts the first line; the delivery date follows it.
    pub date_prefix: String,

    /// Text that starts the second line; the client name follows it.
    pub client_prefix: String,

    /// Products starting with this are always frozen.
    pub frozen_prefix: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            date_prefix: "Date: ".to_string(),
            client_prefix: "Client: ".to_string(),
            frozen_prefix: "frz".to_string(),
        }
    }
}

/// Folder layout for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Root holding one sub-folder of PDFs per run.
    pub input_root: PathBuf,

    /// Root receiving one sub-folder of reports per run.
    pub output_root: PathBuf,

    /// Sub-folder to process. The CLI falls back to today's date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("input"),
            output_root: PathBuf::from("output"),
            folder: None,
        }
    }
}

impl PathConfig {
    /// Directory scanned for order forms.
    pub fn input_dir(&self, folder: &str) -> PathBuf {
        self.input_root.join(folder)
    }

    /// Directory receiving the run reports.
    pub fn output_dir(&self, folder: &str) -> PathBuf {
        self.output_root.join(folder)
    }
}

fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            "dairy",
            vec![
                Matcher::substring("milk"),
                Matcher::substring("cheese"),
                Matcher::substring("butter"),
                Matcher::substring("yogurt"),
            ],
        ),
        CategoryRule::new(
            "produce",
            vec![
                Matcher::substring("lettuce"),
                Matcher::substring("tomato"),
                Matcher::substring("onion"),
            ],
        ),
        CategoryRule::new(
            "bakery",
            vec![Matcher::substring("bread"), Matcher::substring("bagel")],
        ),
    ]
}

impl OrderlyConfig {
    /// Load configuration from a JSON file.
    ///
    /// Pattern matchers are compiled here, so a bad regex fails the load.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| OrderlyError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| OrderlyError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
