//! Classify command - show how products would be categorized.

use clap::Args;
use console::style;

use orderly_core::{Categorizer, ProductClassifier};

use super::config::load_config;

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// Product descriptions, as printed on the order form
    #[arg(required = true)]
    products: Vec<String>,
}

pub fn run(args: ClassifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let categorizer = Categorizer::from_config(&config);

    for raw in &args.products {
        let product = raw.trim().to_lowercase();
        match categorizer.classify(&product) {
            Some(category) => println!("{}\t{}", product, category),
            None => println!("{}\t{}", product, style("(uncategorized)").yellow()),
        }
    }
    Ok(())
}
