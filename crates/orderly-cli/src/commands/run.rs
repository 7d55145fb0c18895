//! Run command - process a folder of order forms and write the reports.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use orderly_core::{OrderRun, RunSummary};

use super::config::load_config;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Folder to process, relative to the input and output roots
    /// (default: configured folder, then today's date)
    folder: Option<String>,

    /// Directory holding the dated input folders
    #[arg(long)]
    input_root: Option<PathBuf>,

    /// Directory receiving the dated output folders
    #[arg(long)]
    output_root: Option<PathBuf>,

    /// Name extracts after their client and rename the source PDFs
    #[arg(long)]
    rename: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

pub fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;

    if let Some(root) = args.input_root {
        config.paths.input_root = root;
    }
    if let Some(root) = args.output_root {
        config.paths.output_root = root;
    }
    if args.rename {
        config.rename_documents = true;
    }

    let folder = args
        .folder
        .or_else(|| config.paths.folder.clone())
        .unwrap_or_else(today);

    let order_run = OrderRun::new(&config, folder);
    let input_dir = order_run.input_dir();
    if !input_dir.is_dir() {
        anyhow::bail!("Input folder not found: {}", input_dir.display());
    }

    let documents = order_run.documents()?;
    if documents.is_empty() {
        anyhow::bail!("No order forms found in {}", input_dir.display());
    }

    println!(
        "{} Found {} order forms in {}",
        style("ℹ").blue(),
        documents.len(),
        input_dir.display()
    );

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(documents.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    let result = order_run.execute(&documents, |processed| {
        pb.set_message(processed.document.client.clone());
        pb.inc(1);
    });
    pb.finish_and_clear();

    let summary = result?;
    print_summary(&summary);

    debug!("Run completed in {:?}", start.elapsed());
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("{}", style("Run Summary").bold());
    println!("  Order forms: {}", summary.documents.len());
    println!("  Orders:      {}", summary.records.len());
    println!("  Clients:     {}", summary.reports.roster.len());
    println!("  Fresh:       {}", summary.reports.fresh.len());
    println!(
        "  Frozen:      {} lines, {} products",
        summary.reports.frozen_by_client.len(),
        summary.reports.frozen_by_product.len()
    );
    println!("  Uncategorized: {}", summary.reports.uncategorized.len());

    for document in &summary.documents {
        match &document.renamed_to {
            Some(target) => println!(
                "  {} {} -> {}",
                style("✓").green(),
                document.source.display(),
                target.display()
            ),
            None => println!(
                "  {} {} -> {}",
                style("✓").green(),
                document.source.display(),
                document.extract.display()
            ),
        }
    }

    println!();
    println!("Reports:");
    let paths = &summary.report_paths;
    for path in [
        &paths.roster,
        &paths.fresh,
        &paths.frozen_by_client,
        &paths.frozen_by_product,
        &paths.uncategorized,
    ] {
        println!("  {}", path.display());
    }

    if !summary.warnings.is_empty() {
        println!();
        for warning in &summary.warnings {
            println!("{} {}", style("⚠").yellow(), warning);
        }
    }
}
