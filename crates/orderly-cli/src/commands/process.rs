//! Process command - extract the orders of a single form.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use orderly_core::report::writer::RECORD_COLUMNS;
use orderly_core::{ExtractedDocument, OrderExtractor, PdfExtractor};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Order form PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());
    let extractor = OrderExtractor::new(&config);
    let document = extractor.extract_file(&args.input, &mut PdfExtractor::new())?;

    let output = format_document(&document, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

fn format_document(document: &ExtractedDocument, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(document)?)),
        OutputFormat::Csv => format_csv(document),
        OutputFormat::Text => Ok(format_text(document)),
    }
}

fn format_csv(document: &ExtractedDocument) -> anyhow::Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(RECORD_COLUMNS)?;
    for record in &document.records {
        writer.serialize(record)?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(String::from_utf8(bytes)?)
}

fn format_text(document: &ExtractedDocument) -> String {
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n", document.name));
    output.push_str(&format!("Date: {}\n", document.date));
    output.push_str(&format!("Client: {}\n", document.client));
    output.push_str(&format!("Orders: {}\n", document.records.len()));

    if !document.records.is_empty() {
        output.push('\n');
        for record in &document.records {
            output.push_str(&format!(
                "  {:<12} {:<40} {}\n",
                record.quantity,
                record.product,
                record.category.as_deref().unwrap_or("-")
            ));
        }
    }

    output
}
