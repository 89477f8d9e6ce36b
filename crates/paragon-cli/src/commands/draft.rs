//! Draft command - build the shopping-list draft for an OCR text dump.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use paragon_core::{apply_fallbacks, build_draft};

/// Arguments for the draft command.
#[derive(Args)]
pub struct DraftArgs {
    /// Input file with raw OCR text
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: DraftArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let text = fs::read_to_string(&args.input)?;

    let parser = super::build_parser(&config);
    let mut outcome = parser.parse(&text);
    let list_name = apply_fallbacks(&mut outcome.receipt, &config.extraction);

    if outcome.receipt.items.is_empty() {
        anyhow::bail!("no items could be parsed from the receipt text");
    }

    let draft = build_draft(&outcome.receipt, list_name);
    let rendered = serde_json::to_string_pretty(&draft)?;

    match args.output {
        Some(path) => fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }

    Ok(())
}
