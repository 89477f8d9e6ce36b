//! Scan command - run an image through the OCR provider and parse the result.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use paragon_core::{RestTextDetector, TextDetector, apply_fallbacks};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Receipt image file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also print the raw detected text to stderr
    #[arg(long)]
    raw: bool,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let image = fs::read(&args.input)?;

    let detector = RestTextDetector::from_config(&config.ocr)?;
    let ocr = detector.detect_text(&image).await?;
    if ocr.text.trim().is_empty() {
        anyhow::bail!("no text could be detected in the image");
    }

    if args.raw {
        eprintln!("{}", style("Detected text:").bold());
        eprintln!("{}", ocr.text);
    }

    let parser = super::build_parser(&config);
    let mut outcome = parser.parse(&ocr.text);
    apply_fallbacks(&mut outcome.receipt, &config.extraction);

    for warning in &outcome.warnings {
        eprintln!("{} {}", style("warning:").yellow().bold(), warning);
    }

    let rendered = serde_json::to_string_pretty(&outcome.receipt)?;
    match args.output {
        Some(path) => fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }

    Ok(())
}
