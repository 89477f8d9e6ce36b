//! Parse command - extract structured data from a raw OCR text dump.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use paragon_core::ParseOutcome;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file with raw OCR text
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print parse warnings to stderr
    #[arg(long)]
    warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let text = fs::read_to_string(&args.input)?;

    let parser = super::build_parser(&config);
    let outcome = parser.parse(&text);

    if args.warnings {
        for warning in &outcome.warnings {
            eprintln!("{} {}", style("warning:").yellow().bold(), warning);
        }
    }

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&outcome.receipt)?,
        OutputFormat::Text => render_summary(&outcome),
    };

    match args.output {
        Some(path) => fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }

    Ok(())
}

fn render_summary(outcome: &ParseOutcome) -> String {
    let receipt = &outcome.receipt;
    let mut out = String::new();

    let store = receipt.store_name.as_deref().unwrap_or("(not found)");
    out.push_str(&format!("{} {}\n", style("Store:").bold(), store));

    let date = receipt
        .purchase_date
        .map(|d| d.format("%d.%m.%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| "(not found)".to_string());
    out.push_str(&format!("{} {}\n", style("Date:").bold(), date));

    let nip = receipt.nip.as_deref().unwrap_or("(not found)");
    out.push_str(&format!("{} {}\n", style("NIP:").bold(), nip));

    out.push_str(&format!(
        "{} {} item(s)\n",
        style("Items:").bold(),
        receipt.items.len()
    ));
    for item in &receipt.items {
        let total = item
            .total_price
            .map(|p| format!("{p} {}", receipt.currency))
            .unwrap_or_else(|| "?".to_string());
        out.push_str(&format!("  {} x{} = {}\n", item.name, item.quantity, total));
    }

    let total = receipt
        .total_amount
        .map(|t| format!("{t} {}", receipt.currency))
        .unwrap_or_else(|| "(not found)".to_string());
    out.push_str(&format!("{} {}\n", style("Total:").bold(), total));

    out
}
