//! CLI subcommands.

pub mod draft;
pub mod parse;
pub mod scan;

use std::path::Path;

use paragon_core::{ParagonConfig, ReceiptParser, ReceiptProfile};

/// Load configuration from an explicit path, the default config location,
/// or fall back to built-in defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<ParagonConfig> {
    if let Some(path) = path {
        return Ok(ParagonConfig::from_file(Path::new(path))?);
    }

    if let Some(dir) = dirs::config_dir() {
        let default_path = dir.join("paragon").join("config.json");
        if default_path.exists() {
            return Ok(ParagonConfig::from_file(&default_path)?);
        }
    }

    Ok(ParagonConfig::default())
}

/// Build a parser from configuration.
pub fn build_parser(config: &ParagonConfig) -> ReceiptParser {
    let mut profile = ReceiptProfile::default();
    profile.currency = config.extraction.default_currency.clone();
    ReceiptParser::new(profile).with_nip_validation(config.extraction.validate_nip)
}
