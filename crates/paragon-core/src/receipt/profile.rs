//! Receipt layout profiles.
//!
//! All brand- and locale-specific literals the extractors consume live in a
//! profile value, so additional receipt layouts can be added without touching
//! the parsing control flow.

use regex::Regex;

/// Marker strings and patterns for one receipt layout.
///
/// Marker fields document their matching mode: `contains`/`prefix`/`equals`
/// comparisons run against the uppercased line.
#[derive(Debug, Clone)]
pub struct ReceiptProfile {
    /// Display brand name.
    pub brand: String,

    /// Verbose header marker (contains).
    pub full_header_marker: String,

    /// Pulls a trailing store number off the verbose header line.
    pub store_number: Regex,

    /// Fiscal section marker arming name-candidate collection (contains).
    pub fiscal_marker: String,

    /// First line of the detail column header (contains).
    pub detail_header_row: String,

    /// Second line of the detail column header (equals).
    pub detail_header_price: String,

    /// Third line of the detail column header (equals).
    pub detail_header_value: String,

    /// Sentinel ending the detail section (prefix).
    pub total_sentinel: String,

    /// Label preceding the receipt total (contains).
    pub total_label: String,

    /// Lines that are receipt furniture, never product names.
    pub excluded_line: Regex,

    /// Product-name shape; group 1 captures the name, an optional trailing
    /// unit-quantity token is left out of the capture.
    pub name_shape: Regex,

    /// Transaction timestamp, `DD/MM/YYYY HH:MM:SS`.
    pub timestamp: Regex,

    /// Tax identifier labeled with "NIP".
    pub nip: Regex,

    /// A line that is exactly one currency amount.
    pub amount_line: Regex,

    /// Category tag assigned to assembled items.
    pub default_category: String,

    /// Currency code for this layout.
    pub currency: String,
}

impl ReceiptProfile {
    /// Layout of Biedronka fiscal receipts.
    pub fn biedronka() -> Self {
        Self {
            brand: "Biedronka".to_string(),
            full_header_marker: r#"BIEDRONKA "CODZIENNIE NISKIE CENY""#.to_string(),
            store_number: Regex::new(r"(?i)BIEDRONKA.*?(\d{4})").unwrap(),
            fiscal_marker: "PARAGON FISKALNY".to_string(),
            detail_header_row: "PTU ILOŚĆ".to_string(),
            detail_header_price: "CENA".to_string(),
            detail_header_value: "WARTOŚĆ".to_string(),
            total_sentinel: "SUMA".to_string(),
            total_label: "SUMA PLN".to_string(),
            excluded_line: Regex::new(
                r"(?i)^(?:PTU\s+ILOŚĆ|CENA|WARTOŚĆ|PARAGON FISKALNY|SUMA|SPRZEDAŻ OPODATKOWANA|KARTA PŁATNICZA|NIP\s|DATA\s|NAZWA\s|NR:|CODZIENNIE NISKIE CENY|BIEDRONKA)",
            )
            .unwrap(),
            name_shape: Regex::new(
                r#"(?i)^([A-ZĄĆĘŁŃÓŚŹŻ\s\d./"()%-]+?)(?:\s+\d+[,.]?\d*\s*(?:G|KG|ML|L|SZT\.?))?$"#,
            )
            .unwrap(),
            timestamp: Regex::new(r"(\d{2})/(\d{2})/(\d{4})\s+(\d{2}):(\d{2}):(\d{2})").unwrap(),
            nip: Regex::new(r"NIP\s*(\d{10}|\d{3}-\d{3}-\d{2}-\d{2})").unwrap(),
            amount_line: Regex::new(r"^(\d+[,.]\d{2})$").unwrap(),
            default_category: "Z paragonu".to_string(),
            currency: "PLN".to_string(),
        }
    }
}

impl Default for ReceiptProfile {
    fn default() -> Self {
        Self::biedronka()
    }
}
