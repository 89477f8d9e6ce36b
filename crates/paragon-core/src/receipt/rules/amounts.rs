//! Currency amount parsing and total extraction.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use crate::receipt::profile::ReceiptProfile;

/// Parse a receipt amount with the comma treated as decimal separator
/// ("4,50" and "4.50" both parse to 4.50). `None` when unparsable.
pub fn parse_receipt_amount(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// Extract the receipt total.
///
/// Finds the first line containing the total label ("SUMA PLN"), then takes
/// the first following line that is exactly one amount. Both the outer and
/// the inner search stop at first success.
pub fn extract_total(lines: &[String], profile: &ReceiptProfile) -> Option<Decimal> {
    for (i, line) in lines.iter().enumerate() {
        if line.to_uppercase().contains(&profile.total_label) {
            for candidate in &lines[i + 1..] {
                if let Some(caps) = profile.amount_line.captures(candidate) {
                    let total = parse_receipt_amount(&caps[1]);
                    debug!("Parsed total amount: {total:?}");
                    return total;
                }
            }
            return None;
        }
    }
    None
}
