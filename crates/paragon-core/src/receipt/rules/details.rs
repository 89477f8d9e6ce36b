//! Item detail-block location and group extraction.
//!
//! The detail section of the targeted layout lists, per item, the VAT code,
//! quantity, unit price and line total on four consecutive lines beneath a
//! three-line column header. The fixed 4-line grouping is a layout
//! assumption, not a general parser.

use tracing::debug;

use crate::receipt::profile::ReceiptProfile;

/// One item's raw detail lines, positionally interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailGroup {
    /// VAT code line.
    pub vat_rate: String,
    /// Quantity line ("1 x").
    pub quantity: String,
    /// Unit price line.
    pub unit_price: String,
    /// Line total line.
    pub total_price: String,
}

/// Find the index of the last column-header line.
///
/// A header is a triple of consecutive lines: line i contains the combined
/// VAT/quantity phrase, line i+1 equals the price header and line i+2 equals
/// the value header (all case-insensitive). The first matching triple wins.
pub fn locate_detail_header(lines: &[String], profile: &ReceiptProfile) -> Option<usize> {
    if lines.len() < 3 {
        return None;
    }

    for i in 0..lines.len() - 2 {
        if lines[i].to_uppercase().contains(&profile.detail_header_row)
            && lines[i + 1].to_uppercase() == profile.detail_header_price
            && lines[i + 2].to_uppercase() == profile.detail_header_value
        {
            debug!("Detail header found, ends at line {}", i + 2);
            return Some(i + 2);
        }
    }
    None
}

/// Consume 4-line chunks after the detail header until a total sentinel line
/// or fewer than 4 lines remain. Partial trailing chunks are discarded.
pub fn collect_detail_groups(
    lines: &[String],
    header_index: usize,
    profile: &ReceiptProfile,
) -> Vec<DetailGroup> {
    let mut groups = Vec::new();
    let mut i = header_index + 1;

    while i + 4 <= lines.len() {
        if lines[i].to_uppercase().starts_with(&profile.total_sentinel) {
            break;
        }
        groups.push(DetailGroup {
            vat_rate: lines[i].clone(),
            quantity: lines[i + 1].clone(),
            unit_price: lines[i + 2].clone(),
            total_price: lines[i + 3].clone(),
        });
        i += 4;
    }

    groups
}
