//! Product-name candidate collection.
//!
//! Product names are interleaved with receipt furniture (section banners,
//! column headers, taglines); the exclusion list plus shape heuristic is how
//! a line is judged to be "probably a product name". Best effort, not a
//! grammar.

use tracing::debug;

use crate::receipt::profile::ReceiptProfile;

/// Collect candidate product-name lines preceding the detail section.
///
/// Tracking begins only after the fiscal section marker; lines before it are
/// ignored. A captured candidate is kept when its trimmed length is strictly
/// between 2 and 80 characters and it does not open with two consecutive
/// digits (a numeric code line, not a name).
pub fn collect_name_candidates(
    lines: &[String],
    detail_header_index: Option<usize>,
    profile: &ReceiptProfile,
) -> Vec<String> {
    let end = detail_header_index.unwrap_or(lines.len());
    let mut candidates = Vec::new();
    let mut in_item_section = false;

    for line in &lines[..end] {
        if line.to_uppercase().contains(&profile.fiscal_marker) {
            in_item_section = true;
            continue;
        }
        if !in_item_section || profile.excluded_line.is_match(line) {
            continue;
        }

        let Some(caps) = profile.name_shape.captures(line) else {
            continue;
        };
        let candidate = caps[1].trim();
        let length = candidate.chars().count();
        if length > 2 && length < 80 && !starts_with_numeric_code(candidate) {
            debug!("Name candidate: {candidate:?}");
            candidates.push(candidate.to_string());
        }
    }

    candidates
}

fn starts_with_numeric_code(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(a), Some(b)) if a.is_ascii_digit() && b.is_ascii_digit()
    )
}
