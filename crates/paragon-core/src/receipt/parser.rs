//! Receipt parser: orchestrates the extractors and assembles line items.

use std::time::Instant;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::models::receipt::{ParsedReceipt, ReceiptItem};

use super::lines::preprocess_lines;
use super::profile::ReceiptProfile;
use super::rules::{
    amounts::{extract_total, parse_receipt_amount},
    dates::extract_purchase_date,
    details::{DetailGroup, collect_detail_groups, locate_detail_header},
    names::collect_name_candidates,
    nip::extract_nip,
    store::extract_store_name,
};

lazy_static! {
    static ref QUANTITY_SUFFIX: Regex = Regex::new(r"(?i)\s*x\s*$").unwrap();
}

/// Result of parsing one receipt text.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Extracted receipt data.
    pub receipt: ParsedReceipt,
    /// Raw OCR text the parse ran on.
    pub raw_text: String,
    /// Parse warnings, including the candidate/detail count-mismatch signal.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Heuristic, line-oriented receipt parser.
///
/// Pure and synchronous: identical input text yields identical output, with
/// no I/O and no shared state across invocations. Heuristic misses degrade
/// to unset fields; parsing always completes and always returns a result,
/// even with an empty item list.
pub struct ReceiptParser {
    profile: ReceiptProfile,
    validate_nip: bool,
}

impl ReceiptParser {
    /// Create a parser for the given receipt layout.
    pub fn new(profile: ReceiptProfile) -> Self {
        Self {
            profile,
            validate_nip: false,
        }
    }

    /// Set NIP checksum validation.
    pub fn with_nip_validation(mut self, validate: bool) -> Self {
        self.validate_nip = validate;
        self
    }

    /// The layout profile this parser runs with.
    pub fn profile(&self) -> &ReceiptProfile {
        &self.profile
    }

    /// Parse raw OCR text into structured receipt data.
    pub fn parse(&self, text: &str) -> ParseOutcome {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let lines = preprocess_lines(text);
        info!("Parsing receipt from {} OCR lines", lines.len());

        let store_name = extract_store_name(&lines, &self.profile);
        let purchase_date = extract_purchase_date(&lines, &self.profile);
        let nip = extract_nip(&lines, &self.profile, self.validate_nip);
        let total_amount = extract_total(&lines, &self.profile);

        let detail_header_index = locate_detail_header(&lines, &self.profile);
        let detail_groups = match detail_header_index {
            Some(index) => collect_detail_groups(&lines, index, &self.profile),
            None => Vec::new(),
        };
        let name_candidates = collect_name_candidates(&lines, detail_header_index, &self.profile);

        if name_candidates.len() != detail_groups.len() {
            let message = format!(
                "name candidates ({}) and detail groups ({}) differ; pairing truncated to the shorter count",
                name_candidates.len(),
                detail_groups.len()
            );
            warn!("{message}");
            warnings.push(message);
        }

        // Positional pairing: the k-th candidate belongs to the k-th group.
        // OCR noise that adds or drops one candidate misaligns every later
        // pair; the mismatch warning above is the caller's only signal.
        let items: Vec<ReceiptItem> = name_candidates
            .iter()
            .zip(detail_groups.iter())
            .map(|(name, group)| self.assemble_item(name, group))
            .collect();

        for item in &items {
            debug!(
                "Added item: {} | qty {} | unit {:?} | total {:?} | VAT {:?}",
                item.name, item.quantity, item.price_per_unit, item.total_price, item.vat_rate
            );
        }

        let receipt = ParsedReceipt {
            store_name,
            purchase_date,
            items,
            total_amount,
            nip,
            currency: self.profile.currency.clone(),
        };

        ParseOutcome {
            receipt,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn assemble_item(&self, name: &str, group: &DetailGroup) -> ReceiptItem {
        let quantity_token = QUANTITY_SUFFIX.replace(&group.quantity, "");
        let quantity = quantity_token
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|&q| q >= 1)
            .unwrap_or(1);

        ReceiptItem {
            name: name.to_string(),
            quantity,
            price_per_unit: parse_receipt_amount(&group.unit_price),
            total_price: parse_receipt_amount(&group.total_price),
            category: Some(self.profile.default_category.clone()),
            vat_rate: Some(group.vat_rate.trim().to_string()),
        }
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new(ReceiptProfile::default())
    }
}
