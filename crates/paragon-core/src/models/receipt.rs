//! Receipt data models produced by the parser and consumed by the
//! shopping-list collaborator.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single line item parsed from a receipt.
///
/// Constructed once by the assembler from one name candidate and one detail
/// group; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    /// Product name captured from the item-name region.
    pub name: String,

    /// Quantity, at least 1.
    pub quantity: u32,

    /// Unit price, when the third detail line parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<Decimal>,

    /// Line total, when the fourth detail line parsed. Downstream consumers
    /// must guard on `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Decimal>,

    /// Category tag assigned at assembly time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// VAT code from the first detail line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<String>,
}

/// Structured data extracted from one receipt.
///
/// Every field is optional at the parser boundary; "not found" is `None`,
/// never an empty-string or zero sentinel. Fallbacks (current time for the
/// date, a generic store label) are applied by the orchestration, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReceipt {
    /// Merchant name, when a known header pattern matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,

    /// Transaction timestamp from the receipt header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDateTime>,

    /// Parsed line items, in receipt order.
    pub items: Vec<ReceiptItem>,

    /// Receipt total (SUMA PLN).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,

    /// Merchant tax identifier, digits only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nip: Option<String>,

    /// Currency code (default: PLN).
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "PLN".to_string()
}

impl ParsedReceipt {
    /// Create an empty receipt with default values.
    pub fn new() -> Self {
        Self {
            store_name: None,
            purchase_date: None,
            items: Vec::new(),
            total_amount: None,
            nip: None,
            currency: default_currency(),
        }
    }
}

impl Default for ParsedReceipt {
    fn default() -> Self {
        Self::new()
    }
}

/// A shopping list draft handed to the list-creation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListDraft {
    /// List name synthesized from store name and purchase date.
    pub name: String,

    /// Items to create, in receipt order.
    pub items: Vec<ListItemDraft>,
}

/// One item of a [`ShoppingListDraft`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItemDraft {
    /// Product name.
    pub name: String,

    /// Quantity.
    pub quantity: u32,

    /// Category tag.
    pub category: String,

    /// Items from a receipt were already purchased.
    pub bought: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_receipt_serialization_skips_unset_fields() {
        let receipt = ParsedReceipt::new();
        let json = serde_json::to_value(&receipt).unwrap();

        assert!(json.get("store_name").is_none());
        assert!(json.get("purchase_date").is_none());
        assert_eq!(json["currency"], "PLN");
    }

    #[test]
    fn test_item_round_trip() {
        let item = ReceiptItem {
            name: "MLEKO".to_string(),
            quantity: 2,
            price_per_unit: Some(Decimal::from_str("4.50").unwrap()),
            total_price: Some(Decimal::from_str("9.00").unwrap()),
            category: Some("Z paragonu".to_string()),
            vat_rate: Some("A".to_string()),
        };

        let json = serde_json::to_string(&item).unwrap();
        let back: ReceiptItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
