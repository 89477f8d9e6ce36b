//! Data models for receipts, drafts and configuration.

pub mod config;
pub mod receipt;

pub use config::{ExtractionConfig, OcrProviderConfig, ParagonConfig, UploadConfig};
pub use receipt::{ListItemDraft, ParsedReceipt, ReceiptItem, ShoppingListDraft};
