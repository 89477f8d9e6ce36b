//! Core library for Polish receipt OCR processing.
//!
//! This crate provides:
//! - An OCR input model and a client for the external text-detection provider
//! - A pluggable receipt layout profile (marker strings and patterns)
//! - A heuristic, line-oriented receipt parser (store, date, NIP, items, total)
//! - Orchestration turning an uploaded image into a shopping-list draft

pub mod error;
pub mod models;
pub mod ocr;
pub mod receipt;
pub mod service;

pub use error::{OcrError, ReceiptError, Result, StoreError};
pub use models::config::ParagonConfig;
pub use models::receipt::{ListItemDraft, ParsedReceipt, ReceiptItem, ShoppingListDraft};
pub use ocr::{LayoutInfo, OcrText, RestTextDetector, TextBlock, TextDetector};
pub use receipt::{ParseOutcome, ReceiptParser, ReceiptProfile};
pub use service::{
    ListId, ProcessedReceipt, ReceiptProcessingService, ShoppingListStore, apply_fallbacks,
    build_draft,
};
