//! Receipt processing orchestration.
//!
//! Wires the external text-detection provider, the pure parser and the
//! shopping-list collaborator together: validate the upload, run OCR, parse,
//! apply fallbacks, and create a list when items were found. Partial parses
//! are successes; only a missing/unusable upload or a text-free image aborts.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use tracing::{info, warn};

use crate::error::{ReceiptError, Result, StoreError};
use crate::models::config::{ExtractionConfig, ParagonConfig};
use crate::models::receipt::{ListItemDraft, ParsedReceipt, ShoppingListDraft};
use crate::ocr::TextDetector;
use crate::receipt::{ParseOutcome, ReceiptParser, ReceiptProfile};

/// Identifier of a created shopping list.
pub type ListId = i64;

/// Shopping-list creation collaborator.
#[async_trait]
pub trait ShoppingListStore: Send + Sync {
    /// Persist a draft as a new shopping list and return its identifier.
    async fn create_list(&self, draft: &ShoppingListDraft) -> std::result::Result<ListId, StoreError>;
}

/// Result of processing one receipt image.
#[derive(Debug, Clone)]
pub struct ProcessedReceipt {
    /// Parse outcome, fallbacks applied.
    pub outcome: ParseOutcome,
    /// Draft sent to the list collaborator, when items were found.
    pub draft: Option<ShoppingListDraft>,
    /// Created list identifier, when a list was created.
    pub list_id: Option<ListId>,
}

/// Orchestrates OCR, parsing and list creation for uploaded receipts.
///
/// Collaborators are injected once at construction and reused across calls;
/// invocations for different receipts may run in parallel.
pub struct ReceiptProcessingService {
    detector: Arc<dyn TextDetector>,
    lists: Arc<dyn ShoppingListStore>,
    parser: ReceiptParser,
    config: ParagonConfig,
}

impl ReceiptProcessingService {
    /// Create a service with default configuration.
    pub fn new(detector: Arc<dyn TextDetector>, lists: Arc<dyn ShoppingListStore>) -> Self {
        Self::with_config(detector, lists, ParagonConfig::default())
    }

    /// Create a service with explicit configuration.
    pub fn with_config(
        detector: Arc<dyn TextDetector>,
        lists: Arc<dyn ShoppingListStore>,
        config: ParagonConfig,
    ) -> Self {
        let mut profile = ReceiptProfile::default();
        profile.currency = config.extraction.default_currency.clone();
        let parser = ReceiptParser::new(profile).with_nip_validation(config.extraction.validate_nip);

        Self {
            detector,
            lists,
            parser,
            config,
        }
    }

    /// Process an uploaded receipt image end to end.
    pub async fn process_image(&self, image: &[u8]) -> Result<ProcessedReceipt> {
        self.validate_upload(image)?;

        let ocr = self.detector.detect_text(image).await?;
        if ocr.text.trim().is_empty() {
            return Err(ReceiptError::NoTextDetected);
        }

        let mut outcome = self.parser.parse(&ocr.text);
        let list_name = apply_fallbacks(&mut outcome.receipt, &self.config.extraction);

        if outcome.receipt.items.is_empty() {
            warn!("No items parsed from receipt; skipping list creation");
            return Ok(ProcessedReceipt {
                outcome,
                draft: None,
                list_id: None,
            });
        }

        let draft = build_draft(&outcome.receipt, list_name);
        let list_id = self.lists.create_list(&draft).await?;
        info!(
            "Created shopping list {} with {} items from receipt",
            list_id,
            draft.items.len()
        );

        Ok(ProcessedReceipt {
            outcome,
            draft: Some(draft),
            list_id: Some(list_id),
        })
    }

    fn validate_upload(&self, image: &[u8]) -> Result<()> {
        if image.is_empty() {
            return Err(ReceiptError::InvalidUpload("empty upload".to_string()));
        }

        let max_bytes = self.config.upload.max_bytes;
        if image.len() > max_bytes {
            return Err(ReceiptError::InvalidUpload(format!(
                "{} bytes exceeds the {} byte limit",
                image.len(),
                max_bytes
            )));
        }

        let format = image::guess_format(image)?;
        let allowed = &self.config.upload.allowed_formats;
        if !format
            .extensions_str()
            .iter()
            .any(|ext| allowed.iter().any(|a| a == ext))
        {
            return Err(ReceiptError::InvalidUpload(format!(
                "unsupported image format: {format:?}"
            )));
        }

        Ok(())
    }
}

/// Apply caller-level fallbacks to a parsed receipt and synthesize the
/// shopping-list name.
///
/// An unset purchase date becomes the current local time; an unset store
/// name becomes the configured generic label. The list name is the store
/// name when a brand header matched, otherwise "<label> <DD.MM.YYYY>".
pub fn apply_fallbacks(receipt: &mut ParsedReceipt, config: &ExtractionConfig) -> String {
    let store_found = receipt.store_name.is_some();

    let purchase_date = receipt.purchase_date.unwrap_or_else(|| {
        warn!("No purchase date found, using current time as fallback");
        Local::now().naive_local()
    });
    receipt.purchase_date = Some(purchase_date);

    let label = receipt
        .store_name
        .clone()
        .unwrap_or_else(|| config.fallback_store_label.clone());
    receipt.store_name = Some(label.clone());

    if store_found {
        label
    } else {
        format!("{} {}", label, purchase_date.format("%d.%m.%Y"))
    }
}

/// Map a parsed receipt to the draft the list collaborator accepts.
///
/// Items from a receipt were already purchased, so every draft item is
/// marked bought.
pub fn build_draft(receipt: &ParsedReceipt, name: String) -> ShoppingListDraft {
    let items = receipt
        .items
        .iter()
        .map(|item| ListItemDraft {
            name: item.name.clone(),
            quantity: item.quantity,
            category: item
                .category
                .clone()
                .unwrap_or_else(|| "Z paragonu".to_string()),
            bought: true,
        })
        .collect();

    ShoppingListDraft { name, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use crate::models::config::UploadConfig;
    use crate::ocr::OcrText;
    use std::sync::Mutex;

    const RECEIPT: &str = r#"BIEDRONKA "CODZIENNIE NISKIE CENY" 4821
NIP 123-456-32-18
PARAGON FISKALNY
MLEKO 1L
PTU Ilość
Cena
Wartość
A
1 x
4,50
4,50
SUMA PLN
4,50
25/12/2023 14:05:30"#;

    // PNG magic bytes are enough for format sniffing.
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    struct FixedDetector(String);

    #[async_trait]
    impl TextDetector for FixedDetector {
        async fn detect_text(&self, _image: &[u8]) -> std::result::Result<OcrText, OcrError> {
            Ok(OcrText::from_text(self.0.clone()))
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        drafts: Mutex<Vec<ShoppingListDraft>>,
    }

    #[async_trait]
    impl ShoppingListStore for RecordingStore {
        async fn create_list(
            &self,
            draft: &ShoppingListDraft,
        ) -> std::result::Result<ListId, StoreError> {
            self.drafts.lock().unwrap().push(draft.clone());
            Ok(1)
        }
    }

    fn service(text: &str) -> (ReceiptProcessingService, Arc<RecordingStore>) {
        let store = Arc::new(RecordingStore::default());
        let service = ReceiptProcessingService::new(
            Arc::new(FixedDetector(text.to_string())),
            store.clone(),
        );
        (service, store)
    }

    #[tokio::test]
    async fn test_process_image_creates_list() {
        let (service, store) = service(RECEIPT);

        let processed = service.process_image(PNG_MAGIC).await.unwrap();
        assert_eq!(processed.list_id, Some(1));

        let draft = processed.draft.unwrap();
        assert_eq!(draft.name, "Biedronka 4821");
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].name, "MLEKO");
        assert_eq!(draft.items[0].quantity, 1);
        assert_eq!(draft.items[0].category, "Z paragonu");
        assert!(draft.items[0].bought);

        assert_eq!(store.drafts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_no_text_aborts_before_list_creation() {
        let (service, store) = service("   \n  ");

        let err = service.process_image(PNG_MAGIC).await.unwrap_err();
        assert!(matches!(err, ReceiptError::NoTextDetected));
        assert!(store.drafts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_items_is_success_without_list() {
        let (service, store) = service("BIEDRONKA\nSUMA PLN\n4,50");

        let processed = service.process_image(PNG_MAGIC).await.unwrap();
        assert!(processed.list_id.is_none());
        assert!(processed.draft.is_none());
        assert!(processed.outcome.receipt.items.is_empty());
        assert!(store.drafts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_date_fallback_is_near_now() {
        let (service, _) = service("BIEDRONKA\nPARAGON FISKALNY");

        let before = Local::now().naive_local();
        let processed = service.process_image(PNG_MAGIC).await.unwrap();
        let after = Local::now().naive_local();

        let date = processed.outcome.receipt.purchase_date.unwrap();
        assert!(date >= before && date <= after);
    }

    #[tokio::test]
    async fn test_store_label_fallback_in_list_name() {
        let mut receipt = ParsedReceipt::new();
        receipt.purchase_date =
            chrono::NaiveDate::from_ymd_opt(2023, 12, 25).and_then(|d| d.and_hms_opt(14, 5, 30));

        let name = apply_fallbacks(&mut receipt, &ExtractionConfig::default());
        assert_eq!(name, "Paragon 25.12.2023");
        assert_eq!(receipt.store_name, Some("Paragon".to_string()));
    }

    #[tokio::test]
    async fn test_empty_upload_rejected() {
        let (service, _) = service(RECEIPT);
        let err = service.process_image(&[]).await.unwrap_err();
        assert!(matches!(err, ReceiptError::InvalidUpload(_)));
    }

    #[tokio::test]
    async fn test_oversize_upload_rejected() {
        let store = Arc::new(RecordingStore::default());
        let config = ParagonConfig {
            upload: UploadConfig {
                max_bytes: 4,
                ..Default::default()
            },
            ..Default::default()
        };
        let service = ReceiptProcessingService::with_config(
            Arc::new(FixedDetector(RECEIPT.to_string())),
            store,
            config,
        );

        let err = service.process_image(PNG_MAGIC).await.unwrap_err();
        assert!(matches!(err, ReceiptError::InvalidUpload(_)));
    }

    #[tokio::test]
    async fn test_non_image_upload_rejected() {
        let (service, _) = service(RECEIPT);
        let err = service.process_image(b"not an image at all").await.unwrap_err();
        assert!(matches!(err, ReceiptError::Image(_)));
    }
}
