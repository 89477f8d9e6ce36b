//! OCR input model and the external text-detection collaborator.

pub mod provider;

pub use provider::{RestTextDetector, TextDetector};

use serde::{Deserialize, Serialize};

/// Raw OCR output for one receipt image.
///
/// Produced by an external text-detection call; consumed once by the parser,
/// never mutated. The layout annotation is carried through opaquely; the
/// line-oriented parser works on `text` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrText {
    /// Full detected text, line-break separated.
    pub text: String,

    /// Optional layout annotation from the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutInfo>,

    /// Provider-side processing time in milliseconds.
    #[serde(default)]
    pub processing_time_ms: u64,
}

impl OcrText {
    /// Wrap plain text with no layout annotation.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            layout: None,
            processing_time_ms: 0,
        }
    }
}

/// Layout annotation: detected text blocks with geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    /// Detected text blocks.
    pub blocks: Vec<TextBlock>,
}

/// A detected text block with its bounding box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    /// Block text content.
    pub text: String,

    /// Bounding box (x1, y1, x2, y2).
    pub bbox: [f32; 4],

    /// Detection confidence score (0.0 - 1.0).
    pub confidence: f32,
}
