//! Error types for the paragon-core library.

use thiserror::Error;

/// Main error type for the paragon library.
#[derive(Error, Debug)]
pub enum ReceiptError {
    /// OCR provider error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Shopping-list collaborator error.
    #[error("list store error: {0}")]
    Store(#[from] StoreError),

    /// The uploaded file was rejected before OCR.
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    /// The OCR provider returned no usable text.
    #[error("no text could be detected in the uploaded image")]
    NoTextDetected,

    /// Image decoding/inspection error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors from the external text-detection provider.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The provider rejected the request or failed internally.
    #[error("provider error: {0}")]
    Provider(String),

    /// Transport-level failure talking to the provider.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered but carried no text annotation.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// Credentials for the provider could not be resolved.
    #[error("missing credentials: {0}")]
    MissingCredentials(String),
}

/// Errors from the shopping-list creation collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The collaborator rejected the draft.
    #[error("draft rejected: {0}")]
    Rejected(String),

    /// The collaborator could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for the paragon library.
pub type Result<T> = std::result::Result<T, ReceiptError>;
