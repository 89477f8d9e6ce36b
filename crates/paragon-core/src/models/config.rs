//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the paragon pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagonConfig {
    /// OCR provider configuration.
    pub ocr: OcrProviderConfig,

    /// Upload validation configuration.
    pub upload: UploadConfig,

    /// Receipt extraction configuration.
    pub extraction: ExtractionConfig,
}

/// External text-detection provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrProviderConfig {
    /// Endpoint URL of the text-detection service.
    pub endpoint: String,

    /// Environment variable holding the provider API key.
    pub api_key_env: String,

    /// Language hints sent with every request.
    pub language_hints: Vec<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OcrProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key_env: "PARAGON_OCR_API_KEY".to_string(),
            language_hints: vec!["pl".to_string(), "en".to_string()],
            timeout_secs: 30,
        }
    }
}

/// Upload validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum upload size in bytes.
    pub max_bytes: usize,

    /// Accepted raster formats, by file extension.
    pub allowed_formats: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            allowed_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "gif".to_string(),
            ],
        }
    }
}

/// Receipt extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Enable NIP checksum validation. Off by default: a receipt NIP that
    /// fails the checksum is still worth surfacing.
    pub validate_nip: bool,

    /// Default currency if not detected.
    pub default_currency: String,

    /// Store label used when no brand header matched.
    pub fallback_store_label: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            validate_nip: false,
            default_currency: "PLN".to_string(),
            fallback_store_label: "Paragon".to_string(),
        }
    }
}

impl ParagonConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParagonConfig::default();
        assert_eq!(config.upload.max_bytes, 10 * 1024 * 1024);
        assert_eq!(config.ocr.language_hints, vec!["pl", "en"]);
        assert_eq!(config.extraction.fallback_store_label, "Paragon");
        assert!(!config.extraction.validate_nip);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ParagonConfig =
            serde_json::from_str(r#"{"upload": {"max_bytes": 1024}}"#).unwrap();
        assert_eq!(config.upload.max_bytes, 1024);
        assert_eq!(config.upload.allowed_formats.len(), 4);
        assert_eq!(config.extraction.default_currency, "PLN");
    }
}
