//! External text-detection provider client.
//!
//! The provider is a black box that accepts an image byte buffer plus
//! language hints and returns detected text with optional layout geometry.
//! Failures are propagated to the caller; no retries happen here.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LayoutInfo, OcrText, TextBlock};
use crate::error::OcrError;
use crate::models::config::OcrProviderConfig;

/// Text-detection collaborator.
///
/// Constructed once at process start and reused across calls; parse
/// invocations for different receipts may run in parallel against the same
/// detector.
#[async_trait]
pub trait TextDetector: Send + Sync {
    /// Run text detection on an image byte buffer.
    async fn detect_text(&self, image: &[u8]) -> Result<OcrText, OcrError>;
}

/// HTTP-backed text detector speaking a Vision-style annotate API.
pub struct RestTextDetector {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    language_hints: Vec<String>,
}

impl RestTextDetector {
    /// Build a detector from provider configuration, resolving the API key
    /// from the configured environment variable.
    pub fn from_config(config: &OcrProviderConfig) -> Result<Self, OcrError> {
        if config.endpoint.is_empty() {
            return Err(OcrError::Provider("no endpoint configured".to_string()));
        }

        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| OcrError::MissingCredentials(config.api_key_env.clone()))?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OcrError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            language_hints: config.language_hints.clone(),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateRequest {
    image: ImagePayload,
    image_context: ImageContext,
}

#[derive(Serialize)]
struct ImagePayload {
    content: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageContext {
    language_hints: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateResponse {
    full_text_annotation: Option<TextAnnotation>,
    error: Option<ProviderError>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextAnnotation {
    text: String,
    #[serde(default)]
    blocks: Vec<AnnotationBlock>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotationBlock {
    text: String,
    #[serde(default)]
    bbox: [f32; 4],
    #[serde(default)]
    confidence: f32,
}

#[derive(Deserialize)]
struct ProviderError {
    message: String,
}

#[async_trait]
impl TextDetector for RestTextDetector {
    async fn detect_text(&self, image: &[u8]) -> Result<OcrText, OcrError> {
        let start = std::time::Instant::now();

        let request = AnnotateRequest {
            image: ImagePayload {
                content: BASE64.encode(image),
            },
            image_context: ImageContext {
                language_hints: self.language_hints.clone(),
            },
        };

        debug!("Sending {} image bytes for text detection", image.len());

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| OcrError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OcrError::Provider(format!(
                "status {}",
                response.status()
            )));
        }

        let body: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| OcrError::Http(e.to_string()))?;

        if let Some(err) = body.error {
            return Err(OcrError::Provider(err.message));
        }

        let annotation = body.full_text_annotation.ok_or(OcrError::EmptyResponse)?;

        let layout = if annotation.blocks.is_empty() {
            None
        } else {
            Some(LayoutInfo {
                blocks: annotation
                    .blocks
                    .into_iter()
                    .map(|b| TextBlock {
                        text: b.text,
                        bbox: b.bbox,
                        confidence: b.confidence,
                    })
                    .collect(),
            })
        };

        Ok(OcrText {
            text: annotation.text,
            layout,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_endpoint() {
        let config = OcrProviderConfig::default();
        assert!(matches!(
            RestTextDetector::from_config(&config),
            Err(OcrError::Provider(_))
        ));
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = OcrProviderConfig {
            endpoint: "https://ocr.example.com/v1/annotate".to_string(),
            api_key_env: "PARAGON_TEST_KEY_THAT_DOES_NOT_EXIST".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            RestTextDetector::from_config(&config),
            Err(OcrError::MissingCredentials(_))
        ));
    }

    #[test]
    fn test_response_deserialization() {
        let body = r#"{
            "fullTextAnnotation": {
                "text": "BIEDRONKA\nSUMA PLN\n4,50",
                "blocks": [
                    {"text": "BIEDRONKA", "bbox": [0.0, 0.0, 100.0, 20.0], "confidence": 0.98}
                ]
            }
        }"#;

        let parsed: AnnotateResponse = serde_json::from_str(body).unwrap();
        let annotation = parsed.full_text_annotation.unwrap();
        assert_eq!(annotation.blocks.len(), 1);
        assert!(annotation.text.starts_with("BIEDRONKA"));
    }
}
