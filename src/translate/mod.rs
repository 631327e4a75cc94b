//! Machine translation of replies
//!
//! Used only when a reply has no pre-translated version for the requested
//! language. The HTTP client speaks the LibreTranslate API:
//!
//! ```text
//! POST {endpoint}/translate
//! {"q": "...", "source": "auto", "target": "hi", "format": "text", "api_key": "..."}
//! -> {"translatedText": "..."}
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::TranslationConfig;
use crate::utils::error::TranslationError;

/// Translation capability
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_lang`
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError>;
}

/// Thread-safe shared translator
pub type SharedTranslator = Arc<dyn Translator>;

/// Translator used when no service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    async fn translate(&self, _text: &str, _target_lang: &str) -> Result<String, TranslationError> {
        Err(TranslationError::Disabled)
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// LibreTranslate-compatible HTTP client
pub struct HttpTranslator {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl HttpTranslator {
    /// Create a client for the configured endpoint
    pub fn new(config: &TranslationConfig) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError> {
        let url = format!("{}/translate", self.endpoint);

        let request = TranslateRequest {
            q: text,
            source: "auto",
            target: target_lang,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslationError::Timeout(self.timeout_secs)
                } else {
                    TranslationError::Request(e)
                }
            })?;

        if !response.status().is_success() {
            return Err(TranslationError::Status(response.status().as_u16()));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Malformed(e.to_string()))?;

        body.translated_text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| TranslationError::Malformed("missing translatedText".to_string()))
    }
}

/// Build the translator described by `config`
pub fn create_translator(config: &TranslationConfig) -> Result<SharedTranslator, TranslationError> {
    if !config.enabled {
        return Ok(Arc::new(DisabledTranslator));
    }

    tracing::info!(endpoint = %config.endpoint, "Translation service enabled");
    Ok(Arc::new(HttpTranslator::new(config)?))
}
