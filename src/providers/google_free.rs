use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::errors::ProviderError;
use crate::providers::{Provider, check_status};

/// Default base URL of the community translate endpoint
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com";

/// Client for the free `translate_a/single` endpoint used by community
/// translation libraries
#[derive(Debug)]
pub struct GoogleFree {
    /// HTTP client for API requests
    client: Client,
    /// API base URL
    endpoint: String,
    /// Pause applied after every call
    request_delay: Duration,
}

impl GoogleFree {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>, request_delay: Duration, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: if endpoint.is_empty() { DEFAULT_ENDPOINT.to_string() } else { endpoint },
            request_delay,
        }
    }

    async fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Result<String, ProviderError> {
        let response = check_status(self.client.get(url).query(params).send().await?).await?;
        let raw: Value = response.json().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse translate response: {}", e)))?;
        Self::extract_text(&raw)
    }

    /// Extract text from the nested array response: `[[["seg", "src", ...], ...], ...]`
    pub fn extract_text(raw: &Value) -> Result<String, ProviderError> {
        let translated: String = raw
            .get(0)
            .and_then(Value::as_array)
            .map(|sentences| {
                sentences
                    .iter()
                    .filter_map(|s| s.get(0).and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default();

        if translated.is_empty() {
            return Err(ProviderError::ParseError("response contains no translated segments".to_string()));
        }

        Ok(translated)
    }
}

#[async_trait]
impl Provider for GoogleFree {
    fn name(&self) -> &str {
        "Google Translate (community)"
    }

    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String, ProviderError> {
        let url = format!("{}/translate_a/single", self.endpoint.trim_end_matches('/'));
        let params = [
            ("client", "gtx"),
            ("sl", source_language),
            ("tl", target_language),
            ("dt", "t"),
            ("q", text),
        ];

        let result = self.fetch(&url, &params).await;

        tokio::time::sleep(self.request_delay).await;

        result
    }
}
