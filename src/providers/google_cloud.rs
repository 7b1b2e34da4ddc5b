use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::credentials::GoogleCloudAuth;
use crate::errors::ProviderError;
use crate::providers::{Provider, check_status};

/// Default base URL of the Cloud Translation API
pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com";

/// Google Cloud Translation v2 client
#[derive(Debug)]
pub struct GoogleCloud {
    /// HTTP client for API requests
    client: Client,
    /// API key or access token
    auth: GoogleCloudAuth,
    /// API base URL
    endpoint: String,
    /// Pause applied after every call
    request_delay: Duration,
}

/// Translate request body
#[derive(Debug, Serialize)]
pub struct TranslateRequest<'a> {
    /// Text to translate
    pub q: &'a str,
    /// Target language code
    pub target: &'a str,
    /// Source language code
    pub source: &'a str,
    /// Always `text`: the input is plain text, not HTML
    pub format: &'a str,
}

/// Translate response body
#[derive(Debug, Deserialize)]
pub struct TranslateResponse {
    pub data: TranslationsData,
}

#[derive(Debug, Deserialize)]
pub struct TranslationsData {
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
}

impl TranslateResponse {
    /// First translation with HTML entities such as `&#39;` decoded
    pub fn extract_text(&self) -> Result<String, ProviderError> {
        self.data
            .translations
            .first()
            .map(|t| html_escape::decode_html_entities(&t.translated_text).into_owned())
            .ok_or_else(|| ProviderError::ParseError("response contains no translations".to_string()))
    }
}

impl GoogleCloud {
    /// Create a new Cloud Translation client
    pub fn new(auth: GoogleCloudAuth, endpoint: impl Into<String>, request_delay: Duration, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            auth,
            endpoint: if endpoint.is_empty() { DEFAULT_ENDPOINT.to_string() } else { endpoint },
            request_delay,
        }
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<String, ProviderError> {
        let response = check_status(request.send().await?).await?;
        let parsed: TranslateResponse = response.json().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse translate response: {}", e)))?;
        parsed.extract_text()
    }

    fn api_url(&self) -> String {
        format!("{}/language/translate/v2", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Provider for GoogleCloud {
    fn name(&self) -> &str {
        "Google Cloud Translation"
    }

    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String, ProviderError> {
        let body = TranslateRequest {
            q: text,
            target: target_language,
            source: source_language,
            format: "text",
        };

        let request = self.client.post(self.api_url()).json(&body);
        let request = match &self.auth {
            GoogleCloudAuth::ApiKey(key) => request.query(&[("key", key.as_str())]),
            GoogleCloudAuth::AccessToken(token) => request.bearer_auth(token),
        };

        debug!("Cloud translate request ({} chars) -> {}", text.chars().count(), target_language);
        let result = Self::send(request).await;

        // Paced after failed calls too
        tokio::time::sleep(self.request_delay).await;

        result
    }
}
