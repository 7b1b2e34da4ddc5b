/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported backends:
 * - Bhashini: government pipeline API with a per-language discovery call
 * - GoogleCloud: Google Cloud Translation v2 API
 * - GoogleFree: the community `translate_a/single` endpoint
 * - Mock: deterministic provider for tests and benchmarks
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation backends
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the document translator.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Display name used in logs and progress bars
    fn name(&self) -> &str;

    /// Resolve whatever the backend needs before translating a language pair
    ///
    /// Called once per target language. An error means the language cannot
    /// be translated during this run.
    ///
    /// # Arguments
    /// * `source_language` - Source language code
    /// * `target_language` - Target language code
    async fn prepare(&mut self, _source_language: &str, _target_language: &str) -> Result<(), ProviderError> {
        Ok(())
    }

    /// Translate a single string
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `source_language` - Source language code
    /// * `target_language` - Target language code
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String, ProviderError>;
}

/// Check a response status, turning failures into provider errors with the body
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    Err(ProviderError::from_status(status.as_u16(), error_text))
}

pub mod bhashini;
pub mod google_cloud;
pub mod google_free;
pub mod mock;
