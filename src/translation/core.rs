/*!
 * Recursive document translator.
 *
 * Walks a JSON document depth-first (object keys in insertion order, array
 * indices ascending) and replaces every translatable leaf string in place.
 * One translation is in flight at a time. A failed call leaves the source
 * string in place and the walk continues.
 */

use futures::future::{BoxFuture, FutureExt};
use log::warn;
use serde_json::Value;

use super::keys::{TranslatableKeys, is_translatable_text};
use crate::providers::Provider;

/// Progress callback, called with the number of leaves processed so far
pub type ProgressFn<'a> = dyn Fn(usize) + Send + Sync + 'a;

/// Outcome of one translation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationStats {
    /// Leaves replaced with a translation
    pub translated: usize,
    /// Leaves left as source text after a failed call
    pub failed: usize,
}

impl TranslationStats {
    /// Leaves processed, successful or not
    pub fn completed(&self) -> usize {
        self.translated + self.failed
    }
}

/// Shorten text for log output
pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// In-place translator for one document and one provider
pub struct TreeTranslator<'a> {
    provider: &'a dyn Provider,
    keys: &'a TranslatableKeys,
    source_language: &'a str,
}

impl<'a> TreeTranslator<'a> {
    pub fn new(provider: &'a dyn Provider, keys: &'a TranslatableKeys, source_language: &'a str) -> Self {
        Self {
            provider,
            keys,
            source_language,
        }
    }

    /// Translate every leaf of `document` into `target_language`
    pub async fn translate_document(&self, document: &mut Value, target_language: &str) -> TranslationStats {
        self.translate_document_with_progress(document, target_language, &|_| {}).await
    }

    /// Translate every leaf, reporting the running count after each leaf
    pub async fn translate_document_with_progress(
        &self,
        document: &mut Value,
        target_language: &str,
        progress: &ProgressFn<'_>,
    ) -> TranslationStats {
        let mut stats = TranslationStats::default();
        self.visit(document, target_language, &mut stats, progress).await;
        stats
    }

    fn visit<'v>(
        &'v self,
        value: &'v mut Value,
        target_language: &'v str,
        stats: &'v mut TranslationStats,
        progress: &'v ProgressFn<'v>,
    ) -> BoxFuture<'v, ()> {
        async move {
            match value {
                Value::Object(map) => {
                    for (key, child) in map.iter_mut() {
                        if self.keys.contains(key) {
                            self.translate_leaf(child, target_language, stats, progress).await;
                        } else {
                            self.visit(child, target_language, stats, progress).await;
                        }
                    }
                }
                Value::Array(items) => {
                    for item in items.iter_mut() {
                        self.visit(item, target_language, stats, progress).await;
                    }
                }
                _ => {}
            }
        }
        .boxed()
    }

    // Value under a translatable key: a string or a list of strings. Objects
    // and nested lists are left alone.
    async fn translate_leaf(
        &self,
        value: &mut Value,
        target_language: &str,
        stats: &mut TranslationStats,
        progress: &ProgressFn<'_>,
    ) {
        match value {
            Value::String(text) => {
                self.translate_string(text, target_language, stats, progress).await;
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    if let Value::String(text) = item {
                        self.translate_string(text, target_language, stats, progress).await;
                    }
                }
            }
            _ => {}
        }
    }

    async fn translate_string(
        &self,
        text: &mut String,
        target_language: &str,
        stats: &mut TranslationStats,
        progress: &ProgressFn<'_>,
    ) {
        if !is_translatable_text(text) {
            return;
        }

        match self.provider.translate(text, self.source_language, target_language).await {
            Ok(translated) => {
                *text = translated;
                stats.translated += 1;
            }
            Err(e) => {
                warn!(
                    "Error translating text: '{}' ({} -> {}). Error: {}",
                    truncate_for_log(text, 20),
                    self.source_language,
                    target_language,
                    e
                );
                stats.failed += 1;
            }
        }

        progress(stats.completed());
    }
}
