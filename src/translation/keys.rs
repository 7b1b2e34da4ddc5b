/*!
 * Translatable key set and workload counting.
 *
 * A value is eligible for translation when it sits directly under one of
 * the registered object keys and is either a non-blank string or an array
 * whose non-blank string elements are translated individually. The counter
 * here mirrors the traversal in `translation::core` exactly so that progress
 * totals match the number of translate calls.
 */

use serde_json::Value;

/// Keys translated when the configuration does not override them
pub const DEFAULT_TRANSLATE_KEYS: [&str; 5] = [
    "role_responsibilities",
    "activities",
    "rationale",
    "designation_name",
    "wing_division_section",
];

/// Ordered set of object keys whose values are translated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableKeys {
    keys: Vec<String>,
}

impl TranslatableKeys {
    /// Build a key set, dropping blanks and duplicates but keeping order
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for key in keys {
            let key = key.into();
            if !key.is_empty() && !unique.contains(&key) {
                unique.push(key);
            }
        }
        Self { keys: unique }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for TranslatableKeys {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSLATE_KEYS)
    }
}

/// Whether a leaf string carries text worth translating
pub fn is_translatable_text(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Count the leaf strings a translation pass over `document` will submit
pub fn count_translatable(document: &Value, keys: &TranslatableKeys) -> usize {
    match document {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| {
                if keys.contains(key) {
                    count_leaf(value)
                } else {
                    count_translatable(value, keys)
                }
            })
            .sum(),
        Value::Array(items) => items.iter().map(|item| count_translatable(item, keys)).sum(),
        _ => 0,
    }
}

// Value found directly under a translatable key; no further descent.
fn count_leaf(value: &Value) -> usize {
    match value {
        Value::String(text) => usize::from(is_translatable_text(text)),
        Value::Array(items) => items
            .iter()
            .filter(|item| item.as_str().is_some_and(is_translatable_text))
            .count(),
        _ => 0,
    }
}
