/*!
 * Document translation.
 *
 * - `keys`: translatable key set and workload counting
 * - `core`: recursive in-place translator
 */

// Re-export main types for easier usage
pub use self::core::{TranslationStats, TreeTranslator};
pub use self::keys::{DEFAULT_TRANSLATE_KEYS, TranslatableKeys, count_translatable};

// Submodules
pub mod core;
pub mod keys;
