/*!
 * # jsontrans - batch translation of JSON document fields
 *
 * A Rust library for translating selected fields of a nested JSON document
 * into several target languages.
 *
 * ## Features
 *
 * - Recursive, in-place translation of values under registered keys
 * - Workload counting for progress reporting
 * - Interchangeable backends:
 *   - Bhashini pipeline API (with per-language discovery)
 *   - Google Cloud Translation v2
 *   - Community Google Translate endpoint
 * - Per-item failure tolerance: a failed call keeps the source text
 * - One output file per target language
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `credentials`: Dotfile and environment credential loading
 * - `translation`: Document traversal:
 *   - `translation::keys`: Translatable keys and workload counting
 *   - `translation::core`: Recursive in-place translator
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: Target language table and ISO code utilities
 * - `providers`: Client implementations for the translation backends
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod credentials;
pub mod file_utils;
pub mod translation;
pub mod app_controller;
pub mod language_utils;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use credentials::Credentials;
pub use translation::{TranslatableKeys, TranslationStats, TreeTranslator, count_translatable};
pub use language_utils::{TargetLanguage, get_language_name};
pub use errors::{AppError, ProviderError, TranslationError};
