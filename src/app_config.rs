use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::errors::AppError;
use crate::language_utils::{self, TargetLanguage};
use crate::providers::{bhashini, google_cloud, google_free};
use crate::translation::{DEFAULT_TRANSLATE_KEYS, TranslatableKeys};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// JSON document to translate
    #[serde(default = "default_input_file")]
    pub input_file: String,

    /// Source language code (ISO 639-1)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language codes, translated in this order
    #[serde(default = "language_utils::default_target_codes")]
    pub target_languages: Vec<String>,

    /// Object keys whose values are translated
    #[serde(default = "default_translate_keys")]
    pub translate_keys: Vec<String>,

    /// Dotfile holding backend credentials
    #[serde(default = "default_env_file")]
    pub env_file: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Bhashini pipeline API
    #[default]
    Bhashini,
    // @provider: Google Cloud Translation v2
    GoogleCloud,
    // @provider: Community translate endpoint
    GoogleFree,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Bhashini => "Bhashini",
            Self::GoogleCloud => "Google Cloud",
            Self::GoogleFree => "Google Translate (community)",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Bhashini => "bhashini".to_string(),
            Self::GoogleCloud => "googlecloud".to_string(),
            Self::GoogleFree => "googlefree".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "bhashini" => Ok(Self::Bhashini),
            "googlecloud" => Ok(Self::GoogleCloud),
            "googlefree" => Ok(Self::GoogleFree),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Service URL (discovery URL for Bhashini)
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Pipeline identifier (Bhashini only)
    #[serde(default = "String::new")]
    pub pipeline_id: String,

    // @field: Directory receiving translated documents
    #[serde(default = "String::new")]
    pub output_dir: String,

    // @field: Pause after each translate call; the backend default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_delay_ms: Option<u64>,

    // @field: Pause between target languages; the backend default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_delay_secs: Option<u64>,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::Bhashini => Self {
                provider_type: provider_type.to_lowercase_string(),
                endpoint: bhashini::DEFAULT_CONFIG_URL.to_string(),
                pipeline_id: bhashini::DEFAULT_PIPELINE_ID.to_string(),
                output_dir: "translated_files".to_string(),
                request_delay_ms: Some(0),
                language_delay_secs: Some(15),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::GoogleCloud => Self {
                provider_type: provider_type.to_lowercase_string(),
                endpoint: google_cloud::DEFAULT_ENDPOINT.to_string(),
                pipeline_id: String::new(),
                output_dir: "google_translated_files".to_string(),
                request_delay_ms: Some(default_request_delay_ms()),
                language_delay_secs: Some(0),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::GoogleFree => Self {
                provider_type: provider_type.to_lowercase_string(),
                endpoint: google_free::DEFAULT_ENDPOINT.to_string(),
                pipeline_id: String::new(),
                output_dir: "google_ttranslated_files".to_string(),
                request_delay_ms: Some(default_request_delay_ms()),
                language_delay_secs: Some(0),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_input_file() -> String {
    "input_documents/ACBP.json".to_string()
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_translate_keys() -> Vec<String> {
    DEFAULT_TRANSLATE_KEYS.iter().map(|k| k.to_string()).collect()
}

fn default_env_file() -> String {
    ".env".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_request_delay_ms() -> u64 {
    100
}

impl Config {
    /// Load the configuration file, or write and return the defaults when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        if config_path.exists() {
            let file = File::open(config_path)
                .with_context(|| format!("Failed to open config file: {:?}", config_path))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", config_path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        language_utils::validate_language_code(&self.source_language)
            .map_err(|e| AppError::Config(format!("source language: {}", e)))?;

        if self.target_languages.is_empty() {
            return Err(AppError::Config("at least one target language is required".to_string()));
        }
        self.target_language_list()?;

        if self.translatable_keys().is_empty() {
            return Err(AppError::Config("at least one translate key is required".to_string()));
        }

        if self.input_file.trim().is_empty() {
            return Err(AppError::Config("input file is required".to_string()));
        }

        let endpoint = self.translation.get_endpoint();
        let parsed = Url::parse(&endpoint)
            .map_err(|e| AppError::Config(format!("invalid endpoint {:?}: {}", endpoint, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(AppError::Config(format!("endpoint must be an http(s) URL: {}", endpoint)));
        }

        if self.translation.get_output_dir().trim().is_empty() {
            return Err(AppError::Config(format!(
                "output directory is required for {}",
                self.translation.provider.display_name()
            )));
        }

        Ok(())
    }

    /// Translatable keys as a set
    pub fn translatable_keys(&self) -> TranslatableKeys {
        TranslatableKeys::new(self.translate_keys.iter().map(|k| k.trim().to_string()))
    }

    /// Resolved target languages in configured order
    pub fn target_language_list(&self) -> Result<Vec<TargetLanguage>, AppError> {
        language_utils::resolve_target_languages(&self.target_languages)
            .map_err(|e| AppError::Config(format!("target languages: {}", e)))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            input_file: default_input_file(),
            source_language: default_source_language(),
            target_languages: language_utils::default_target_codes(),
            translate_keys: default_translate_keys(),
            env_file: default_env_file(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Mutable provider configuration by type, inserting defaults when absent
    pub fn provider_config_mut(&mut self, provider_type: TranslationProvider) -> &mut ProviderConfig {
        let provider_str = provider_type.to_lowercase_string();
        let index = match self.available_providers.iter().position(|p| p.provider_type == provider_str) {
            Some(index) => index,
            None => {
                self.available_providers.push(ProviderConfig::new(provider_type));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    fn defaults(&self) -> ProviderConfig {
        ProviderConfig::new(self.provider)
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        match self.get_active_provider_config() {
            Some(provider_config) if !provider_config.endpoint.is_empty() => provider_config.endpoint.clone(),
            _ => self.defaults().endpoint,
        }
    }

    /// Get the pipeline identifier for the active provider
    pub fn get_pipeline_id(&self) -> String {
        match self.get_active_provider_config() {
            Some(provider_config) if !provider_config.pipeline_id.is_empty() => provider_config.pipeline_id.clone(),
            _ => self.defaults().pipeline_id,
        }
    }

    /// Get the output directory for the active provider
    pub fn get_output_dir(&self) -> String {
        match self.get_active_provider_config() {
            Some(provider_config) if !provider_config.output_dir.is_empty() => provider_config.output_dir.clone(),
            _ => self.defaults().output_dir,
        }
    }

    /// Pause after each translate call
    pub fn get_request_delay(&self) -> Duration {
        let ms = self.get_active_provider_config()
            .and_then(|p| p.request_delay_ms)
            .or(self.defaults().request_delay_ms)
            .unwrap_or_default();
        Duration::from_millis(ms)
    }

    /// Pause between target languages
    pub fn get_language_delay(&self) -> Duration {
        let secs = self.get_active_provider_config()
            .and_then(|p| p.language_delay_secs)
            .or(self.defaults().language_delay_secs)
            .unwrap_or_default();
        Duration::from_secs(secs)
    }

    /// Request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        match self.get_active_provider_config() {
            Some(provider_config) if provider_config.timeout_secs > 0 => provider_config.timeout_secs,
            _ => default_timeout_secs(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(TranslationProvider::Bhashini),
                ProviderConfig::new(TranslationProvider::GoogleCloud),
                ProviderConfig::new(TranslationProvider::GoogleFree),
            ],
        }
    }
}
