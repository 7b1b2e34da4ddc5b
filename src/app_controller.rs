use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use indicatif::{ProgressBar, ProgressStyle, MultiProgress};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::{Config, TranslationProvider};
use crate::credentials::{BhashiniCredentials, Credentials, GoogleCloudAuth};
use crate::errors::{AppError, TranslationError};
use crate::file_utils::FileManager;
use crate::language_utils::TargetLanguage;
use crate::providers::Provider;
use crate::providers::bhashini::Bhashini;
use crate::providers::google_cloud::GoogleCloud;
use crate::providers::google_free::GoogleFree;
use crate::translation::{TranslatableKeys, TranslationStats, TreeTranslator, count_translatable};

// @module: Application controller for document translation

/// What happened to one target language during a run
#[derive(Debug, Clone, PartialEq)]
pub enum LanguageOutcome {
    /// Translated document written to disk
    Written {
        path: PathBuf,
        stats: TranslationStats,
        elapsed: Duration,
    },
    /// Output already existed and overwriting was not requested
    SkippedExisting { path: PathBuf },
    /// The backend could not be prepared for the language pair
    SkippedUnavailable { reason: String },
}

/// Outcome for one target language
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageReport {
    pub language: TargetLanguage,
    pub outcome: LanguageOutcome,
}

/// Result of a full run over all target languages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Leaf strings per language
    pub total_items: usize,
    /// One report per target language, in run order
    pub reports: Vec<LanguageReport>,
}

impl RunSummary {
    /// Languages whose document was written
    pub fn written(&self) -> usize {
        self.reports.iter()
            .filter(|r| matches!(r.outcome, LanguageOutcome::Written { .. }))
            .count()
    }

    /// Languages skipped for any reason
    pub fn skipped(&self) -> usize {
        self.reports.len() - self.written()
    }

    /// Leaves that fell back to source text across all languages
    pub fn failed_items(&self) -> usize {
        self.reports.iter()
            .map(|r| match &r.outcome {
                LanguageOutcome::Written { stats, .. } => stats.failed,
                _ => 0,
            })
            .sum()
    }
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Draw progress bars
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        Ok(Self {
            config,
            show_progress: true,
        })
    }

    /// Enable or disable progress bars
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the configured backend from credentials
    ///
    /// Fails when a credential the backend requires is absent, before any
    /// language is processed.
    pub fn create_provider(&self, credentials: &Credentials) -> Result<Box<dyn Provider>> {
        let translation = &self.config.translation;
        let timeout_secs = translation.get_timeout_secs();

        let provider: Box<dyn Provider> = match translation.provider {
            TranslationProvider::Bhashini => {
                let credentials = BhashiniCredentials::from_credentials(credentials)
                    .context("Bhashini credentials are not configured")?;
                Box::new(Bhashini::new(
                    credentials,
                    translation.get_endpoint(),
                    translation.get_pipeline_id(),
                    timeout_secs,
                ))
            }
            TranslationProvider::GoogleCloud => {
                let auth = GoogleCloudAuth::from_credentials(credentials)
                    .context("Google Cloud credentials are not configured")?;
                Box::new(GoogleCloud::new(
                    auth,
                    translation.get_endpoint(),
                    translation.get_request_delay(),
                    timeout_secs,
                ))
            }
            TranslationProvider::GoogleFree => Box::new(GoogleFree::new(
                translation.get_endpoint(),
                translation.get_request_delay(),
                timeout_secs,
            )),
        };

        Ok(provider)
    }

    /// Load the input document
    pub fn load_document(&self) -> Result<Value, AppError> {
        let input_file = Path::new(&self.config.input_file);
        if !FileManager::file_exists(input_file) {
            return Err(AppError::File(format!("Input file {:?} not found", input_file)));
        }

        let content = std::fs::read_to_string(input_file)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Output path for a target language
    pub fn output_path(&self, target_language: &str) -> PathBuf {
        FileManager::generate_output_path(
            &self.config.input_file,
            self.config.translation.get_output_dir(),
            target_language,
        )
    }

    /// Translate the input document into every configured target language
    pub async fn run(&self, provider: &mut dyn Provider, force_overwrite: bool) -> Result<RunSummary> {
        let start_time = Instant::now();

        info!("Loading input file: {}", self.config.input_file);
        let original = self.load_document()?;

        let keys = self.config.translatable_keys();
        let languages = self.config.target_language_list()?;
        let language_delay = self.config.translation.get_language_delay();

        info!("Calculating translation workload...");
        let total_items = count_translatable(&original, &keys);
        info!("Total items to translate per language: {}", total_items);

        let output_dir = self.config.translation.get_output_dir();
        FileManager::ensure_dir(&output_dir)?;

        let multi_progress = MultiProgress::new();
        let mut summary = RunSummary {
            total_items,
            reports: Vec::with_capacity(languages.len()),
        };

        for (index, language) in languages.iter().enumerate() {
            info!("Starting translation for {} with {}", language, provider.name());

            let outcome = self
                .run_language(provider, &original, &keys, language, total_items, &multi_progress, force_overwrite)
                .await?;

            let did_work = matches!(outcome, LanguageOutcome::Written { .. });
            summary.reports.push(LanguageReport {
                language: language.clone(),
                outcome,
            });

            if did_work && !language_delay.is_zero() && index + 1 < languages.len() {
                info!("Waiting {} seconds before next language...", language_delay.as_secs());
                tokio::time::sleep(language_delay).await;
            }
        }

        info!(
            "Finished {} language(s), skipped {}, {} item(s) kept source text. Total time: {}",
            summary.written(),
            summary.skipped(),
            summary.failed_items(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    #[allow(clippy::too_many_arguments)]
    async fn run_language(
        &self,
        provider: &mut dyn Provider,
        original: &Value,
        keys: &TranslatableKeys,
        language: &TargetLanguage,
        total_items: usize,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<LanguageOutcome> {
        let output_path = self.output_path(&language.code);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {}, {:?} already exists (use -f to force overwrite)", language, output_path);
            return Ok(LanguageOutcome::SkippedExisting { path: output_path });
        }

        let source_language = self.config.source_language.as_str();
        debug!("Preparing {} for {} -> {}", provider.name(), source_language, language.code);
        if let Err(e) = provider.prepare(source_language, &language.code).await {
            let error = TranslationError::Discovery {
                source_language: source_language.to_string(),
                target_language: language.code.clone(),
                reason: e.to_string(),
            };
            error!("Skipping {} due to config failure. {}", language.name, error);
            return Ok(LanguageOutcome::SkippedUnavailable { reason: error.to_string() });
        }

        let started = Instant::now();
        let mut translated = original.clone();
        let progress_bar = multi_progress.add(self.create_progress_bar(total_items, language));

        let translator = TreeTranslator::new(&*provider, keys, source_language);
        let pb = progress_bar.clone();
        let stats = translator
            .translate_document_with_progress(&mut translated, &language.code, &move |done| {
                pb.set_position(done as u64);
            })
            .await;

        progress_bar.finish_and_clear();

        FileManager::write_json(&output_path, &translated)?;
        let elapsed = started.elapsed();

        if stats.failed > 0 {
            warn!("{} of {} item(s) kept their source text for {}", stats.failed, stats.completed(), language.name);
        }
        info!("Saved translated JSON to {:?} ({})", output_path, Self::format_duration(elapsed));

        Ok(LanguageOutcome::Written {
            path: output_path,
            stats,
            elapsed,
        })
    }

    fn create_progress_bar(&self, total_items: usize, language: &TargetLanguage) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(total_items as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} items ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message(format!("Translating to {}", language.name));
        progress_bar
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
