// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use jsontrans::app_config::{self, Config, TranslationProvider};
use jsontrans::app_controller::Controller;
use jsontrans::credentials::{self, BhashiniCredentials, Credentials};
use jsontrans::providers::bhashini::Bhashini;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Bhashini,
    GoogleCloud,
    GoogleFree,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Bhashini => TranslationProvider::Bhashini,
            CliTranslationProvider::GoogleCloud => TranslationProvider::GoogleCloud,
            CliTranslationProvider::GoogleFree => TranslationProvider::GoogleFree,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate the input document into every target language (default command)
    Translate(TranslateArgs),

    /// Resolve the Bhashini pipeline service for one language pair and print it
    Discover {
        /// Source language code
        #[arg(short, long, default_value = "en")]
        source_language: String,

        /// Target language code
        #[arg(short, long, default_value = "hi")]
        target_language: String,

        /// Credentials dotfile
        #[arg(short, long, default_value = ".env")]
        env_file: PathBuf,

        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Generate shell completions for jsontrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// JSON document to translate (overrides the config file)
    #[arg(short, long, value_name = "INPUT_FILE")]
    input: Option<String>,

    /// Directory for translated documents (overrides the provider default)
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Source language code (e.g., 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Comma separated target language codes (e.g., 'hi,ta,bn')
    #[arg(short = 't', long, value_delimiter = ',')]
    languages: Vec<String>,

    /// Credentials dotfile
    #[arg(short, long)]
    env_file: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// jsontrans - batch translation of JSON document fields
///
/// Translates selected fields of a JSON document into Indic languages using
/// the Bhashini pipeline API, Google Cloud Translation, or the community
/// Google Translate endpoint.
#[derive(Parser, Debug)]
#[command(name = "jsontrans")]
#[command(version)]
#[command(about = "Translate selected JSON fields into multiple languages")]
#[command(long_about = "jsontrans translates the values of selected keys in a JSON document into several target languages.

EXAMPLES:
    jsontrans                                    # Translate using conf.json
    jsontrans -p google-free -t hi,ta            # Community endpoint, Hindi and Tamil only
    jsontrans -i data/plan.json -o out -f        # Custom input and output, overwrite existing
    jsontrans discover -t kn                     # Check Bhashini discovery for Kannada
    jsontrans completions bash > jsontrans.bash  # Generate bash completions

CREDENTIALS:
    Read from the environment and from a .env file (KEY=VALUE per line).
    bhashini     - BHASHINI_USER_ID and BHASHINI_API_KEY
    google-cloud - GOOGLE_API_KEY, or GOOGLE_OAUTH_ACCESS_TOKEN
    google-free  - none")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for log level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, colour) = Self::decoration(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set through set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "jsontrans", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Discover { source_language, target_language, env_file, config_path }) => {
            run_discover(&source_language, &target_language, &env_file, &config_path).await
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    }
}

fn apply_overrides(config: &mut Config, options: &TranslateArgs) {
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(input) = &options.input {
        config.input_file = input.clone();
    }

    if let Some(output_dir) = &options.output_dir {
        let provider = config.translation.provider;
        config.translation.provider_config_mut(provider).output_dir = output_dir.clone();
    }

    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }

    if !options.languages.is_empty() {
        config.target_languages = options.languages.clone();
    }

    if let Some(env_file) = &options.env_file {
        config.env_file = env_file.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // Apply a command line log level before the config is read
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;
    apply_overrides(&mut config, &options);
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    let credentials = Credentials::load(&controller.config().env_file)?;
    let mut provider = controller.create_provider(&credentials)?;

    let summary = controller.run(provider.as_mut(), options.force_overwrite).await?;

    if summary.written() == 0 && summary.skipped() > 0 {
        info!("No language was translated in this run");
    }

    Ok(())
}

async fn run_discover(source_language: &str, target_language: &str, env_file: &Path, config_path: &str) -> Result<()> {
    let config = Config::load_or_create(config_path)?;
    let provider_config = config.translation.get_provider_config(&TranslationProvider::Bhashini);

    let credentials = Credentials::load(env_file)?;
    let bhashini_credentials = BhashiniCredentials::from_credentials(&credentials)
        .context("Missing credentials")?;

    info!("UserID: {}", bhashini_credentials.user_id);
    info!("API Key: {}", credentials::mask_secret(&bhashini_credentials.api_key));

    let client = Bhashini::new(
        bhashini_credentials,
        provider_config.map(|p| p.endpoint.clone()).unwrap_or_default(),
        provider_config.map(|p| p.pipeline_id.clone()).unwrap_or_default(),
        config.translation.get_timeout_secs(),
    );

    let service = client.discover(source_language, target_language).await
        .map_err(|e| anyhow!("Discovery failed for {} -> {}: {}", source_language, target_language, e))?;

    println!("Service ID:    {}", service.service_id);
    println!("Compute URL:   {}", service.compute_url);
    println!("Auth header:   {}: {}", service.auth_header_name, credentials::mask_secret(&service.auth_header_value));
    println!(
        "Language pair: {} -> {}",
        service.language.source_language, service.language.target_language
    );

    Ok(())
}
