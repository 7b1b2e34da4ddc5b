/*!
 * Controller construction, credentials and configuration lifecycle
 */

use anyhow::Result;

use jsontrans::app_config::{Config, TranslationProvider};
use jsontrans::app_controller::Controller;
use jsontrans::credentials::{self, Credentials};
use jsontrans::providers::mock::MockProvider;
use crate::common;

#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.target_languages = vec!["klingon".to_string()];

    let result = Controller::with_config(config);
    assert!(result.is_err());
}

#[test]
fn test_controller_outputPath_shouldFollowActiveProvider() -> Result<()> {
    let mut config = Config::default();
    config.input_file = "input_documents/ACBP.json".to_string();
    config.translation.provider = TranslationProvider::GoogleCloud;

    let controller = Controller::with_config(config)?;
    assert_eq!(
        controller.output_path("te"),
        std::path::Path::new("google_translated_files/ACBP_te.json")
    );

    Ok(())
}

#[test]
fn test_create_provider_withMissingCredentials_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let config = common::test_config(temp_dir.path(), TranslationProvider::Bhashini, &["hi"])?;
    let controller = Controller::with_config(config)?;
    let only_user = Credentials::from_pairs([(credentials::BHASHINI_USER_ID, "user")]);
    let error = controller.create_provider(&only_user).unwrap_err();
    assert!(format!("{:#}", error).contains(credentials::BHASHINI_API_KEY));

    let config = common::test_config(temp_dir.path(), TranslationProvider::GoogleCloud, &["hi"])?;
    let controller = Controller::with_config(config)?;
    assert!(controller.create_provider(&Credentials::default()).is_err());

    let token = Credentials::from_pairs([(credentials::GOOGLE_OAUTH_ACCESS_TOKEN, "ya29.token")]);
    assert!(controller.create_provider(&token).is_ok());

    Ok(())
}

#[test]
fn test_credentials_load_withDotfile_shouldFeedProviderCreation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let env_file = common::create_test_file(
        temp_dir.path(),
        ".env",
        "BHASHINI_USER_ID=dotfile-user\nBHASHINI_API_KEY=\"dotfile-key\"\n",
    )?;

    let credentials = Credentials::load(&env_file)?;
    assert_eq!(credentials.get(credentials::BHASHINI_USER_ID), Some("dotfile-user"));
    assert_eq!(credentials.get(credentials::BHASHINI_API_KEY), Some("dotfile-key"));

    let config = common::test_config(temp_dir.path(), TranslationProvider::Bhashini, &["hi"])?;
    let controller = Controller::with_config(config)?;
    let provider = controller.create_provider(&credentials)?;
    assert_eq!(provider.name(), "Bhashini");

    Ok(())
}

#[test]
fn test_full_lifecycle_withBlockingRuntime_shouldProduceOutputs() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("conf.json");

    // First start writes the defaults
    let mut config = Config::load_or_create(&config_path)?;
    assert!(config_path.exists());

    let tuned = common::test_config(temp_dir.path(), TranslationProvider::GoogleFree, &["mr", "ta"])?;
    config.input_file = tuned.input_file;
    config.target_languages = tuned.target_languages;
    config.translation = tuned.translation;

    let controller = Controller::with_config(config)?.with_progress(false);
    let mut provider = MockProvider::working();

    let summary = tokio_test::block_on(controller.run(&mut provider, false))?;
    assert_eq!(summary.written(), 2);
    assert!(controller.output_path("mr").exists());
    assert!(controller.output_path("ta").exists());

    Ok(())
}
