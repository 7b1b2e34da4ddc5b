/*!
 * Common test utilities for the jsontrans test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use serde_json::{json, Value};
use tempfile::TempDir;

use jsontrans::app_config::{Config, TranslationProvider};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Route log output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A small capacity-building plan shaped like the real input documents
pub fn sample_document() -> Value {
    json!({
        "ministry": "Ministry of Example Affairs",
        "designations": [
            {
                "designation_name": "Section Officer",
                "wing_division_section": "Administration",
                "role_responsibilities": ["Prepare budget notes", "  ", "Review files"],
                "competencies": [
                    {
                        "theme": "Communication",
                        "activities": ["Run a workshop", ""],
                        "rationale": "Improve drafting skills"
                    }
                ]
            },
            {
                "designation_name": "",
                "wing_division_section": null,
                "role_responsibilities": [],
                "competencies": [{"theme": "Finance", "rationale": "Understand GFR rules", "activities": null}]
            }
        ],
        "count": 2
    })
}

/// Number of leaves `sample_document` contains
pub const SAMPLE_ITEMS: usize = 7;

/// Write the sample document into `dir` and return its path
pub fn create_sample_input(dir: &Path) -> Result<PathBuf> {
    let content = serde_json::to_string_pretty(&sample_document())?;
    create_test_file(dir, "ACBP.json", &content)
}

/// Config pointing input and output into `dir`
pub fn test_config(dir: &Path, provider: TranslationProvider, languages: &[&str]) -> Result<Config> {
    let input = create_sample_input(dir)?;

    let mut config = Config::default();
    config.input_file = input.to_string_lossy().to_string();
    config.target_languages = languages.iter().map(|l| l.to_string()).collect();
    config.translation.provider = provider;

    let provider_config = config.translation.provider_config_mut(provider);
    provider_config.output_dir = dir.join("out").to_string_lossy().to_string();
    provider_config.request_delay_ms = Some(0);
    provider_config.language_delay_secs = Some(0);
    provider_config.timeout_secs = 5;

    Ok(config)
}

/// Credentials accepted by the wiremock Bhashini server
pub fn bhashini_credentials() -> jsontrans::credentials::BhashiniCredentials {
    jsontrans::credentials::BhashiniCredentials {
        user_id: "test-user".to_string(),
        api_key: "test-ulca-key".to_string(),
    }
}

/// Discovery response routing compute calls back to `server_uri`
pub fn bhashini_discovery_body(server_uri: &str, target_language: &str) -> Value {
    json!({
        "languages": [],
        "pipelineResponseConfig": [{
            "taskType": "translation",
            "config": [{
                "serviceId": format!("indictrans-en-{}", target_language),
                "modelId": "641d1d7c8ecee6735a1b37c3",
                "language": {"sourceLanguage": "en", "targetLanguage": target_language}
            }]
        }],
        "pipelineInferenceAPIEndPoint": {
            "callbackUrl": format!("{}/services/inference/pipeline", server_uri),
            "inferenceApiKey": {"name": "Authorization", "value": "inference-secret"}
        }
    })
}

/// Compute response carrying `target`
pub fn bhashini_compute_body(target: &str) -> Value {
    json!({
        "pipelineResponse": [{
            "taskType": "translation",
            "config": null,
            "output": [{"source": "ignored", "target": target}]
        }]
    })
}
