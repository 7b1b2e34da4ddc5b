use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::credentials::BhashiniCredentials;
use crate::errors::ProviderError;
use crate::providers::{Provider, check_status};

/// Default configuration-discovery URL of the ULCA pipeline API
pub const DEFAULT_CONFIG_URL: &str = "https://meity-auth.ulcacontrib.org/ulca/apis/v0/model/getModelsPipeline";

/// MeitY standard pipeline identifier
pub const DEFAULT_PIPELINE_ID: &str = "64392f96daac500b55c543cd";

const TASK_TYPE: &str = "translation";

/// Bhashini client for the ULCA pipeline API
///
/// Every language pair needs a discovery call before translating; the
/// resolved services are kept per target language.
#[derive(Debug)]
pub struct Bhashini {
    /// HTTP client for API requests
    client: Client,
    /// User identifier and ULCA API key
    credentials: BhashiniCredentials,
    /// Configuration-discovery URL
    config_url: String,
    /// Pipeline identifier sent with discovery requests
    pipeline_id: String,
    /// Resolved services keyed by target language
    services: HashMap<String, PipelineService>,
}

/// Source/target language pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePair {
    pub source_language: String,
    pub target_language: String,
}

impl LanguagePair {
    pub fn new(source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Pipeline request, shared by discovery and compute calls
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRequest {
    pipeline_tasks: Vec<PipelineTask>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pipeline_request_config: Option<PipelineRequestConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    input_data: Option<InputData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PipelineTask {
    task_type: String,
    config: TaskConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskConfig {
    language: LanguagePair,

    #[serde(skip_serializing_if = "Option::is_none")]
    service_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PipelineRequestConfig {
    pipeline_id: String,
}

#[derive(Debug, Serialize)]
struct InputData {
    input: Vec<InputItem>,
}

#[derive(Debug, Serialize)]
struct InputItem {
    source: String,
}

impl PipelineRequest {
    /// Discovery request for a language pair
    pub fn discovery(language: LanguagePair, pipeline_id: impl Into<String>) -> Self {
        Self {
            pipeline_tasks: vec![PipelineTask {
                task_type: TASK_TYPE.to_string(),
                config: TaskConfig { language, service_id: None },
            }],
            pipeline_request_config: Some(PipelineRequestConfig { pipeline_id: pipeline_id.into() }),
            input_data: None,
        }
    }

    /// Compute request translating one string with a discovered service
    pub fn compute(service: &PipelineService, text: impl Into<String>) -> Self {
        Self {
            pipeline_tasks: vec![PipelineTask {
                task_type: TASK_TYPE.to_string(),
                config: TaskConfig {
                    language: service.language.clone(),
                    service_id: Some(service.service_id.clone()),
                },
            }],
            pipeline_request_config: None,
            input_data: Some(InputData {
                input: vec![InputItem { source: text.into() }],
            }),
        }
    }
}

/// Discovery response; every field is optional so that missing values
/// surface as parse errors with a useful message
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResponse {
    #[serde(default)]
    pub pipeline_response_config: Vec<ResponseConfig>,

    #[serde(rename = "pipelineInferenceAPIEndPoint", default)]
    pub pipeline_inference_api_end_point: Option<InferenceEndpoint>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseConfig {
    #[serde(default)]
    pub config: Vec<ServiceConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    pub service_id: Option<String>,
    pub language: Option<LanguagePair>,
    pub inference_api_key: Option<InferenceApiKey>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceEndpoint {
    pub callback_url: Option<String>,
    pub inference_api_key: Option<InferenceApiKey>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InferenceApiKey {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// Routing and auth details resolved by a discovery call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineService {
    /// Service identifier for compute requests
    pub service_id: String,
    /// Compute endpoint URL
    pub compute_url: String,
    /// Inference auth header name
    pub auth_header_name: String,
    /// Inference auth header value
    pub auth_header_value: String,
    /// Language pair reported by the service
    pub language: LanguagePair,
}

impl DiscoveryResponse {
    /// Resolve the service for a requested pair
    ///
    /// The inference key is read from the inference endpoint, falling back
    /// to the first service config. The language pair falls back to the
    /// requested one when the response omits it.
    pub fn into_service(self, requested: LanguagePair) -> Result<PipelineService, ProviderError> {
        let missing = |field: &str| ProviderError::ParseError(format!("discovery response is missing {}", field));

        let endpoint = self.pipeline_inference_api_end_point.unwrap_or_default();
        let service_config = self
            .pipeline_response_config
            .into_iter()
            .next()
            .and_then(|c| c.config.into_iter().next())
            .ok_or_else(|| missing("pipelineResponseConfig[0].config[0]"))?;

        let service_id = service_config.service_id.ok_or_else(|| missing("serviceId"))?;
        let compute_url = endpoint.callback_url.ok_or_else(|| missing("callbackUrl"))?;

        let api_key = endpoint
            .inference_api_key
            .or(service_config.inference_api_key)
            .ok_or_else(|| missing("inferenceApiKey"))?;
        let auth_header_name = api_key.name.ok_or_else(|| missing("inferenceApiKey.name"))?;
        let auth_header_value = api_key.value.ok_or_else(|| missing("inferenceApiKey.value"))?;

        Ok(PipelineService {
            service_id,
            compute_url,
            auth_header_name,
            auth_header_value,
            language: service_config.language.unwrap_or(requested),
        })
    }
}

/// Compute response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeResponse {
    #[serde(default)]
    pub pipeline_response: Vec<TaskResponse>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskResponse {
    #[serde(default)]
    pub output: Vec<TaskOutput>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskOutput {
    pub target: Option<String>,
}

impl ComputeResponse {
    /// Extract the translated text from `pipelineResponse[0].output[0].target`
    pub fn extract_text(self) -> Result<String, ProviderError> {
        self.pipeline_response
            .into_iter()
            .next()
            .and_then(|r| r.output.into_iter().next())
            .and_then(|o| o.target)
            .ok_or_else(|| ProviderError::ParseError("Unexpected response format from compute API".to_string()))
    }
}

impl Bhashini {
    /// Create a new Bhashini client
    pub fn new(
        credentials: BhashiniCredentials,
        config_url: impl Into<String>,
        pipeline_id: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        let config_url = config_url.into();
        let pipeline_id = pipeline_id.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            credentials,
            config_url: if config_url.is_empty() { DEFAULT_CONFIG_URL.to_string() } else { config_url },
            pipeline_id: if pipeline_id.is_empty() { DEFAULT_PIPELINE_ID.to_string() } else { pipeline_id },
            services: HashMap::new(),
        }
    }

    /// Perform a discovery call for a language pair without storing the result
    pub async fn discover(&self, source_language: &str, target_language: &str) -> Result<PipelineService, ProviderError> {
        let language = LanguagePair::new(source_language, target_language);
        let request = PipelineRequest::discovery(language.clone(), &self.pipeline_id);

        debug!("Fetching pipeline configuration for {} -> {}", source_language, target_language);

        let response = self.client.post(&self.config_url)
            .header("userID", &self.credentials.user_id)
            .header("ulcaApiKey", &self.credentials.api_key)
            .json(&request)
            .send()
            .await?;

        let response = check_status(response).await.inspect_err(|e| {
            error!("Error fetching pipeline config for {} -> {}: {}", source_language, target_language, e);
        })?;

        let discovery: DiscoveryResponse = response.json().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse discovery response: {}", e)))?;

        discovery.into_service(language)
    }

    /// Service resolved for a target language, if prepared
    pub fn service(&self, target_language: &str) -> Option<&PipelineService> {
        self.services.get(target_language)
    }

    async fn compute(&self, service: &PipelineService, text: &str) -> Result<String, ProviderError> {
        let request = PipelineRequest::compute(service, text);

        let response = self.client.post(&service.compute_url)
            .header(service.auth_header_name.as_str(), &service.auth_header_value)
            .json(&request)
            .send()
            .await?;

        let response = check_status(response).await?;
        let compute: ComputeResponse = response.json().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse compute response: {}", e)))?;

        compute.extract_text()
    }
}

#[async_trait]
impl Provider for Bhashini {
    fn name(&self) -> &str {
        "Bhashini"
    }

    async fn prepare(&mut self, source_language: &str, target_language: &str) -> Result<(), ProviderError> {
        let service = self.discover(source_language, target_language).await?;
        debug!("Resolved service {} at {}", service.service_id, service.compute_url);
        self.services.insert(target_language.to_string(), service);
        Ok(())
    }

    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String, ProviderError> {
        let service = self.services.get(target_language).ok_or_else(|| ProviderError::NotPrepared {
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        })?;

        self.compute(service, text).await
    }
}
