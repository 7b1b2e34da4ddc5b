/*!
 * Tests for the Bhashini pipeline client
 */

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jsontrans::errors::ProviderError;
use jsontrans::providers::Provider;
use jsontrans::providers::bhashini::Bhashini;
use crate::common;

const DISCOVERY_PATH: &str = "/ulca/apis/v0/model/getModelsPipeline";

fn client_for(server: &MockServer) -> Bhashini {
    Bhashini::new(
        common::bhashini_credentials(),
        format!("{}{}", server.uri(), DISCOVERY_PATH),
        "",
        5,
    )
}

#[tokio::test]
async fn test_discover_withValidResponse_shouldResolveService() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DISCOVERY_PATH))
        .and(header("userID", "test-user"))
        .and(header("ulcaApiKey", "test-ulca-key"))
        .and(body_partial_json(json!({
            "pipelineTasks": [{
                "taskType": "translation",
                "config": {"language": {"sourceLanguage": "en", "targetLanguage": "mr"}}
            }],
            "pipelineRequestConfig": {"pipelineId": "64392f96daac500b55c543cd"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::bhashini_discovery_body(&server.uri(), "mr")))
        .expect(1)
        .mount(&server)
        .await;

    let service = client_for(&server).discover("en", "mr").await.unwrap();

    assert_eq!(service.service_id, "indictrans-en-mr");
    assert_eq!(service.compute_url, format!("{}/services/inference/pipeline", server.uri()));
    assert_eq!(service.auth_header_name, "Authorization");
    assert_eq!(service.auth_header_value, "inference-secret");
    assert_eq!(service.language.target_language, "mr");
}

#[tokio::test]
async fn test_prepare_thenTranslate_shouldCallComputeWithServiceId() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DISCOVERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::bhashini_discovery_body(&server.uri(), "hi")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/services/inference/pipeline"))
        .and(header("Authorization", "inference-secret"))
        .and(body_partial_json(json!({
            "pipelineTasks": [{"config": {"serviceId": "indictrans-en-hi"}}],
            "inputData": {"input": [{"source": "Review files"}]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::bhashini_compute_body("फ़ाइलों की समीक्षा करें")))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.prepare("en", "hi").await.unwrap();
    assert!(client.service("hi").is_some());

    let translated = client.translate("Review files", "en", "hi").await.unwrap();
    assert_eq!(translated, "फ़ाइलों की समीक्षा करें");
}

#[tokio::test]
async fn test_translate_withoutPrepare_shouldReturnNotPrepared() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let result = client.translate("Hello", "en", "ta").await;
    assert!(matches!(result, Err(ProviderError::NotPrepared { .. })));
}

#[tokio::test]
async fn test_discover_withUnauthorized_shouldReturnAuthenticationError() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DISCOVERY_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid ulcaApiKey"))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let result = client.prepare("en", "gu").await;

    match result {
        Err(ProviderError::AuthenticationError(message)) => assert!(message.contains("invalid ulcaApiKey")),
        other => panic!("Unexpected result: {:?}", other),
    }
    assert!(client.service("gu").is_none());
}

#[tokio::test]
async fn test_discover_withMissingCallback_shouldReturnParseError() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DISCOVERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pipelineResponseConfig": [{"config": [{"serviceId": "x"}]}]
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).discover("en", "or").await;
    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}

#[tokio::test]
async fn test_translate_withEmptyComputeOutput_shouldReturnParseError() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DISCOVERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::bhashini_discovery_body(&server.uri(), "pa")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/services/inference/pipeline"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pipelineResponse": []})))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.prepare("en", "pa").await.unwrap();

    let result = client.translate("Hello", "en", "pa").await;
    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}
