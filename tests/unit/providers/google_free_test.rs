/*!
 * Tests for the community translate endpoint client
 */

use std::time::Duration;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jsontrans::errors::ProviderError;
use jsontrans::providers::Provider;
use jsontrans::providers::google_free::GoogleFree;

#[tokio::test]
async fn test_translate_shouldSendQueryAndJoinSegments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("client", "gtx"))
        .and(query_param("sl", "en"))
        .and(query_param("tl", "ml"))
        .and(query_param("dt", "t"))
        .and(query_param("q", "Run a workshop. Review files."))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            [["ഒരു ശിൽപശാല നടത്തുക. ", "Run a workshop. ", null], ["ഫയലുകൾ അവലോകനം ചെയ്യുക.", "Review files.", null]],
            null,
            "en"
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = GoogleFree::new(server.uri(), Duration::ZERO, 5);
    let translated = client.translate("Run a workshop. Review files.", "en", "ml").await.unwrap();

    assert_eq!(translated, "ഒരു ശിൽപശാല നടത്തുക. ഫയലുകൾ അവലോകനം ചെയ്യുക.");
}

#[tokio::test]
async fn test_translate_withNonJsonBody_shouldReturnParseError() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
        .mount(&server)
        .await;

    let client = GoogleFree::new(server.uri(), Duration::ZERO, 5);
    assert!(matches!(
        client.translate("Hello", "en", "hi").await,
        Err(ProviderError::ParseError(_))
    ));
}

#[tokio::test]
async fn test_translate_withUnreachableServer_shouldReturnConnectionError() {
    let client = GoogleFree::new("http://127.0.0.1:9", Duration::ZERO, 2);
    assert!(matches!(
        client.translate("Hello", "en", "hi").await,
        Err(ProviderError::ConnectionError(_))
    ));
}

#[tokio::test]
async fn test_translate_withRequestDelay_shouldPauseAfterEachCall() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["வணக்கம்", "Hello", null]], null, "en"])))
        .mount(&server)
        .await;

    let delay = Duration::from_millis(300);
    let client = GoogleFree::new(server.uri(), delay, 5);

    let started = std::time::Instant::now();
    assert_eq!(client.translate("Hello", "en", "ta").await.unwrap(), "வணக்கம்");
    assert!(started.elapsed() >= delay);
}

#[tokio::test]
async fn test_translate_withRequestDelayAndRateLimit_shouldStillPause() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let delay = Duration::from_millis(300);
    let client = GoogleFree::new(server.uri(), delay, 5);

    let started = std::time::Instant::now();
    assert!(matches!(
        client.translate("Hello", "en", "ta").await,
        Err(ProviderError::ApiError { status_code: 429, .. })
    ));
    assert!(started.elapsed() >= delay);
}
