//! Integration tests for GoogleAIProvider using wiremock

use serde_json::json;
use std::time::Duration;

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use krimson_llm::domain::{CompletionRequest, LlmError, LlmProvider, Message};
use krimson_llm::infrastructure::providers::GoogleAIProvider;

fn create_provider(mock_server: &MockServer) -> GoogleAIProvider {
    GoogleAIProvider::new("test-api-key", "test-model")
        .unwrap()
        .with_base_url(mock_server.uri())
        .with_timeout(10)
        .unwrap()
}

fn create_test_request() -> CompletionRequest {
    CompletionRequest::new()
        .with_model("test-model")
        .with_message(Message::user("Assess this project"))
        .with_max_tokens(100)
        .with_temperature(0.3)
}

async fn mount_status(mock_server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "error": { "message": "upstream said no" }
        })))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_google_ai_provider_complete_success() {
    let mock_server = MockServer::start().await;

    let response_body = json!({
        "candidates": [{
            "content": {
                "parts": [
                    { "text": "{\"completion\": 61," },
                    { "text": " \"summary\": \"ok\"}" }
                ]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 10,
            "candidatesTokenCount": 8,
            "totalTokenCount": 18
        }
    });

    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .and(header("x-goog-api-key", "test-api-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "Assess this project" }] }],
            "generationConfig": { "maxOutputTokens": 100 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server);
    let response = provider.complete(create_test_request()).await.unwrap();

    assert_eq!(response.model, "test-model");
    assert_eq!(response.text(), "{\"completion\": 61, \"summary\": \"ok\"}");
    assert_eq!(response.usage.total_tokens, 18);
    assert!(!response.is_truncated());
}

#[tokio::test]
async fn test_google_ai_provider_uses_default_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{}" }] }, "finishReason": "MAX_TOKENS" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server);
    let response = provider
        .complete(CompletionRequest::new().with_user("hi"))
        .await
        .unwrap();

    assert!(response.is_truncated());
}

#[tokio::test]
async fn test_google_ai_provider_rate_limited() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, 429).await;

    let error = create_provider(&mock_server)
        .complete(create_test_request())
        .await
        .unwrap_err();

    assert!(matches!(error, LlmError::RateLimited { retry_after: None, .. }));
    assert!(error.to_string().contains("Rate limited"));
}

#[tokio::test]
async fn test_google_ai_provider_rate_limited_with_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
        .mount(&mock_server)
        .await;

    let error = create_provider(&mock_server)
        .complete(create_test_request())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        LlmError::RateLimited {
            retry_after: Some(12),
            ..
        }
    ));
}

#[tokio::test]
async fn test_api_key_is_sent_as_header_not_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{}" }] }, "finishReason": "STOP" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    create_provider(&mock_server)
        .complete(create_test_request())
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
    assert_eq!(
        requests[0]
            .headers
            .get("x-goog-api-key")
            .and_then(|value| value.to_str().ok()),
        Some("test-api-key")
    );
}

#[tokio::test]
async fn test_connection_error_does_not_expose_api_key() {
    let provider = GoogleAIProvider::new("SECRET-KEY-123", "test-model")
        .unwrap()
        .with_base_url("http://127.0.0.1:1")
        .with_timeout(5)
        .unwrap();

    let error = provider.complete(create_test_request()).await.unwrap_err();

    assert!(matches!(error, LlmError::Network(_)));
    assert!(!error.to_string().contains("SECRET-KEY-123"));
    assert!(!format!("{error:?}").contains("SECRET-KEY-123"));
}

#[tokio::test]
async fn test_client_timeout_reports_configured_seconds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "candidates": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let provider = GoogleAIProvider::new("test-api-key", "test-model")
        .unwrap()
        .with_base_url(mock_server.uri())
        .with_timeout(1)
        .unwrap();

    let error = provider.complete(create_test_request()).await.unwrap_err();

    assert!(matches!(error, LlmError::Timeout { seconds: 1 }));
    assert_eq!(error.to_string(), "Request timed out after 1s");
}

#[tokio::test]
async fn test_google_ai_provider_auth_errors() {
    for status in [401, 403] {
        let mock_server = MockServer::start().await;
        mount_status(&mock_server, status).await;

        let error = create_provider(&mock_server)
            .complete(create_test_request())
            .await
            .unwrap_err();

        assert!(matches!(error, LlmError::Authentication(_)), "status {status}");
    }
}

#[tokio::test]
async fn test_google_ai_provider_server_error() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, 503).await;

    let error = create_provider(&mock_server)
        .complete(create_test_request())
        .await
        .unwrap_err();

    assert!(error.to_string().contains("Service unavailable"));
}

#[tokio::test]
async fn test_google_ai_provider_other_status_is_invalid_response() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, 400).await;

    let error = create_provider(&mock_server)
        .complete(create_test_request())
        .await
        .unwrap_err();

    assert!(matches!(error, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_google_ai_provider_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
        .mount(&mock_server)
        .await;

    let error = create_provider(&mock_server)
        .complete(create_test_request())
        .await
        .unwrap_err();

    assert!(matches!(error, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_google_ai_provider_health_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "pong" }] }, "finishReason": "STOP" }]
        })))
        .mount(&mock_server)
        .await;

    assert!(create_provider(&mock_server).health_check().await.is_ok());
}
