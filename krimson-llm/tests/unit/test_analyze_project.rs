//! Unit tests for AnalyzeProjectUseCase

use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use krimson_llm::application::use_cases::AnalyzeProjectUseCase;
use krimson_llm::domain::{LlmError, Role};

use crate::common::{MockLlmProvider, create_test_config};

#[tokio::test]
async fn test_analyze_project_success() {
    let reply = r#"{"completion": 72, "summary": "Checkout works", "risks": ["No CI"]}"#;
    let provider = Arc::new(MockLlmProvider::with_text_response(reply));
    let use_case = AnalyzeProjectUseCase::new(provider.clone(), create_test_config());

    let payload = use_case
        .execute("storefront", "Project manifest:\nsrc/main.ts")
        .await
        .unwrap();

    assert_eq!(payload.completion, Some(json!(72)));
    assert_eq!(payload.summary.as_deref(), Some("Checkout works"));
    assert_eq!(payload.risks, Some(vec![json!("No CI")]));

    let requests = provider.captured_requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model.as_deref(), Some("test-model"));
    assert_eq!(requests[0].temperature, Some(0.3));
    assert_eq!(requests[0].messages[0].role, Role::User);
    assert!(requests[0].messages[0].content.contains("src/main.ts"));
    assert!(requests[0].messages[0].content.contains("storefront"));
}

#[rstest]
#[case::fenced("```json\n{\"completion\": 55}\n```")]
#[case::prose("Here is my analysis: {\"completion\": 55} Hope it helps!")]
#[case::whitespace("\n\n  {\"completion\": 55}  \n")]
#[tokio::test]
async fn test_analyze_project_extracts_wrapped_json(#[case] reply: &str) {
    let provider = Arc::new(MockLlmProvider::with_text_response(reply));
    let use_case = AnalyzeProjectUseCase::new(provider, create_test_config());

    let payload = use_case.execute("demo", "ctx").await.unwrap();

    assert_eq!(payload.completion, Some(json!(55)));
}

#[rstest]
#[case::prose_only("I am unable to analyze this repository.")]
#[case::array_only("[1, 2, 3]")]
#[case::empty("")]
#[tokio::test]
async fn test_analyze_project_without_object_fails(#[case] reply: &str) {
    let provider = Arc::new(MockLlmProvider::with_text_response(reply));
    let use_case = AnalyzeProjectUseCase::new(provider, create_test_config());

    let error = use_case.execute("demo", "ctx").await.unwrap_err();

    assert!(matches!(error, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_analyze_project_propagates_provider_error() {
    let provider = Arc::new(MockLlmProvider::new().with_error(LlmError::auth("bad key")));
    let use_case = AnalyzeProjectUseCase::new(provider, create_test_config());

    let error = use_case.execute("demo", "ctx").await.unwrap_err();

    assert!(matches!(error, LlmError::Authentication(_)));
}

#[tokio::test(start_paused = true)]
async fn test_analyze_project_times_out() {
    let provider = Arc::new(
        MockLlmProvider::with_text_response("{}").with_delay(Duration::from_secs(600)),
    );
    let mut config = create_test_config();
    config.timeout_seconds = 2;
    let use_case = AnalyzeProjectUseCase::new(provider, config);

    let error = use_case.execute("demo", "ctx").await.unwrap_err();

    assert!(matches!(error, LlmError::Timeout { seconds: 2 }));
}
