//! End-to-end tests of the assembled application

mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{TestConfigBuilder, test_server};

fn readme_upload(file_name: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "project",
        Part::bytes(b"# Notes\nTODO: write docs".to_vec())
            .file_name(file_name)
            .mime_type("text/markdown"),
    )
}

#[tokio::test]
async fn test_app_serves_health_and_docs() {
    let server = test_server(&TestConfigBuilder::new().build());

    server.get("/api/health").await.assert_status_ok();
    server.get("/api-docs/openapi.json").await.assert_status_ok();
}

#[tokio::test]
async fn test_docs_can_be_disabled() {
    let server = test_server(&TestConfigBuilder::new().without_docs().build());

    server
        .get("/api-docs/openapi.json")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_goes_through_gemini() {
    let gemini = MockServer::start().await;
    let analysis = json!({
        "completion": 48,
        "summary": "Docs only",
        "techStack": ["Markdown"],
        "insights": {"totalFiles": 1, "todoCount": 1, "documentation": "incomplete"}
    });
    Mock::given(method("POST"))
        .and(path("/models/gemini-pro:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": analysis.to_string()}]},
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&gemini)
        .await;

    let config = TestConfigBuilder::new()
        .with_gemini(&gemini.uri(), "test-key")
        .build();
    let server = test_server(&config);

    let response = server
        .post("/api/analysis/upload")
        .multipart(readme_upload("notes.md"))
        .await;

    response.assert_status_ok();
    let record: Value = response.json();
    assert_eq!(record["projectId"], "notes");
    assert_eq!(record["completion"], 48);
    assert_eq!(record["summary"], "Docs only");
    assert_eq!(record["techStack"], json!(["Markdown"]));
    assert_eq!(record["insights"]["todoCount"], 1);
    assert_eq!(record["insights"]["documentation"], "incomplete");
    assert_eq!(record["insights"]["detectedLanguage"], "Unknown");
}

#[tokio::test]
async fn test_gemini_outage_falls_back() {
    let gemini = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&gemini)
        .await;

    let config = TestConfigBuilder::new()
        .with_gemini(&gemini.uri(), "test-key")
        .build();
    let server = test_server(&config);

    let response = server
        .post("/api/analysis/upload")
        .multipart(readme_upload("notes.md"))
        .await;

    response.assert_status_ok();
    let record: Value = response.json();
    assert_eq!(record["recommendedTasks"][0]["id"], "ai-1");
}

#[tokio::test]
async fn test_history_limit_is_configurable() {
    let server = test_server(&TestConfigBuilder::new().with_history_limit(2).build());

    for _ in 0..3 {
        server
            .post("/api/analysis/upload")
            .multipart(readme_upload("notes.md"))
            .await
            .assert_status_ok();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let body: Value = server.get("/api/analysis/history/notes").await.json();
    assert_eq!(body["history"].as_array().map(Vec::len), Some(2));
}
