//! Common test utilities and mock implementations

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use krimson_core::config::{GoogleAIConfig, LlmConfig};
use krimson_llm::domain::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderCapabilities,
    ProviderInfo, StopReason, Usage,
};

/// Mock LLM provider for testing
pub struct MockLlmProvider {
    /// Response to return from complete()
    pub response: Option<CompletionResponse>,
    /// Error to return (if any)
    pub error: Option<LlmError>,
    /// Artificial latency before answering
    pub delay: Option<Duration>,
    /// Captured requests for verification
    pub captured_requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmProvider {
    pub fn new() -> Self {
        Self {
            response: None,
            error: None,
            delay: None,
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(mut self, response: CompletionResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_error(mut self, error: LlmError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_text_response(content: &str) -> Self {
        Self::new().with_response(create_completion_response(content))
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: "mock",
            name: "Mock Provider",
            version: "test",
            capabilities: ProviderCapabilities::text_only(8192, 2048),
        }
    }

    fn default_model(&self) -> &str {
        "test-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.captured_requests.lock().await.push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        self.response
            .clone()
            .ok_or_else(|| LlmError::InvalidResponse("No response configured".to_string()))
    }
}

/// Create a standard LLM response with given content
pub fn create_completion_response(content: &str) -> CompletionResponse {
    CompletionResponse {
        id: "test-response-id".to_string(),
        model: "test-model".to_string(),
        content: content.to_string(),
        stop_reason: StopReason::EndTurn,
        usage: Usage {
            prompt_tokens: 100,
            completion_tokens: 50,
            total_tokens: 150,
        },
        created: Some(1234567890),
    }
}

/// Create default test LlmConfig
pub fn create_test_config() -> LlmConfig {
    LlmConfig {
        provider: "google_ai".to_string(),
        google_ai: GoogleAIConfig {
            api_key: Some("test-api-key".to_string()),
            base_url: "https://test.api.example.com".to_string(),
        },
        default_model: "test-model".to_string(),
        temperature: 0.3,
        max_tokens: 2048,
        timeout_seconds: 5,
    }
}
