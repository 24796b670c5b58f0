//! Google AI Studio (Gemini) provider
//!
//! Speaks the `generateContent` REST endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::RETRY_AFTER};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::domain::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderCapabilities,
    ProviderInfo, Role, StopReason, Usage,
};

/// Default public endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Header carrying the API key, kept out of the URL so it never shows up in errors
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google AI Studio (Gemini) provider
pub struct GoogleAIProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout_seconds: u64,
}

impl GoogleAIProvider {
    /// Create a provider for `model` using the public endpoint
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Self::build_client(DEFAULT_TIMEOUT_SECONDS)?,
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        })
    }

    /// Use a custom base URL (for testing or proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the HTTP client timeout
    pub fn with_timeout(mut self, seconds: u64) -> Result<Self, LlmError> {
        self.client = Self::build_client(seconds)?;
        self.timeout_seconds = seconds;
        Ok(self)
    }

    fn build_client(timeout_seconds: u64) -> Result<Client, LlmError> {
        Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {}", e)))
    }

    /// API URL for a model endpoint
    fn build_url(&self, model: &str, endpoint: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, endpoint)
    }

    fn to_gemini_request(request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .filter(|msg| msg.role != Role::System)
            .map(|msg| GeminiContent {
                role: match msg.role {
                    Role::Assistant => "model".to_string(),
                    _ => "user".to_string(),
                },
                parts: vec![GeminiPart {
                    text: msg.content.clone(),
                }],
            })
            .collect();

        let system_parts: Vec<GeminiPart> = request
            .messages
            .iter()
            .filter(|msg| msg.role == Role::System)
            .map(|msg| GeminiPart {
                text: msg.content.clone(),
            })
            .collect();

        GeminiRequest {
            contents,
            system_instruction: (!system_parts.is_empty()).then(|| GeminiContent {
                role: "user".to_string(),
                parts: system_parts,
            }),
            generation_config: Some(GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            }),
        }
    }

    fn from_gemini_response(
        response: GeminiResponse,
        model: &str,
    ) -> Result<CompletionResponse, LlmError> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
                return Err(LlmError::ContentFiltered { reason });
            }
            return Err(LlmError::InvalidResponse(
                "No candidates in response".to_string(),
            ));
        };

        let content: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|part| part.text).collect())
            .unwrap_or_default();

        let stop_reason = match candidate.finish_reason.as_deref() {
            Some("STOP") => StopReason::EndTurn,
            Some("MAX_TOKENS") => StopReason::MaxTokens,
            Some("SAFETY") => StopReason::ContentFilter,
            _ => StopReason::Other,
        };

        if stop_reason == StopReason::ContentFilter && content.is_empty() {
            return Err(LlmError::ContentFiltered {
                reason: "SAFETY".to_string(),
            });
        }

        let usage = response
            .usage_metadata
            .map(|u| Usage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: format!("gemini-{}", uuid::Uuid::new_v4()),
            model: model.to_string(),
            content,
            stop_reason,
            usage,
            created: u64::try_from(chrono::Utc::now().timestamp()).ok(),
        })
    }

    fn map_status_error(status: StatusCode, body: String, retry_after: Option<u64>) -> LlmError {
        match status.as_u16() {
            429 => match retry_after {
                Some(seconds) => LlmError::rate_limited_with_retry(body, seconds),
                None => LlmError::rate_limited(body),
            },
            401 | 403 => LlmError::auth(body),
            code if code >= 500 => LlmError::ServiceUnavailable(body),
            _ => {
                error!(status = %status, "Google AI API error: {}", body);
                LlmError::InvalidResponse(format!("API error {}: {}", status, body))
            }
        }
    }
}

#[async_trait]
impl LlmProvider for GoogleAIProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: "google_ai",
            name: "Google AI Studio",
            version: "v1beta",
            capabilities: ProviderCapabilities {
                json_mode: true,
                max_context_tokens: 32_768,
                max_output_tokens: 8192,
            },
        }
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = request.model.as_deref().unwrap_or(&self.model);
        let url = self.build_url(model, "generateContent");
        let gemini_request = Self::to_gemini_request(&request);

        debug!(model = model, "Sending request to Google AI");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::timeout(self.timeout_seconds)
                } else {
                    LlmError::from(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse().ok());
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Google AI request failed");
            return Err(Self::map_status_error(status, text, retry_after));
        }

        let body = response.text().await?;
        let gemini_response: GeminiResponse = serde_json::from_str(&body)?;
        Self::from_gemini_response(gemini_response, model)
    }
}

// Gemini wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsageMetadata>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}
