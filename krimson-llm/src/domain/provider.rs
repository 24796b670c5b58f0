//! LLM provider abstraction

use async_trait::async_trait;

use crate::domain::error::LlmError;
use crate::domain::messages::{CompletionRequest, CompletionResponse};

/// Provider capability flags
#[derive(Debug, Clone, Default)]
pub struct ProviderCapabilities {
    /// Accepts a JSON-only output mode
    pub json_mode: bool,
    /// Maximum context window size (tokens)
    pub max_context_tokens: u32,
    /// Maximum output tokens
    pub max_output_tokens: u32,
}

impl ProviderCapabilities {
    pub fn text_only(max_context: u32, max_output: u32) -> Self {
        Self {
            json_mode: false,
            max_context_tokens: max_context,
            max_output_tokens: max_output,
        }
    }
}

/// Metadata about a provider
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    /// Provider identifier (e.g. "google_ai")
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// API version spoken by the provider
    pub version: &'static str,
    pub capabilities: ProviderCapabilities,
}

/// Core trait for LLM providers
///
/// Object-safe, so providers are shared as `Arc<dyn LlmProvider>`.
///
/// ```rust,ignore
/// use krimson_llm::{CompletionRequest, LlmProvider};
///
/// async fn ask(provider: &dyn LlmProvider) -> Result<String, LlmError> {
///     let request = CompletionRequest::new().with_user("Summarize this repository");
///     Ok(provider.complete(request).await?.content)
/// }
/// ```
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn info(&self) -> ProviderInfo;

    /// Generate a completion
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Check if the provider can accept requests
    async fn health_check(&self) -> Result<(), LlmError> {
        let request = CompletionRequest::new()
            .with_user("ping")
            .with_max_tokens(1);

        self.complete(request).await.map(|_| ())
    }

    /// Model used when a request does not name one
    fn default_model(&self) -> &str;
}
