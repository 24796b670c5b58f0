//! Use case for asking the LLM to assess an uploaded project

use std::sync::Arc;
use std::time::Duration;

use krimson_core::config::LlmConfig;
use krimson_core::domain::analysis::RawAnalysisPayload;
use tracing::{debug, info, warn};

use crate::domain::{CompletionRequest, LlmError, LlmProvider};
use crate::infrastructure::prompts::PromptBuilder;
use crate::infrastructure::response_parser::ResponseParser;

/// Sends a project context to the model and extracts the JSON assessment.
///
/// The call is bounded by `llm.timeout_seconds` and never retried.
pub struct AnalyzeProjectUseCase {
    provider: Arc<dyn LlmProvider>,
    config: LlmConfig,
}

impl AnalyzeProjectUseCase {
    pub fn new(provider: Arc<dyn LlmProvider>, config: LlmConfig) -> Self {
        Self { provider, config }
    }

    /// Analyze `context` and return the model's loosely-typed payload.
    ///
    /// Fails with [`LlmError::Timeout`] when the model does not answer in
    /// time and [`LlmError::InvalidResponse`] when the reply holds no JSON
    /// object.
    pub async fn execute(
        &self,
        project_name: &str,
        context: &str,
    ) -> Result<RawAnalysisPayload, LlmError> {
        let prompt = PromptBuilder::build_analysis_prompt(project_name, context);
        let request = CompletionRequest::new()
            .with_model(self.config.default_model.clone())
            .with_user(prompt)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);

        let timeout_seconds = self.config.timeout_seconds;
        info!(
            project_name = %project_name,
            provider = self.provider.info().id,
            model = %self.config.default_model,
            context_bytes = context.len(),
            "Requesting project analysis"
        );

        let response = tokio::time::timeout(
            Duration::from_secs(timeout_seconds),
            self.provider.complete(request),
        )
        .await
        .map_err(|_| LlmError::timeout(timeout_seconds))??;

        if response.is_truncated() {
            warn!(project_name = %project_name, "Analysis reply hit the token limit");
        }
        debug!(
            completion_tokens = response.usage.completion_tokens,
            "Received analysis reply"
        );

        let object = ResponseParser::parse_object(response.text())?;
        Ok(RawAnalysisPayload::from(object))
    }
}
