//! Application setup and wiring

use std::sync::Arc;

use axum::Router;
use krimson_core::Config;
use krimson_core::infrastructure::{ActivityLog, AnalysisHistoryRepository, InMemoryAnalysisHistory};
use krimson_llm::{AnalyzeProjectUseCase, GoogleAIProvider, LlmError, LlmProvider};
use krimson_orchestrator::application::RunAnalysisUseCase;
use krimson_orchestrator::infrastructure::ProjectContextBuilder;
use krimson_orchestrator::presentation::controllers::OrchestratorState;
use krimson_orchestrator::presentation::routes::create_router;

/// Errors raised while assembling the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to initialize LLM provider: {0}")]
    LlmProvider(#[from] LlmError),
}

/// Build the Gemini-backed analyzer, or `None` when no API key is configured
fn build_analyzer(config: &Config) -> Result<Option<Arc<AnalyzeProjectUseCase>>, LlmError> {
    let Some(api_key) = config.llm.api_key() else {
        tracing::warn!("No Gemini API key configured; analyses will use synthetic output");
        return Ok(None);
    };

    let provider = GoogleAIProvider::new(api_key, config.llm.default_model.clone())?
        .with_base_url(config.llm.google_ai.base_url.clone())
        .with_timeout(config.llm.timeout_seconds)?;

    tracing::info!(
        provider = provider.info().id,
        model = %config.llm.default_model,
        timeout_seconds = config.llm.timeout_seconds,
        "LLM provider initialized"
    );

    let provider: Arc<dyn LlmProvider> = Arc::new(provider);
    Ok(Some(Arc::new(AnalyzeProjectUseCase::new(
        provider,
        config.llm.clone(),
    ))))
}

/// Create the application router with all stores and use cases wired in
pub fn create_app(config: &Config) -> Result<Router, AppError> {
    let history: Arc<dyn AnalysisHistoryRepository> = Arc::new(InMemoryAnalysisHistory::new(
        config.history.max_records_per_project,
    ));
    let activity_log = Arc::new(ActivityLog::new(config.activity.max_entries));

    let run_analysis_use_case = Arc::new(RunAnalysisUseCase::new(
        build_analyzer(config)?,
        ProjectContextBuilder::new(config.analysis.clone()),
        history.clone(),
    ));

    tracing::debug!(
        max_records_per_project = config.history.max_records_per_project,
        max_activity_entries = config.activity.max_entries,
        "In-memory stores initialized"
    );

    let state = OrchestratorState::new(run_analysis_use_case, history, activity_log);
    Ok(create_router(state, config))
}
