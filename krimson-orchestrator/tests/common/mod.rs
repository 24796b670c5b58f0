//! Shared fixtures for orchestrator integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::io::{Cursor, Write};
use std::sync::Arc;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use krimson_core::Config;
use krimson_core::infrastructure::{ActivityLog, AnalysisHistoryRepository, InMemoryAnalysisHistory};
use krimson_llm::domain::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderCapabilities,
    ProviderInfo, StopReason, Usage,
};
use krimson_llm::AnalyzeProjectUseCase;
use krimson_orchestrator::application::RunAnalysisUseCase;
use krimson_orchestrator::infrastructure::ProjectContextBuilder;
use krimson_orchestrator::presentation::{OrchestratorState, create_router};

/// Provider answering every request with the same text or error
pub struct ScriptedProvider {
    reply: Result<String, LlmError>,
}

impl ScriptedProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
        }
    }

    pub fn failing(error: LlmError) -> Self {
        Self { reply: Err(error) }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: "scripted",
            name: "Scripted Provider",
            version: "test",
            capabilities: ProviderCapabilities::text_only(8192, 2048),
        }
    }

    fn default_model(&self) -> &str {
        "test-model"
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let content = self.reply.clone()?;
        Ok(CompletionResponse {
            id: "resp-1".to_string(),
            model: "test-model".to_string(),
            content,
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
            created: None,
        })
    }
}

/// Server plus handles on its stores
pub struct TestApp {
    pub server: TestServer,
    pub history: Arc<InMemoryAnalysisHistory>,
    pub activity_log: Arc<ActivityLog>,
}

pub fn test_app(provider: Option<Arc<dyn LlmProvider>>) -> TestApp {
    let config = Config::default();
    let history = Arc::new(InMemoryAnalysisHistory::new(
        config.history.max_records_per_project,
    ));
    let activity_log = Arc::new(ActivityLog::new(config.activity.max_entries));

    let analyzer = provider
        .map(|provider| Arc::new(AnalyzeProjectUseCase::new(provider, config.llm.clone())));
    let history_store: Arc<dyn AnalysisHistoryRepository> = history.clone();
    let run_analysis = Arc::new(RunAnalysisUseCase::new(
        analyzer,
        ProjectContextBuilder::new(config.analysis.clone()),
        history_store.clone(),
    ));

    let state = OrchestratorState::new(run_analysis, history_store, activity_log.clone());
    let server = TestServer::new(create_router(state, &config)).expect("test server starts");

    TestApp {
        server,
        history,
        activity_log,
    }
}

/// Zip archive with the given `(name, content)` entries
pub fn zip_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("zip entry starts");
        writer.write_all(content.as_bytes()).expect("zip entry written");
    }
    writer.finish().expect("zip finishes").into_inner()
}

pub fn sample_project() -> Vec<u8> {
    zip_archive(&[
        ("package.json", r#"{"name":"storefront"}"#),
        ("src/index.tsx", "export const App = () => null;"),
        ("README.md", "# Storefront"),
    ])
}
