//! Orchestrator use cases

use std::sync::Arc;

use chrono::Utc;
use krimson_core::domain::analysis::normalization::to_count;
use krimson_core::domain::analysis::{AnalysisRecord, AnalysisRecordFactory, RawAnalysisPayload};
use krimson_core::infrastructure::AnalysisHistoryRepository;
use krimson_llm::AnalyzeProjectUseCase;
use serde_json::Value;
use tokio::task::JoinError;
use tracing::{info, warn};

use crate::application::fallback::{SyntheticAnalysisGenerator, synthesize_activity, upload_rng};
use crate::infrastructure::{ProjectContext, ProjectContextBuilder, UploadedFile, detect_stack_from_name};

/// Errors from running an analysis
#[derive(Debug, thiserror::Error)]
pub enum AnalysisRunError {
    #[error("Upload inspection failed: {0}")]
    Inspection(#[from] JoinError),
}

/// Use case for analyzing an uploaded project and recording the result
pub struct RunAnalysisUseCase {
    analyzer: Option<Arc<AnalyzeProjectUseCase>>,
    context_builder: ProjectContextBuilder,
    history: Arc<dyn AnalysisHistoryRepository>,
    factory: AnalysisRecordFactory,
    fallback: SyntheticAnalysisGenerator,
}

impl RunAnalysisUseCase {
    pub fn new(
        analyzer: Option<Arc<AnalyzeProjectUseCase>>,
        context_builder: ProjectContextBuilder,
        history: Arc<dyn AnalysisHistoryRepository>,
    ) -> Self {
        let factory = AnalysisRecordFactory::new();
        Self {
            analyzer,
            context_builder,
            history,
            factory,
            fallback: SyntheticAnalysisGenerator::new(factory),
        }
    }

    /// Inspect `upload`, analyze it and append the record to the project's history.
    ///
    /// Model failures never surface here: they are logged and the synthetic
    /// record is used instead.
    pub async fn execute(
        &self,
        upload: &UploadedFile,
        project_id: &str,
    ) -> Result<AnalysisRecord, AnalysisRunError> {
        let project_name = upload.stem();
        let context = self.context_builder.build(upload).await?;

        let record = match &self.analyzer {
            Some(analyzer) => match analyzer.execute(&project_name, &context.context).await {
                Ok(payload) => {
                    let payload = self.enrich(payload, upload, project_id, &project_name, &context);
                    self.factory.create(payload)
                }
                Err(e) => {
                    warn!(
                        project_id = %project_id,
                        error_kind = e.kind(),
                        error = %e,
                        "LLM analysis failed, using synthetic output instead"
                    );
                    self.fallback.generate(upload, project_id)
                }
            },
            None => {
                warn!(project_id = %project_id, "No LLM provider configured, using synthetic output");
                self.fallback.generate(upload, project_id)
            }
        };

        self.history.append(&record.project_id, record.clone()).await;
        info!(
            project_id = %record.project_id,
            analysis_id = %record.analysis_id,
            completion = record.completion,
            "Analysis recorded"
        );

        Ok(record)
    }

    /// Fill gaps in a model payload from what we know about the upload
    fn enrich(
        &self,
        mut payload: RawAnalysisPayload,
        upload: &UploadedFile,
        project_id: &str,
        project_name: &str,
        context: &ProjectContext,
    ) -> RawAnalysisPayload {
        payload.project_id = Some(project_id.to_string());
        payload.project_name = Some(project_name.to_string());
        payload.analysis_id = None;
        payload.uploaded_at = None;

        if payload.activity_heatmap.as_ref().is_none_or(Vec::is_empty) {
            let mut rng = upload_rng(upload);
            payload.activity_heatmap = Some(synthesize_activity(&mut rng, Utc::now()));
        }

        let detected = detect_stack_from_name(&upload.file_name);
        if payload.tech_stack.as_ref().is_none_or(Vec::is_empty) {
            payload.tech_stack = Some(detected.iter().cloned().map(Value::String).collect());
        }

        if to_count(payload.insights.total_files.as_ref()).is_none() {
            payload.insights.total_files = Some(Value::from(context.stats.files.unwrap_or(0)));
        }

        if payload.insights.detected_language.is_none() {
            payload.insights.detected_language = detected.into_iter().next();
        }

        payload
    }
}
