//! Orchestrator API controllers

use std::sync::Arc;

use krimson_core::infrastructure::{ActivityLog, AnalysisHistoryRepository};

use crate::application::RunAnalysisUseCase;

pub mod activity;
pub mod analysis;
pub mod health;

/// Application state shared by the handlers
#[derive(Clone)]
pub struct OrchestratorState {
    pub run_analysis_use_case: Arc<RunAnalysisUseCase>,
    pub history: Arc<dyn AnalysisHistoryRepository>,
    pub activity_log: Arc<ActivityLog>,
}

impl OrchestratorState {
    pub fn new(
        run_analysis_use_case: Arc<RunAnalysisUseCase>,
        history: Arc<dyn AnalysisHistoryRepository>,
        activity_log: Arc<ActivityLog>,
    ) -> Self {
        Self {
            run_analysis_use_case,
            history,
            activity_log,
        }
    }
}
