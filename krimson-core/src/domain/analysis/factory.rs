//! Construction of [`AnalysisRecord`] values

use chrono::{DateTime, Utc};

use super::entities::{AnalysisRecord, Insights};
use super::normalization::{
    clamp_percentage, iso_timestamp, normalize_heatmap, normalize_progress,
    normalize_string_list, normalize_tasks, to_count,
};
use super::payload::RawAnalysisPayload;
use super::value_objects::DocumentationState;
use crate::domain::LenientEnum;

/// Builds bounded analysis records from loose payloads.
///
/// Construction never fails: each field falls back to its documented default.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisRecordFactory;

impl AnalysisRecordFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create a record stamped with the current time
    pub fn create(&self, payload: RawAnalysisPayload) -> AnalysisRecord {
        self.create_at(payload, Utc::now())
    }

    /// Create a record as if it were produced at `now`
    pub fn create_at(&self, payload: RawAnalysisPayload, now: DateTime<Utc>) -> AnalysisRecord {
        let millis = now.timestamp_millis();

        let project_id = payload
            .project_id
            .clone()
            .or_else(|| payload.project_name.clone())
            .unwrap_or_else(|| format!("proj-{millis}"));
        let analysis_id = payload
            .analysis_id
            .unwrap_or_else(|| format!("{project_id}-{millis}"));
        let project_name = payload
            .project_name
            .unwrap_or_else(|| project_id.clone());

        let defaults = Insights::default();
        let insights = Insights {
            total_files: to_count(payload.insights.total_files.as_ref()).unwrap_or(0),
            todo_count: to_count(payload.insights.todo_count.as_ref()).unwrap_or(0),
            documentation: DocumentationState::restrict(payload.insights.documentation.as_deref()),
            detected_language: payload
                .insights
                .detected_language
                .unwrap_or(defaults.detected_language),
        };

        AnalysisRecord {
            project_id,
            analysis_id,
            uploaded_at: payload.uploaded_at.unwrap_or_else(|| iso_timestamp(now)),
            project_name,
            completion: payload.completion.as_ref().map(clamp_percentage).unwrap_or(0),
            summary: payload.summary.unwrap_or_default(),
            missing_components: normalize_string_list(payload.missing_components.as_deref()),
            recommended_tasks: normalize_tasks(payload.recommended_tasks.as_deref(), now),
            risks: normalize_string_list(payload.risks.as_deref()),
            timeline_estimate: payload.timeline_estimate.unwrap_or_default(),
            tech_stack: normalize_string_list(payload.tech_stack.as_deref()),
            progress_by_discipline: normalize_progress(payload.progress_by_discipline.as_ref()),
            insights,
            activity_heatmap: normalize_heatmap(payload.activity_heatmap.as_deref(), now),
            security_concerns: normalize_string_list(payload.security_concerns.as_deref()),
            performance_issues: normalize_string_list(payload.performance_issues.as_deref()),
        }
    }
}
