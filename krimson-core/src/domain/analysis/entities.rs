//! Analysis domain entities

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::value_objects::{DocumentationState, ProgressByDiscipline, TaskPriority, TaskStatus};

/// The normalized, bounded output of one analysis run.
///
/// Instances are only produced by [`super::AnalysisRecordFactory`] and are
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    #[schema(example = "storefront")]
    pub project_id: String,
    #[schema(example = "storefront-1718000000000")]
    pub analysis_id: String,
    #[schema(example = "2024-06-10T06:13:20.000Z")]
    pub uploaded_at: String,
    pub project_name: String,
    /// Overall completion percentage in [0, 100]
    #[schema(maximum = 100)]
    pub completion: u8,
    pub summary: String,
    pub missing_components: Vec<String>,
    pub recommended_tasks: Vec<Task>,
    pub risks: Vec<String>,
    pub timeline_estimate: String,
    pub tech_stack: Vec<String>,
    pub progress_by_discipline: ProgressByDiscipline,
    pub insights: Insights,
    pub activity_heatmap: Vec<HeatmapEntry>,
    pub security_concerns: Vec<String>,
    pub performance_issues: Vec<String>,
}

/// A recommended task shown on the kanban board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Repository-level counters and classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub total_files: u64,
    pub todo_count: u64,
    pub documentation: DocumentationState,
    pub detected_language: String,
}

impl Default for Insights {
    fn default() -> Self {
        Self {
            total_files: 0,
            todo_count: 0,
            documentation: DocumentationState::Unknown,
            detected_language: "Unknown".to_string(),
        }
    }
}

/// One day of the activity heatmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HeatmapEntry {
    pub date: String,
    pub focus: String,
    /// Intensity in [0, 100]
    pub value: u8,
    pub risk: bool,
}
