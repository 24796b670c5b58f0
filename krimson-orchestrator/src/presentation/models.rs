//! API request and response models

use krimson_core::domain::activity::ActivityLogEntry;
use krimson_core::domain::analysis::AnalysisRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[schema(example = "No project file provided")]
    pub error: String,
}

/// Multipart form accepted by the upload endpoint
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadForm {
    /// Project archive or single file
    #[schema(value_type = String, format = Binary)]
    pub project: Vec<u8>,
    /// Project identifier; defaults to the uploaded file name without extension
    #[schema(example = "storefront")]
    pub project_id: Option<String>,
}

/// Most-recent-first analyses of one project
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub history: Vec<AnalysisRecord>,
}

/// Request to compare two stored analyses of the same project
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    #[schema(example = "storefront")]
    pub project_id: Option<String>,
    /// Baseline analysis id
    #[schema(example = "storefront-1718000000000")]
    pub analysis_a: Option<String>,
    /// Target analysis id
    #[schema(example = "storefront-1718600000000")]
    pub analysis_b: Option<String>,
}

/// Operator note to append to the activity log
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ActivityLogRequest {
    #[schema(example = "Deployed build 42")]
    pub message: Option<String>,
    /// One of info, warn or error; anything else is recorded as info
    #[schema(example = "info")]
    pub level: Option<String>,
}

/// A newly recorded activity log entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActivityLogResponse {
    pub log: ActivityLogEntry,
}

/// Activity log, newest first
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActivityLogListResponse {
    pub logs: Vec<ActivityLogEntry>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "Server is running")]
    pub status: String,
}
