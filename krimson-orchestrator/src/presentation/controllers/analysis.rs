//! Analysis upload, history and comparison endpoints

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::response::Json;
use krimson_core::domain::analysis::{AnalysisRecord, Comparison, compare};

use crate::infrastructure::UploadedFile;
use crate::presentation::controllers::OrchestratorState;
use crate::presentation::errors::ApiError;
use crate::presentation::models::{CompareRequest, ErrorResponse, HistoryResponse, UploadForm};

const PROJECT_FIELD: &str = "project";
const PROJECT_ID_FIELD: &str = "projectId";
const NO_FILE_MESSAGE: &str = "No project file provided";

/// POST /api/analysis/upload - Analyze an uploaded project
#[utoipa::path(
    post,
    path = "/api/analysis/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Analysis completed and recorded", body = AnalysisRecord),
        (status = 400, description = "No file or malformed form", body = ErrorResponse),
        (status = 408, description = "Analysis took too long"),
        (status = 413, description = "Upload exceeds the size limit", body = ErrorResponse),
        (status = 500, description = "Analysis failed", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn upload_project(
    State(state): State<OrchestratorState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisRecord>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Upload is not a multipart form");
        ApiError::BadRequest(NO_FILE_MESSAGE.to_string())
    })?;
    let mut upload = None;
    let mut project_id = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(PROJECT_FIELD) if upload.is_none() => {
                let Some(file_name) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                upload = Some(UploadedFile::new(file_name, content_type, bytes));
            }
            Some(PROJECT_ID_FIELD) => {
                let value = field.text().await?;
                if !value.is_empty() {
                    project_id = Some(value);
                }
            }
            _ => {}
        }
    }

    let upload =
        upload.ok_or_else(|| ApiError::BadRequest(NO_FILE_MESSAGE.to_string()))?;
    let project_id = project_id.unwrap_or_else(|| upload.stem());

    tracing::info!(
        project_id = %project_id,
        file_name = %upload.file_name,
        size = upload.size(),
        "Received project upload"
    );

    let record = state
        .run_analysis_use_case
        .execute(&upload, &project_id)
        .await?;

    Ok(Json(record))
}

/// GET /api/analysis/history/{projectId} - Stored analyses, newest first
#[utoipa::path(
    get,
    path = "/api/analysis/history/{projectId}",
    params(("projectId" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project history (empty for unknown projects)", body = HistoryResponse)
    ),
    tag = "analysis"
)]
pub async fn get_history(
    State(state): State<OrchestratorState>,
    Path(project_id): Path<String>,
) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        history: state.history.history(&project_id).await,
    })
}

/// POST /api/analysis/compare - Compare two analyses of one project
#[utoipa::path(
    post,
    path = "/api/analysis/compare",
    request_body = CompareRequest,
    responses(
        (status = 200, description = "Comparison of baseline (analysisA) and target (analysisB)", body = Comparison),
        (status = 400, description = "Missing identifiers", body = ErrorResponse),
        (status = 404, description = "Either analysis is unknown", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn compare_analyses(
    State(state): State<OrchestratorState>,
    request: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<Comparison>, ApiError> {
    let Json(request) = request?;
    let required = |value: Option<String>| value.filter(|v| !v.is_empty());

    let (Some(project_id), Some(analysis_a), Some(analysis_b)) = (
        required(request.project_id),
        required(request.analysis_a),
        required(request.analysis_b),
    ) else {
        return Err(ApiError::BadRequest(
            "projectId, analysisA, and analysisB are required".to_string(),
        ));
    };

    let baseline = state.history.find_by_id(&project_id, &analysis_a).await;
    let target = state.history.find_by_id(&project_id, &analysis_b).await;

    compare(baseline.as_ref(), target.as_ref())
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Analyses not found for comparison".to_string()))
}
