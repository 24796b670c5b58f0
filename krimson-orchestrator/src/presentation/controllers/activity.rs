//! Activity log endpoints

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;

use crate::presentation::controllers::OrchestratorState;
use crate::presentation::errors::ApiError;
use crate::presentation::models::{
    ActivityLogListResponse, ActivityLogRequest, ActivityLogResponse, ErrorResponse,
};

/// GET /api/activity/logs - Activity log, newest first
#[utoipa::path(
    get,
    path = "/api/activity/logs",
    responses(
        (status = 200, description = "Recorded activity", body = ActivityLogListResponse)
    ),
    tag = "activity"
)]
pub async fn list_logs(State(state): State<OrchestratorState>) -> Json<ActivityLogListResponse> {
    Json(ActivityLogListResponse {
        logs: state.activity_log.list().await,
    })
}

/// POST /api/activity/logs - Record an operator note
#[utoipa::path(
    post,
    path = "/api/activity/logs",
    request_body = ActivityLogRequest,
    responses(
        (status = 201, description = "Entry recorded", body = ActivityLogResponse),
        (status = 400, description = "Missing message", body = ErrorResponse)
    ),
    tag = "activity"
)]
pub async fn create_log(
    State(state): State<OrchestratorState>,
    request: Result<Json<ActivityLogRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ActivityLogResponse>), ApiError> {
    let Json(request) = request?;
    let message = request
        .message
        .filter(|message| !message.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Message is required".to_string()))?;

    let log = state
        .activity_log
        .record(message, request.level.as_deref())
        .await;

    Ok((StatusCode::CREATED, Json(ActivityLogResponse { log })))
}
