//! Liveness endpoint

use axum::response::Json;

use crate::presentation::models::HealthResponse;

/// GET /api/health - Liveness probe
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Server is running".to_string(),
    })
}
