//! Route definitions and server setup

use axum::extract::DefaultBodyLimit;
use axum::http::{Method, StatusCode, header};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use krimson_core::Config;
use krimson_core::domain::activity::{ActivityLogEntry, LogLevel};
use krimson_core::domain::analysis::{
    AnalysisRecord, AnalysisSnapshot, Comparison, ComparisonDelta, DocumentationState,
    HeatmapEntry, Insights, ProgressByDiscipline, Task, TaskPriority, TaskStatus,
};

use crate::presentation::{
    controllers::{
        OrchestratorState,
        activity::{create_log, list_logs},
        analysis::{compare_analyses, get_history, upload_project},
        health::health_check,
    },
    middleware::logging_middleware,
    models::*,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::analysis::upload_project,
        crate::presentation::controllers::analysis::get_history,
        crate::presentation::controllers::analysis::compare_analyses,
        crate::presentation::controllers::activity::list_logs,
        crate::presentation::controllers::activity::create_log,
        crate::presentation::controllers::health::health_check
    ),
    components(
        schemas(
            AnalysisRecord,
            Task,
            TaskStatus,
            TaskPriority,
            Insights,
            DocumentationState,
            HeatmapEntry,
            ProgressByDiscipline,
            Comparison,
            AnalysisSnapshot,
            ComparisonDelta,
            ActivityLogEntry,
            LogLevel,
            UploadForm,
            HistoryResponse,
            CompareRequest,
            ActivityLogRequest,
            ActivityLogResponse,
            ActivityLogListResponse,
            HealthResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "analysis", description = "Project upload, history and comparison"),
        (name = "activity", description = "Operator activity log"),
        (name = "health", description = "Service liveness")
    ),
    info(
        title = "Krimson Project Tracker API",
        version = "0.1.0",
        description = "Upload a project, get an AI assessment of its state and track it over time"
    )
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .max_age(Duration::from_secs(3600));

    let origins = &config.server.allowed_origins;
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(tower_http::cors::AllowOrigin::any());
    }

    let origins: Vec<axum::http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            axum::http::HeaderValue::from_str(origin)
                .map_err(|_| {
                    tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                })
                .ok()
        })
        .collect();

    tracing::debug!(count = origins.len(), "CORS: Configured with specific origins");
    layer.allow_origin(origins)
}

/// Build the application router
pub fn create_router(state: OrchestratorState, config: &Config) -> Router {
    // Uploads wait on the model, so they get their own, longer budget
    let upload_routes = Router::new()
        .route("/analysis/upload", post(upload_project))
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.analysis_timeout_seconds),
        ));

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/analysis/history/{project_id}", get(get_history))
        .route("/analysis/compare", post(compare_analyses))
        .route("/activity/logs", get(list_logs).post(create_log))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_seconds),
        ))
        .merge(upload_routes);

    let mut router = Router::new().nest("/api", api_routes);

    if config.server.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .layer(middleware::from_fn(logging_middleware));

    router.layer(service_builder).with_state(state)
}
