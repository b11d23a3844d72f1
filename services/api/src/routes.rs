use crate::infra::{AppState, InMemorySnapshotRepository};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use bizdive::diagnosis::{diagnosis_router, CohortSummary, DiagnosisService, Stage};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_diagnosis_routes(
    service: Arc<DiagnosisService<InMemorySnapshotRepository>>,
    repository: Arc<InMemorySnapshotRepository>,
) -> axum::Router {
    diagnosis_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/cohort/summary",
            axum::routing::get(cohort_summary_endpoint),
        )
        .layer(Extension(repository))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CohortParams {
    /// Restrict the summary to snapshots recorded at one growth stage.
    pub(crate) stage: Option<String>,
}

/// Program-level statistics over recorded snapshots, optionally per stage.
pub(crate) async fn cohort_summary_endpoint(
    Extension(repository): Extension<Arc<InMemorySnapshotRepository>>,
    Query(params): Query<CohortParams>,
) -> axum::response::Response {
    let mut snapshots = repository.all();

    if let Some(code) = params.stage.as_deref() {
        let stage = match Stage::from_code(code) {
            Ok(stage) => stage,
            Err(error) => {
                let payload = json!({ "error": error.to_string() });
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
            }
        };
        snapshots.retain(|snapshot| snapshot.stage == stage);
    }

    (
        StatusCode::OK,
        Json(CohortSummary::from_snapshots(&snapshots)),
    )
        .into_response()
}
