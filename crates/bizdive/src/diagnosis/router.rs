use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ResponseSet, SegmentProfile, SubjectId};
use super::evaluation::ScoringSnapshot;
use super::repository::{RepositoryError, SnapshotRepository};
use super::service::{DiagnosisService, DiagnosisServiceError};

/// Router builder exposing HTTP endpoints for questionnaires, submissions,
/// and reports.
pub fn diagnosis_router<R>(service: Arc<DiagnosisService<R>>) -> Router
where
    R: SnapshotRepository + 'static,
{
    Router::new()
        .route("/api/v1/questionnaire", get(questionnaire_handler::<R>))
        .route("/api/v1/diagnosis", post(submit_handler::<R>))
        .route(
            "/api/v1/diagnosis/:subject_id/report",
            get(report_handler::<R>),
        )
        .route(
            "/api/v1/diagnosis/:subject_id/history",
            get(history_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct QuestionnaireParams {
    pub stage: String,
    pub industry: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub key: String,
    pub dimension: &'static str,
    pub dimension_label: &'static str,
    pub prompt: String,
    pub weight: f64,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionRequest {
    pub subject_id: String,
    pub stage: String,
    pub industry: String,
    pub responses: ResponseSet,
    /// Optional override for reproducible runs; defaults to the server clock.
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Sanitized representation of a stored snapshot for API responses.
#[derive(Debug, Serialize)]
pub struct SnapshotView {
    pub subject_id: String,
    pub recorded_at: DateTime<Utc>,
    pub total_score: f64,
    pub grade: &'static str,
    pub dimension_scores: Vec<DimensionScoreView>,
}

#[derive(Debug, Serialize)]
pub struct DimensionScoreView {
    pub dimension: &'static str,
    pub dimension_label: &'static str,
    pub normalized: f64,
    pub max_weight: f64,
}

impl SnapshotView {
    pub fn from_snapshot(snapshot: &ScoringSnapshot) -> SnapshotView {
        SnapshotView {
            subject_id: snapshot.subject_id.0.clone(),
            recorded_at: snapshot.created_at,
            total_score: snapshot.total_score,
            grade: snapshot.grade.label(),
            dimension_scores: super::domain::Dimension::ordered()
                .into_iter()
                .map(|dimension| DimensionScoreView {
                    dimension: dimension.code(),
                    dimension_label: dimension.label(),
                    normalized: snapshot.dimension_score(dimension),
                    max_weight: snapshot.max_weight(dimension),
                })
                .collect(),
        }
    }
}

pub(crate) async fn questionnaire_handler<R>(
    State(service): State<Arc<DiagnosisService<R>>>,
    Query(params): Query<QuestionnaireParams>,
) -> Response
where
    R: SnapshotRepository + 'static,
{
    let profile = SegmentProfile::new(params.stage, params.industry);
    match service.questionnaire(&profile) {
        Ok(questions) => {
            let views: Vec<QuestionView> = questions
                .into_iter()
                .map(|q| QuestionView {
                    key: q.key.0,
                    dimension: q.item.dimension.code(),
                    dimension_label: q.item.dimension.label(),
                    prompt: q.item.prompt,
                    weight: q.item.weight,
                })
                .collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => segment_aware_error(error),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<DiagnosisService<R>>>,
    axum::Json(request): axum::Json<SubmissionRequest>,
) -> Response
where
    R: SnapshotRepository + 'static,
{
    let SubmissionRequest {
        subject_id,
        stage,
        industry,
        responses,
        recorded_at,
    } = request;

    let profile = SegmentProfile::new(stage, industry);
    let recorded_at = recorded_at.unwrap_or_else(Utc::now);

    match service.submit(&profile, &responses, SubjectId(subject_id), recorded_at) {
        Ok(snapshot) => {
            let view = SnapshotView::from_snapshot(&snapshot);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(DiagnosisServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "a snapshot already exists for this subject and timestamp",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(error) => segment_aware_error(error),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<DiagnosisService<R>>>,
    Path(subject_id): Path<String>,
) -> Response
where
    R: SnapshotRepository + 'static,
{
    let subject = SubjectId(subject_id);
    match service.report(&subject) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(DiagnosisServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "subject_id": subject.0,
                "error": "no diagnosis recorded for subject",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => segment_aware_error(error),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<DiagnosisService<R>>>,
    Path(subject_id): Path<String>,
) -> Response
where
    R: SnapshotRepository + 'static,
{
    let subject = SubjectId(subject_id);
    match service.history(&subject) {
        Ok(snapshots) => {
            let views: Vec<SnapshotView> =
                snapshots.iter().map(SnapshotView::from_snapshot).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => segment_aware_error(error),
    }
}

fn segment_aware_error(error: DiagnosisServiceError) -> Response {
    let status = match &error {
        DiagnosisServiceError::Segment(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DiagnosisServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        DiagnosisServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        DiagnosisServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
