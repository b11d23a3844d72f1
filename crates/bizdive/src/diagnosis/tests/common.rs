use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::diagnosis::catalog::{QuestionCatalog, SelectedQuestion};
use crate::diagnosis::domain::{
    Dimension, QuestionCategory, QuestionId, QuestionItem, ResponseSet, SegmentProfile, SubjectId,
};
use crate::diagnosis::evaluation::ScoringSnapshot;
use crate::diagnosis::repository::{RepositoryError, SnapshotRepository};
use crate::diagnosis::service::DiagnosisService;

pub(super) fn question(
    id: &str,
    dimension: Dimension,
    category: QuestionCategory,
    mapping_code: Option<&str>,
    weight: f64,
    display_order: i32,
) -> QuestionItem {
    QuestionItem {
        id: QuestionId(id.to_string()),
        dimension,
        category,
        mapping_code: mapping_code.map(str::to_string),
        weight,
        display_order,
        prompt: format!("prompt for {id}"),
    }
}

/// Catalog spanning all four categories with content for more than one
/// stage and industry, so selection tests can prove the filters apart.
pub(super) fn sample_catalog() -> QuestionCatalog {
    QuestionCatalog::new(vec![
        question(
            "q-market-1",
            Dimension::MarketAnalysis,
            QuestionCategory::Common,
            None,
            1.0,
            1,
        ),
        question(
            "q-market-2",
            Dimension::MarketAnalysis,
            QuestionCategory::Common,
            None,
            1.5,
            2,
        ),
        question(
            "q-problem-1",
            Dimension::ProblemUnderstanding,
            QuestionCategory::Common,
            None,
            1.0,
            1,
        ),
        question(
            "q-solution-p",
            Dimension::SolutionValue,
            QuestionCategory::Stage,
            Some("P"),
            1.2,
            1,
        ),
        question(
            "q-solution-e",
            Dimension::SolutionValue,
            QuestionCategory::Stage,
            Some("E"),
            1.2,
            1,
        ),
        question(
            "q-execution-p",
            Dimension::ExecutionCapability,
            QuestionCategory::Stage,
            Some("P"),
            1.0,
            1,
        ),
        question(
            "q-tech-p-i",
            Dimension::TechnicalCapability,
            QuestionCategory::Industry,
            Some("P_I"),
            2.0,
            1,
        ),
        question(
            "q-tech-e-h",
            Dimension::TechnicalCapability,
            QuestionCategory::Industry,
            Some("E_H"),
            2.0,
            1,
        ),
        question(
            "q-revenue-p-i",
            Dimension::RevenueModel,
            QuestionCategory::Industry,
            Some("P_I"),
            1.5,
            1,
        ),
        question(
            "q-growth-esg-p",
            Dimension::GrowthStrategy,
            QuestionCategory::Esg,
            Some("P"),
            1.0,
            1,
        ),
        question(
            "q-growth-esg-e",
            Dimension::GrowthStrategy,
            QuestionCategory::Esg,
            Some("E"),
            1.0,
            1,
        ),
    ])
}

pub(super) fn profile(stage: &str, industry: &str) -> SegmentProfile {
    SegmentProfile::new(stage, industry)
}

pub(super) fn subject(id: &str) -> SubjectId {
    SubjectId(id.to_string())
}

pub(super) fn recorded_at(days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap() + chrono::Duration::days(days)
}

pub(super) fn respond_all(questions: &[SelectedQuestion], affirmative: bool) -> ResponseSet {
    questions
        .iter()
        .map(|q| (q.key.clone(), affirmative))
        .collect()
}

pub(super) fn build_service() -> (
    DiagnosisService<MemorySnapshotRepository>,
    Arc<MemorySnapshotRepository>,
) {
    let repository = Arc::new(MemorySnapshotRepository::default());
    let service = DiagnosisService::new(sample_catalog(), repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemorySnapshotRepository {
    pub(super) records: Arc<Mutex<Vec<ScoringSnapshot>>>,
}

impl SnapshotRepository for MemorySnapshotRepository {
    fn insert(&self, snapshot: ScoringSnapshot) -> Result<ScoringSnapshot, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard
            .iter()
            .any(|s| s.subject_id == snapshot.subject_id && s.created_at == snapshot.created_at)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(snapshot.clone());
        Ok(snapshot)
    }

    fn history(
        &self,
        subject: &crate::diagnosis::domain::SubjectId,
    ) -> Result<Vec<ScoringSnapshot>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut snapshots: Vec<ScoringSnapshot> = guard
            .iter()
            .filter(|s| &s.subject_id == subject)
            .cloned()
            .collect();
        snapshots.sort_by_key(|s| s.created_at);
        Ok(snapshots)
    }

    fn latest_pair(
        &self,
        subject: &crate::diagnosis::domain::SubjectId,
    ) -> Result<Option<(ScoringSnapshot, Option<ScoringSnapshot>)>, RepositoryError> {
        let mut snapshots = self.history(subject)?;
        let current = match snapshots.pop() {
            Some(snapshot) => snapshot,
            None => return Ok(None),
        };
        Ok(Some((current, snapshots.pop())))
    }
}
