use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::catalog::{QuestionCatalog, SelectedQuestion};
use super::domain::{ResponseSet, SegmentError, SegmentProfile, SubjectId};
use super::evaluation::{ScoringEngine, ScoringSnapshot};
use super::report::DiagnosisReport;
use super::repository::{RepositoryError, SnapshotRepository};

/// Service composing the question catalog, scoring engine, and snapshot store.
pub struct DiagnosisService<R> {
    catalog: Arc<QuestionCatalog>,
    repository: Arc<R>,
}

impl<R> DiagnosisService<R>
where
    R: SnapshotRepository + 'static,
{
    pub fn new(catalog: QuestionCatalog, repository: Arc<R>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            repository,
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// The ordered, keyed question set a respondent in this segment answers.
    pub fn questionnaire(
        &self,
        profile: &SegmentProfile,
    ) -> Result<Vec<SelectedQuestion>, DiagnosisServiceError> {
        Ok(self.catalog.select(profile)?)
    }

    /// Run a full scoring pass over a submission and persist the snapshot.
    ///
    /// A failed selection or segment validation yields no snapshot at all;
    /// there is no partial-result recovery.
    pub fn submit(
        &self,
        profile: &SegmentProfile,
        responses: &ResponseSet,
        subject_id: SubjectId,
        created_at: DateTime<Utc>,
    ) -> Result<ScoringSnapshot, DiagnosisServiceError> {
        let (stage, _industry) = profile.resolve()?;
        let questions = self.catalog.select(profile)?;

        let snapshot =
            ScoringEngine::score(&questions, responses, stage, subject_id, created_at);
        let stored = self.repository.insert(snapshot)?;

        info!(
            subject = %stored.subject_id.0,
            total = stored.total_score,
            grade = stored.grade.label(),
            "diagnosis recorded"
        );

        Ok(stored)
    }

    /// Report for the latest run, with growth against the preceding run when
    /// the subject has more than one snapshot.
    pub fn report(&self, subject: &SubjectId) -> Result<DiagnosisReport, DiagnosisServiceError> {
        let (current, previous) = self
            .repository
            .latest_pair(subject)?
            .ok_or(RepositoryError::NotFound)?;

        Ok(DiagnosisReport::from_snapshots(&current, previous.as_ref()))
    }

    /// Every snapshot recorded for a subject, oldest first.
    pub fn history(
        &self,
        subject: &SubjectId,
    ) -> Result<Vec<ScoringSnapshot>, DiagnosisServiceError> {
        Ok(self.repository.history(subject)?)
    }
}

/// Error raised by the diagnosis service.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosisServiceError {
    #[error(transparent)]
    Segment(#[from] SegmentError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
