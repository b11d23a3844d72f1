use super::domain::SubjectId;
use super::evaluation::ScoringSnapshot;

/// Storage abstraction for completed snapshots so the service module can be
/// exercised in isolation. Implementations own write-conflict resolution;
/// ordering between snapshots comes from their caller-supplied timestamps.
pub trait SnapshotRepository: Send + Sync {
    /// Store a new snapshot. Two snapshots with the same subject and
    /// timestamp are a conflict.
    fn insert(&self, snapshot: ScoringSnapshot) -> Result<ScoringSnapshot, RepositoryError>;

    /// Every snapshot for a subject, oldest first.
    fn history(&self, subject: &SubjectId) -> Result<Vec<ScoringSnapshot>, RepositoryError>;

    /// The newest snapshot and, when one exists, the snapshot immediately
    /// preceding it.
    fn latest_pair(
        &self,
        subject: &SubjectId,
    ) -> Result<Option<(ScoringSnapshot, Option<ScoringSnapshot>)>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("snapshot already recorded for this subject and timestamp")]
    Conflict,
    #[error("no snapshots recorded for subject")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
