//! Maturity diagnosis: question selection, scoring, grading, and
//! period-over-period growth analysis.
//!
//! The scoring path is a pure pipeline: select the segment's question set,
//! fold boolean answers into per-dimension tallies, combine with
//! stage-specific weights, and band the total into a grade. The surrounding
//! service handles persistence through a repository trait.

pub mod catalog;
pub mod domain;
pub mod evaluation;
pub mod growth;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::import::{CatalogImportError, CatalogImporter};
pub use catalog::{QuestionCatalog, SelectedQuestion};
pub use domain::{
    Dimension, Industry, QuestionCategory, QuestionId, QuestionItem, ResponseKey, ResponseSet,
    SegmentError, SegmentProfile, Stage, SubjectId,
};
pub use evaluation::{
    aggregate, stage_weight, weighted_total, DimensionTally, Grade, ScoringEngine, ScoringSnapshot,
};
pub use growth::{analyze, DimensionDelta, GrowthDelta};
pub use report::{CohortSummary, DiagnosisReport, DimensionEntry, StrengthLevel};
pub use repository::{RepositoryError, SnapshotRepository};
pub use router::{diagnosis_router, SnapshotView, SubmissionRequest};
pub use service::{DiagnosisService, DiagnosisServiceError};
