mod aggregate;
mod grade;
mod weights;

pub use aggregate::{aggregate, DimensionTally};
pub use grade::Grade;
pub use weights::{stage_weight, weighted_total};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::SelectedQuestion;
use super::domain::{Dimension, ResponseSet, Stage, SubjectId};

/// Stateless engine running one complete scoring pass:
/// aggregate answers per dimension, combine with stage weights, grade.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Score one submission against its selected question set.
    ///
    /// `created_at` is caller-supplied; the engine never reads the clock, so
    /// snapshot ordering stays in the hands of the persistence layer.
    pub fn score(
        questions: &[SelectedQuestion],
        responses: &ResponseSet,
        stage: Stage,
        subject_id: SubjectId,
        created_at: DateTime<Utc>,
    ) -> ScoringSnapshot {
        let tallies = aggregate(questions, responses);

        let dimension_scores: BTreeMap<Dimension, f64> = tallies
            .iter()
            .map(|(dimension, tally)| (*dimension, tally.normalized))
            .collect();
        let max_weight_per_dimension: BTreeMap<Dimension, f64> = tallies
            .iter()
            .map(|(dimension, tally)| (*dimension, tally.max))
            .collect();

        let total_score = weighted_total(&dimension_scores, stage);
        let grade = Grade::from_score(total_score);

        ScoringSnapshot {
            subject_id,
            created_at,
            stage,
            dimension_scores,
            max_weight_per_dimension,
            total_score,
            grade,
        }
    }
}

/// Immutable result of one completed scoring run. A new submission always
/// creates a new snapshot; nothing mutates a stored one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSnapshot {
    pub subject_id: SubjectId,
    pub created_at: DateTime<Utc>,
    pub stage: Stage,
    /// Normalized score in [0, 100] per dimension that had applicable questions.
    pub dimension_scores: BTreeMap<Dimension, f64>,
    /// Sum of applicable question weights per dimension; lets presentation and
    /// growth analysis convert normalized scores back into raw points.
    pub max_weight_per_dimension: BTreeMap<Dimension, f64>,
    pub total_score: f64,
    pub grade: Grade,
}

impl ScoringSnapshot {
    /// Normalized score for a dimension, 0 when it had no applicable questions.
    pub fn dimension_score(&self, dimension: Dimension) -> f64 {
        self.dimension_scores.get(&dimension).copied().unwrap_or(0.0)
    }

    /// Applicable weight total for a dimension, 0 when it had no questions.
    pub fn max_weight(&self, dimension: Dimension) -> f64 {
        self.max_weight_per_dimension
            .get(&dimension)
            .copied()
            .unwrap_or(0.0)
    }
}
