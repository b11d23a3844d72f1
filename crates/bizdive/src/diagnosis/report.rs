use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Dimension, SubjectId};
use super::evaluation::{Grade, ScoringSnapshot};
use super::growth::{self, GrowthDelta};

/// Strength banding for a dimension's normalized score on report pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    High,
    Moderate,
    Low,
}

impl StrengthLevel {
    /// High from 80 up, Low below 40, Moderate between.
    pub fn from_normalized(score: f64) -> StrengthLevel {
        if score >= 80.0 {
            StrengthLevel::High
        } else if score < 40.0 {
            StrengthLevel::Low
        } else {
            StrengthLevel::Moderate
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            StrengthLevel::High => "Strength",
            StrengthLevel::Moderate => "Developing",
            StrengthLevel::Low => "Needs Focus",
        }
    }
}

/// One dimension row of a diagnosis report.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionEntry {
    pub dimension: Dimension,
    pub dimension_label: &'static str,
    pub normalized: f64,
    pub raw_points: f64,
    pub max_points: f64,
    pub level: StrengthLevel,
    pub level_label: &'static str,
}

/// Presentation-ready view of one scoring run, with optional growth section.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisReport {
    pub subject_id: SubjectId,
    pub recorded_at: DateTime<Utc>,
    pub stage_label: &'static str,
    pub total_score: f64,
    pub grade: Grade,
    pub grade_label: &'static str,
    pub grade_description: &'static str,
    pub dimensions: Vec<DimensionEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth: Option<GrowthDelta>,
}

impl DiagnosisReport {
    /// Render a snapshot, comparing against the preceding one when present.
    pub fn from_snapshots(
        current: &ScoringSnapshot,
        previous: Option<&ScoringSnapshot>,
    ) -> DiagnosisReport {
        let dimensions = Dimension::ordered()
            .into_iter()
            .map(|dimension| {
                let normalized = current.dimension_score(dimension);
                let max_points = current.max_weight(dimension);
                let level = StrengthLevel::from_normalized(normalized);
                DimensionEntry {
                    dimension,
                    dimension_label: dimension.label(),
                    normalized,
                    raw_points: normalized / 100.0 * max_points,
                    max_points,
                    level,
                    level_label: level.label(),
                }
            })
            .collect();

        DiagnosisReport {
            subject_id: current.subject_id.clone(),
            recorded_at: current.created_at,
            stage_label: current.stage.label(),
            total_score: current.total_score,
            grade: current.grade,
            grade_label: current.grade.label(),
            grade_description: current.grade.description(),
            dimensions,
            growth: previous.map(|prior| growth::analyze(current, prior)),
        }
    }
}

/// Aggregate statistics over many subjects' snapshots, for program-level
/// dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct CohortSummary {
    pub snapshot_count: usize,
    pub mean_total_score: f64,
    /// Count per grade band in S..D order.
    pub grade_distribution: Vec<GradeCount>,
    pub dimension_means: Vec<DimensionMean>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeCount {
    pub grade: Grade,
    pub grade_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionMean {
    pub dimension: Dimension,
    pub dimension_label: &'static str,
    pub mean_normalized: f64,
}

impl CohortSummary {
    pub fn from_snapshots(snapshots: &[ScoringSnapshot]) -> CohortSummary {
        let count = snapshots.len();
        let mean_total_score = if count > 0 {
            snapshots.iter().map(|s| s.total_score).sum::<f64>() / count as f64
        } else {
            0.0
        };

        let grade_distribution = [Grade::S, Grade::A, Grade::B, Grade::C, Grade::D]
            .into_iter()
            .map(|grade| GradeCount {
                grade,
                grade_label: grade.label(),
                count: snapshots.iter().filter(|s| s.grade == grade).count(),
            })
            .collect();

        let dimension_means = Dimension::ordered()
            .into_iter()
            .map(|dimension| DimensionMean {
                dimension,
                dimension_label: dimension.label(),
                mean_normalized: if count > 0 {
                    snapshots
                        .iter()
                        .map(|s| s.dimension_score(dimension))
                        .sum::<f64>()
                        / count as f64
                } else {
                    0.0
                },
            })
            .collect();

        CohortSummary {
            snapshot_count: count,
            mean_total_score,
            grade_distribution,
            dimension_means,
        }
    }
}
