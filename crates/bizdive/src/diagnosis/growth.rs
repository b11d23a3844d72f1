use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::Dimension;
use super::evaluation::ScoringSnapshot;

/// Raw-point movement for a single dimension between two scoring runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionDelta {
    pub dimension: Dimension,
    pub previous_raw: f64,
    pub current_raw: f64,
    pub delta: f64,
}

/// Period-over-period comparison of two snapshots for the same subject.
///
/// Raw points for both runs are derived with the *current* snapshot's
/// per-dimension weight totals; when the respondent's segment changed
/// between runs, the previous run is re-expressed in the newer weighting
/// scheme, which makes old raw points an approximation. Computed on demand
/// and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthDelta {
    pub total_delta: f64,
    pub dimension_deltas: Vec<DimensionDelta>,
    pub most_improved: Dimension,
    pub improved_count: usize,
    pub declined_count: usize,
    pub previous_recorded_at: DateTime<Utc>,
}

/// Compare the current snapshot against the immediately preceding one.
///
/// Callers only invoke this when a previous snapshot exists; a subject with
/// a single run has no growth to report.
pub fn analyze(current: &ScoringSnapshot, previous: &ScoringSnapshot) -> GrowthDelta {
    let mut dimension_deltas = Vec::with_capacity(Dimension::ordered().len());
    let mut most_improved = Dimension::ordered()[0];
    let mut best_delta = f64::NEG_INFINITY;
    let mut improved_count = 0;
    let mut declined_count = 0;

    for dimension in Dimension::ordered() {
        let max = current.max_weight(dimension);
        let current_raw = current.dimension_score(dimension) / 100.0 * max;
        let previous_raw = previous.dimension_score(dimension) / 100.0 * max;
        let delta = current_raw - previous_raw;

        if delta > 0.0 {
            improved_count += 1;
        } else if delta < 0.0 {
            declined_count += 1;
        }

        // Strict comparison keeps the earliest dimension on ties.
        if delta > best_delta {
            best_delta = delta;
            most_improved = dimension;
        }

        dimension_deltas.push(DimensionDelta {
            dimension,
            previous_raw,
            current_raw,
            delta,
        });
    }

    GrowthDelta {
        total_delta: current.total_score - previous.total_score,
        dimension_deltas,
        most_improved,
        improved_count,
        declined_count,
        previous_recorded_at: previous.created_at,
    }
}
