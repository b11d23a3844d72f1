use std::collections::BTreeMap;

use super::common::*;
use crate::diagnosis::domain::{Dimension, Stage};
use crate::diagnosis::evaluation::{Grade, ScoringSnapshot};
use crate::diagnosis::growth::analyze;

const EPSILON: f64 = 1e-9;

fn snapshot_with_scores(
    days: i64,
    scores: &[(Dimension, f64)],
    max_weights: &[(Dimension, f64)],
    total_score: f64,
) -> ScoringSnapshot {
    let dimension_scores: BTreeMap<Dimension, f64> = scores.iter().copied().collect();
    let max_weight_per_dimension: BTreeMap<Dimension, f64> =
        max_weights.iter().copied().collect();
    ScoringSnapshot {
        subject_id: subject("org-growth"),
        created_at: recorded_at(days),
        stage: Stage::PreStartup,
        dimension_scores,
        max_weight_per_dimension,
        total_score,
        grade: Grade::from_score(total_score),
    }
}

#[test]
fn identical_snapshots_produce_zero_deltas() {
    let scores = [
        (Dimension::MarketAnalysis, 60.0),
        (Dimension::ProblemUnderstanding, 40.0),
    ];
    let weights = [
        (Dimension::MarketAnalysis, 3.0),
        (Dimension::ProblemUnderstanding, 2.0),
    ];
    let previous = snapshot_with_scores(0, &scores, &weights, 52.0);
    let current = snapshot_with_scores(30, &scores, &weights, 52.0);

    let delta = analyze(&current, &previous);

    assert!((delta.total_delta - 0.0).abs() < EPSILON);
    assert_eq!(delta.improved_count, 0);
    assert_eq!(delta.declined_count, 0);
    for entry in &delta.dimension_deltas {
        assert!((entry.delta - 0.0).abs() < EPSILON);
    }
    // With nothing moving, the tie-break lands on the first dimension.
    assert_eq!(delta.most_improved, Dimension::MarketAnalysis);
}

#[test]
fn improvements_and_declines_are_counted_separately() {
    let previous = snapshot_with_scores(
        0,
        &[
            (Dimension::MarketAnalysis, 50.0),
            (Dimension::ProblemUnderstanding, 80.0),
            (Dimension::SolutionValue, 30.0),
        ],
        &[
            (Dimension::MarketAnalysis, 2.0),
            (Dimension::ProblemUnderstanding, 2.0),
            (Dimension::SolutionValue, 2.0),
        ],
        48.0,
    );
    let current = snapshot_with_scores(
        14,
        &[
            (Dimension::MarketAnalysis, 90.0),
            (Dimension::ProblemUnderstanding, 60.0),
            (Dimension::SolutionValue, 30.0),
        ],
        &[
            (Dimension::MarketAnalysis, 2.0),
            (Dimension::ProblemUnderstanding, 2.0),
            (Dimension::SolutionValue, 2.0),
        ],
        57.0,
    );

    let delta = analyze(&current, &previous);

    assert_eq!(delta.improved_count, 1);
    assert_eq!(delta.declined_count, 1);
    assert!(delta.improved_count + delta.declined_count <= 7);
    assert_eq!(delta.most_improved, Dimension::MarketAnalysis);
    assert!((delta.total_delta - 9.0).abs() < EPSILON);
    assert_eq!(delta.previous_recorded_at, recorded_at(0));
}

#[test]
fn most_improved_tie_breaks_on_enumeration_order() {
    let previous = snapshot_with_scores(
        0,
        &[
            (Dimension::ProblemUnderstanding, 20.0),
            (Dimension::SolutionValue, 20.0),
        ],
        &[
            (Dimension::ProblemUnderstanding, 5.0),
            (Dimension::SolutionValue, 5.0),
        ],
        10.0,
    );
    let current = snapshot_with_scores(
        7,
        &[
            (Dimension::ProblemUnderstanding, 60.0),
            (Dimension::SolutionValue, 60.0),
        ],
        &[
            (Dimension::ProblemUnderstanding, 5.0),
            (Dimension::SolutionValue, 5.0),
        ],
        30.0,
    );

    let delta = analyze(&current, &previous);

    // D2 and D3 both gained 2.0 raw points; the earlier dimension wins.
    assert_eq!(delta.most_improved, Dimension::ProblemUnderstanding);
}

#[test]
fn previous_raw_points_use_the_current_weight_totals() {
    // The subject's segment changed, so the previous run had different
    // applicable weights. Raw comparison re-expresses it in today's scheme.
    let previous = snapshot_with_scores(
        0,
        &[(Dimension::MarketAnalysis, 50.0)],
        &[(Dimension::MarketAnalysis, 10.0)],
        50.0,
    );
    let current = snapshot_with_scores(
        30,
        &[(Dimension::MarketAnalysis, 75.0)],
        &[(Dimension::MarketAnalysis, 4.0)],
        75.0,
    );

    let delta = analyze(&current, &previous);

    let market = delta
        .dimension_deltas
        .iter()
        .find(|d| d.dimension == Dimension::MarketAnalysis)
        .expect("market entry");
    assert!((market.previous_raw - 2.0).abs() < EPSILON);
    assert!((market.current_raw - 3.0).abs() < EPSILON);
    assert!((market.delta - 1.0).abs() < EPSILON);
}

#[test]
fn every_dimension_appears_in_the_delta_listing() {
    let previous = snapshot_with_scores(0, &[], &[], 0.0);
    let current = snapshot_with_scores(1, &[], &[], 0.0);

    let delta = analyze(&current, &previous);

    assert_eq!(delta.dimension_deltas.len(), 7);
    let order: Vec<Dimension> = delta.dimension_deltas.iter().map(|d| d.dimension).collect();
    assert_eq!(order, Dimension::ordered().to_vec());
}
