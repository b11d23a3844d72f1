use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::diagnosis::catalog::SelectedQuestion;
use crate::diagnosis::domain::{Dimension, ResponseSet};

/// Earned-versus-applicable weight accounting for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionTally {
    pub earned: f64,
    pub max: f64,
    pub normalized: f64,
}

/// Fold boolean answers into per-dimension tallies.
///
/// A question whose key is absent from `responses` counts as answered
/// negative: it earns nothing but its weight stays in the dimension's
/// denominator. Response keys that match no selected question are ignored.
/// A dimension with zero applicable weight normalizes to 0, never NaN.
pub fn aggregate(
    questions: &[SelectedQuestion],
    responses: &ResponseSet,
) -> BTreeMap<Dimension, DimensionTally> {
    let mut tallies: BTreeMap<Dimension, DimensionTally> = BTreeMap::new();

    for question in questions {
        let tally = tallies
            .entry(question.item.dimension)
            .or_insert(DimensionTally {
                earned: 0.0,
                max: 0.0,
                normalized: 0.0,
            });

        tally.max += question.item.weight;
        if responses.is_affirmative(&question.key) {
            tally.earned += question.item.weight;
        }
    }

    for tally in tallies.values_mut() {
        tally.normalized = if tally.max > 0.0 {
            (tally.earned / tally.max) * 100.0
        } else {
            0.0
        };
    }

    tallies
}
