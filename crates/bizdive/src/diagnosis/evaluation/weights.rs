use std::collections::BTreeMap;

use crate::diagnosis::domain::{Dimension, Stage};

/// Dimension weight for one (stage, dimension) pair.
///
/// The match is exhaustive over both closed enums, so every stage a caller
/// can construct has a complete weight row; there is no fallback row.
pub const fn stage_weight(stage: Stage, dimension: Dimension) -> f64 {
    match stage {
        Stage::PreStartup => match dimension {
            Dimension::MarketAnalysis => 1.5,
            Dimension::ProblemUnderstanding => 1.5,
            Dimension::SolutionValue => 1.2,
            Dimension::ExecutionCapability => 1.0,
            Dimension::TechnicalCapability => 1.0,
            Dimension::RevenueModel => 1.0,
            Dimension::GrowthStrategy => 1.0,
        },
        Stage::EarlyStage => match dimension {
            Dimension::MarketAnalysis => 1.0,
            Dimension::ProblemUnderstanding => 1.2,
            Dimension::SolutionValue => 1.5,
            Dimension::ExecutionCapability => 1.2,
            Dimension::TechnicalCapability => 1.2,
            Dimension::RevenueModel => 1.5,
            Dimension::GrowthStrategy => 1.0,
        },
        Stage::Venture => match dimension {
            Dimension::MarketAnalysis => 1.0,
            Dimension::ProblemUnderstanding => 1.0,
            Dimension::SolutionValue => 1.2,
            Dimension::ExecutionCapability => 1.5,
            Dimension::TechnicalCapability => 1.2,
            Dimension::RevenueModel => 1.2,
            Dimension::GrowthStrategy => 1.5,
        },
        Stage::MidMarket => match dimension {
            Dimension::MarketAnalysis => 1.0,
            Dimension::ProblemUnderstanding => 1.0,
            Dimension::SolutionValue => 1.0,
            Dimension::ExecutionCapability => 1.5,
            Dimension::TechnicalCapability => 1.2,
            Dimension::RevenueModel => 1.2,
            Dimension::GrowthStrategy => 1.5,
        },
    }
}

/// Weighted mean of normalized dimension scores.
///
/// Every dimension contributes its stage weight to the denominator; a
/// dimension absent from `scores` scores 0 there, pulling the total down.
/// With all seven dimension scores bounded to [0, 100] the result stays
/// finite for every stage.
pub fn weighted_total(scores: &BTreeMap<Dimension, f64>, stage: Stage) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;

    for dimension in Dimension::ordered() {
        let weight = stage_weight(stage, dimension);
        let score = scores.get(&dimension).copied().unwrap_or(0.0);
        weighted_sum += score * weight;
        weight_sum += weight;
    }

    weighted_sum / weight_sum
}
