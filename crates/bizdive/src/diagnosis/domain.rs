use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog questions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

/// Identifier wrapper for the respondent that owns a scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

/// The seven evaluation axes every diagnosis is scored against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Dimension {
    MarketAnalysis,
    ProblemUnderstanding,
    SolutionValue,
    ExecutionCapability,
    TechnicalCapability,
    RevenueModel,
    GrowthStrategy,
}

impl Dimension {
    pub const fn code(self) -> &'static str {
        match self {
            Dimension::MarketAnalysis => "D1",
            Dimension::ProblemUnderstanding => "D2",
            Dimension::SolutionValue => "D3",
            Dimension::ExecutionCapability => "D4",
            Dimension::TechnicalCapability => "D5",
            Dimension::RevenueModel => "D6",
            Dimension::GrowthStrategy => "D7",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Dimension::MarketAnalysis => "Market Analysis",
            Dimension::ProblemUnderstanding => "Problem Understanding",
            Dimension::SolutionValue => "Solution Value",
            Dimension::ExecutionCapability => "Execution Capability",
            Dimension::TechnicalCapability => "Technical Capability",
            Dimension::RevenueModel => "Revenue Model",
            Dimension::GrowthStrategy => "Growth Strategy",
        }
    }

    /// Fixed enumeration order; also the tie-break order for comparative analytics.
    pub const fn ordered() -> [Dimension; 7] {
        [
            Dimension::MarketAnalysis,
            Dimension::ProblemUnderstanding,
            Dimension::SolutionValue,
            Dimension::ExecutionCapability,
            Dimension::TechnicalCapability,
            Dimension::RevenueModel,
            Dimension::GrowthStrategy,
        ]
    }

    pub fn from_code(code: &str) -> Option<Dimension> {
        Dimension::ordered()
            .into_iter()
            .find(|dimension| dimension.code() == code)
    }
}

/// Growth stage of the respondent's business; drives question selection and
/// dimension weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    PreStartup,
    EarlyStage,
    Venture,
    MidMarket,
}

impl Stage {
    pub const fn code(self) -> &'static str {
        match self {
            Stage::PreStartup => "P",
            Stage::EarlyStage => "E",
            Stage::Venture => "V",
            Stage::MidMarket => "M",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Stage::PreStartup => "Pre-Startup",
            Stage::EarlyStage => "Early-Stage",
            Stage::Venture => "Venture",
            Stage::MidMarket => "Mid-Market",
        }
    }

    pub const fn ordered() -> [Stage; 4] {
        [
            Stage::PreStartup,
            Stage::EarlyStage,
            Stage::Venture,
            Stage::MidMarket,
        ]
    }

    pub fn from_code(code: &str) -> Result<Stage, SegmentError> {
        Stage::ordered()
            .into_iter()
            .find(|stage| stage.code() == code)
            .ok_or_else(|| SegmentError::UnknownStage {
                code: code.to_string(),
            })
    }
}

/// Industry segment of the respondent's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    ItSaas,
    Manufacturing,
    LocalServices,
    ContentIp,
}

impl Industry {
    pub const fn code(self) -> &'static str {
        match self {
            Industry::ItSaas => "I",
            Industry::Manufacturing => "H",
            Industry::LocalServices => "L",
            Industry::ContentIp => "CT",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Industry::ItSaas => "IT / SaaS",
            Industry::Manufacturing => "Manufacturing / Hardware",
            Industry::LocalServices => "Services / F&B / Local",
            Industry::ContentIp => "Content / IP / Knowledge Services",
        }
    }

    pub const fn ordered() -> [Industry; 4] {
        [
            Industry::ItSaas,
            Industry::Manufacturing,
            Industry::LocalServices,
            Industry::ContentIp,
        ]
    }

    pub fn from_code(code: &str) -> Result<Industry, SegmentError> {
        Industry::ordered()
            .into_iter()
            .find(|industry| industry.code() == code)
            .ok_or_else(|| SegmentError::UnknownIndustry {
                code: code.to_string(),
            })
    }
}

/// Catalog grouping that decides when a question applies to a respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    /// Asked of every respondent regardless of segment.
    Common,
    /// Applies when `mapping_code` equals the respondent's stage code.
    Stage,
    /// Applies when `mapping_code` equals `{stage}_{industry}`.
    Industry,
    /// Sustainability supplement; applies per stage code like `Stage`.
    Esg,
}

impl QuestionCategory {
    pub const fn label(self) -> &'static str {
        match self {
            QuestionCategory::Common => "common",
            QuestionCategory::Stage => "stage",
            QuestionCategory::Industry => "industry",
            QuestionCategory::Esg => "esg",
        }
    }

    pub fn from_code(code: &str) -> Option<QuestionCategory> {
        match code {
            "common" => Some(QuestionCategory::Common),
            "stage" => Some(QuestionCategory::Stage),
            "industry" => Some(QuestionCategory::Industry),
            "esg" => Some(QuestionCategory::Esg),
            _ => None,
        }
    }
}

/// Immutable catalog entry. `display_order` stabilizes presentation and
/// selection ordering; it never influences a question's score contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionItem {
    pub id: QuestionId,
    pub dimension: Dimension,
    pub category: QuestionCategory,
    pub mapping_code: Option<String>,
    pub weight: f64,
    pub display_order: i32,
    pub prompt: String,
}

/// Respondent classification as supplied by the onboarding collaborator.
///
/// Codes arrive as raw strings and are validated when the question set is
/// selected; unknown codes fail the run rather than defaulting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentProfile {
    pub stage_code: String,
    pub industry_code: String,
}

impl SegmentProfile {
    pub fn new(stage_code: impl Into<String>, industry_code: impl Into<String>) -> Self {
        Self {
            stage_code: stage_code.into(),
            industry_code: industry_code.into(),
        }
    }

    pub fn resolve(&self) -> Result<(Stage, Industry), SegmentError> {
        let stage = Stage::from_code(&self.stage_code)?;
        let industry = Industry::from_code(&self.industry_code)?;
        Ok((stage, industry))
    }
}

/// Segment codes outside the fixed enumerations. There is no sensible default
/// segment, so these always propagate to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    #[error("unknown stage code '{code}'")]
    UnknownStage { code: String },
    #[error("unknown industry code '{code}'")]
    UnknownIndustry { code: String },
}

/// Stable identifier tying a recorded answer to one selected question.
///
/// Assigned once at selection time as `{dimension}_{ordinal}`; response maps
/// recorded against one selection remain valid for any re-run with the same
/// catalog and profile.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResponseKey(pub String);

impl ResponseKey {
    pub fn new(dimension: Dimension, ordinal: usize) -> Self {
        ResponseKey(format!("{}_{}", dimension.code(), ordinal))
    }
}

/// Boolean answers keyed by [`ResponseKey`]. A key absent from the map is a
/// negative answer, not missing data: the question's weight still counts
/// toward its dimension's denominator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSet(pub BTreeMap<ResponseKey, bool>);

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&mut self, key: ResponseKey, affirmative: bool) {
        self.0.insert(key, affirmative);
    }

    /// Absent and explicit-false entries are both negative.
    pub fn is_affirmative(&self, key: &ResponseKey) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ResponseKey, bool)> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = (ResponseKey, bool)>>(iter: I) -> Self {
        ResponseSet(iter.into_iter().collect())
    }
}
