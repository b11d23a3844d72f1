pub mod import;

use serde::{Deserialize, Serialize};

use super::domain::{
    Dimension, QuestionCategory, QuestionItem, ResponseKey, SegmentError, SegmentProfile,
};

/// The full, order-irrelevant universe of scoring items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionCatalog {
    items: Vec<QuestionItem>,
}

/// One question chosen for a respondent, carrying the response key assigned
/// to it during selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedQuestion {
    pub key: ResponseKey,
    pub item: QuestionItem,
}

impl QuestionCatalog {
    pub fn new(items: Vec<QuestionItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[QuestionItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Select the applicable question set for a segment profile.
    ///
    /// The result is the union of common items, stage items matching the
    /// stage code, industry items matching `{stage}_{industry}`, and ESG
    /// items matching the stage code. Ordering is deterministic (dimension,
    /// then display order, then id) and response keys are assigned from that
    /// ordering, so re-running with the same catalog and profile reproduces
    /// both content and keys exactly.
    pub fn select(
        &self,
        profile: &SegmentProfile,
    ) -> Result<Vec<SelectedQuestion>, SegmentError> {
        let (stage, industry) = profile.resolve()?;
        let stage_code = stage.code();
        let stage_industry_code = format!("{}_{}", stage.code(), industry.code());

        let mut applicable: Vec<&QuestionItem> = self
            .items
            .iter()
            .filter(|item| match item.category {
                QuestionCategory::Common => true,
                QuestionCategory::Stage | QuestionCategory::Esg => {
                    item.mapping_code.as_deref() == Some(stage_code)
                }
                QuestionCategory::Industry => {
                    item.mapping_code.as_deref() == Some(stage_industry_code.as_str())
                }
            })
            .collect();

        applicable.sort_by(|a, b| {
            a.dimension
                .cmp(&b.dimension)
                .then(a.display_order.cmp(&b.display_order))
                .then(a.id.cmp(&b.id))
        });

        let mut selected = Vec::with_capacity(applicable.len());
        let mut previous: Option<Dimension> = None;
        let mut ordinal = 0usize;

        for item in applicable {
            if previous != Some(item.dimension) {
                previous = Some(item.dimension);
                ordinal = 0;
            }
            selected.push(SelectedQuestion {
                key: ResponseKey::new(item.dimension, ordinal),
                item: item.clone(),
            });
            ordinal += 1;
        }

        Ok(selected)
    }
}
