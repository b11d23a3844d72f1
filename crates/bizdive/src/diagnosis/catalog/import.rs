use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::QuestionCatalog;
use crate::diagnosis::domain::{Dimension, QuestionCategory, QuestionId, QuestionItem};

/// Failures while loading a question catalog from CSV seed data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog row {row}: {reason}")]
    Record { row: usize, reason: String },
}

/// Loads the question bank from the spreadsheet-derived CSV seed format.
///
/// Expected header: `id,dimension,category,mapping_code,weight,display_order,prompt`.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<QuestionCatalog, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<QuestionCatalog, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut items = Vec::new();
        for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            // Row numbering is 1-based and counts the header line.
            let row = index + 2;
            let parsed = record?;
            items.push(parsed.into_item(row)?);
        }

        Ok(QuestionCatalog::new(items))
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    dimension: String,
    category: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    mapping_code: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    weight: Option<String>,
    #[serde(default)]
    display_order: Option<i32>,
    #[serde(default)]
    prompt: String,
}

impl CatalogRow {
    fn into_item(self, row: usize) -> Result<QuestionItem, CatalogImportError> {
        let dimension = Dimension::from_code(&self.dimension).ok_or_else(|| {
            CatalogImportError::Record {
                row,
                reason: format!("unknown dimension code '{}'", self.dimension),
            }
        })?;

        let category = QuestionCategory::from_code(&self.category).ok_or_else(|| {
            CatalogImportError::Record {
                row,
                reason: format!("unknown category '{}'", self.category),
            }
        })?;

        let weight = match self.weight.as_deref() {
            None => 1.0,
            Some(raw) => raw.parse::<f64>().ok().filter(|w| *w > 0.0).ok_or_else(|| {
                CatalogImportError::Record {
                    row,
                    reason: format!("weight '{raw}' is not a positive number"),
                }
            })?,
        };

        if self.id.is_empty() {
            return Err(CatalogImportError::Record {
                row,
                reason: "missing question id".to_string(),
            });
        }

        Ok(QuestionItem {
            id: QuestionId(self.id),
            dimension,
            category,
            mapping_code: self.mapping_code,
            weight,
            display_order: self.display_order.unwrap_or(0),
            prompt: self.prompt,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
