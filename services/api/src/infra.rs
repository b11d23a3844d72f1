use std::io::Cursor;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use bizdive::config::CatalogConfig;
use bizdive::diagnosis::{
    CatalogImporter, QuestionCatalog, RepositoryError, ScoringSnapshot, SnapshotRepository,
    SubjectId,
};
use bizdive::error::AppError;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Question bank used by `serve` and `demo` when no seed CSV is configured.
/// Pre-startup and early-stage content across all seven dimensions, with
/// IT/SaaS and manufacturing industry supplements.
const BUILTIN_CATALOG_CSV: &str = "\
id,dimension,category,mapping_code,weight,display_order,prompt
q-market-size,D1,common,,1.5,1,Have you sized your target market with third-party data?
q-market-competitors,D1,common,,1.0,2,Do you refresh your competitor landscape at least quarterly?
q-problem-interviews,D2,common,,1.5,1,Have you interviewed ten or more target customers about the problem?
q-problem-evidence,D2,common,,1.0,2,Do you keep written evidence of the problem's cost to customers?
q-solution-proto-p,D3,stage,P,1.2,1,Does a working prototype of the core solution exist?
q-solution-pilot-e,D3,stage,E,1.2,1,Is at least one paying customer using the solution in production?
q-exec-owners-p,D4,stage,P,1.0,1,Does every launch-critical workstream have a named owner?
q-exec-cadence-e,D4,stage,E,1.0,1,Do you run a regular delivery cadence with written goals?
q-tech-deploy-p-i,D5,industry,P_I,2.0,1,Can you deploy your service without manual infrastructure steps?
q-tech-quality-p-h,D5,industry,P_H,2.0,1,Do you have a documented quality gate for physical prototypes?
q-tech-scale-e-i,D5,industry,E_I,2.0,1,Can your platform double its load without re-architecture?
q-revenue-unit-p-i,D6,industry,P_I,1.5,1,Can you state unit economics for your next hundred customers?
q-revenue-margin-p-h,D6,industry,P_H,1.5,1,Do you know your landed cost and margin per unit?
q-growth-channels,D7,common,,1.0,1,Have you ranked your acquisition channels by measured cost?
q-esg-indicator-p,D7,esg,P,1.0,2,Do you track at least one sustainability indicator alongside financials?
q-esg-reporting-e,D7,esg,E,1.0,2,Do you publish sustainability progress to stakeholders annually?
";

pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<QuestionCatalog, AppError> {
    match &config.seed_path {
        Some(path) => Ok(CatalogImporter::from_path(path)?),
        None => Ok(CatalogImporter::from_reader(Cursor::new(
            BUILTIN_CATALOG_CSV,
        ))?),
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySnapshotRepository {
    records: Arc<Mutex<Vec<ScoringSnapshot>>>,
}

impl InMemorySnapshotRepository {
    pub(crate) fn all(&self) -> Vec<ScoringSnapshot> {
        self.records.lock().expect("repository mutex poisoned").clone()
    }
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn insert(&self, snapshot: ScoringSnapshot) -> Result<ScoringSnapshot, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard
            .iter()
            .any(|s| s.subject_id == snapshot.subject_id && s.created_at == snapshot.created_at)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(snapshot.clone());
        Ok(snapshot)
    }

    fn history(&self, subject: &SubjectId) -> Result<Vec<ScoringSnapshot>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut snapshots: Vec<ScoringSnapshot> = guard
            .iter()
            .filter(|s| &s.subject_id == subject)
            .cloned()
            .collect();
        snapshots.sort_by_key(|s| s.created_at);
        Ok(snapshots)
    }

    fn latest_pair(
        &self,
        subject: &SubjectId,
    ) -> Result<Option<(ScoringSnapshot, Option<ScoringSnapshot>)>, RepositoryError> {
        let mut snapshots = self.history(subject)?;
        let current = match snapshots.pop() {
            Some(snapshot) => snapshot,
            None => return Ok(None),
        };
        Ok(Some((current, snapshots.pop())))
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
