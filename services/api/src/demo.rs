use crate::infra::{load_catalog, parse_date, InMemorySnapshotRepository};
use bizdive::config::CatalogConfig;
use bizdive::diagnosis::{
    DiagnosisReport, DiagnosisService, ResponseSet, SegmentProfile, SelectedQuestion, SubjectId,
};
use bizdive::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DiagnoseArgs {
    /// Question catalog CSV (defaults to the built-in bank)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Growth-stage code (P, E, V, or M)
    #[arg(long)]
    pub(crate) stage: String,
    /// Industry code (I, H, L, or CT)
    #[arg(long)]
    pub(crate) industry: String,
    /// Subject identifier attached to the snapshot
    #[arg(long, default_value = "cli-subject")]
    pub(crate) subject: String,
    /// JSON file mapping response keys to booleans
    #[arg(long)]
    pub(crate) responses: Option<PathBuf>,
    /// Answer every selected question affirmatively
    #[arg(long)]
    pub(crate) affirm_all: bool,
    /// Date recorded on the snapshot (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) recorded_at: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Growth-stage code used for the demo subject
    #[arg(long, default_value = "P")]
    pub(crate) stage: String,
    /// Industry code used for the demo subject
    #[arg(long, default_value = "I")]
    pub(crate) industry: String,
}

pub(crate) fn run_diagnose(args: DiagnoseArgs) -> Result<(), AppError> {
    let DiagnoseArgs {
        catalog,
        stage,
        industry,
        subject,
        responses,
        affirm_all,
        recorded_at,
    } = args;

    let catalog_config = CatalogConfig { seed_path: catalog };
    let service = DiagnosisService::new(
        load_catalog(&catalog_config)?,
        Arc::new(InMemorySnapshotRepository::default()),
    );

    let profile = SegmentProfile::new(stage, industry);
    let questions = service.questionnaire(&profile)?;
    let response_set = build_responses(&questions, responses, affirm_all)?;

    let recorded_at = recorded_at
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now);

    service.submit(
        &profile,
        &response_set,
        SubjectId(subject.clone()),
        recorded_at,
    )?;

    let report = service.report(&SubjectId(subject))?;
    render_report(&report);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { stage, industry } = args;

    let service = DiagnosisService::new(
        load_catalog(&CatalogConfig::default())?,
        Arc::new(InMemorySnapshotRepository::default()),
    );

    let profile = SegmentProfile::new(stage, industry);
    let subject = SubjectId("demo-company".to_string());
    let questions = service.questionnaire(&profile)?;

    println!("Diagnosis demo: {} questions selected", questions.len());

    // Round one: the company has its market homework done, little else.
    let first_round: ResponseSet = questions
        .iter()
        .enumerate()
        .map(|(i, q)| (q.key.clone(), i % 3 == 0))
        .collect();
    let quarter_ago = Utc::now() - chrono::Duration::days(90);
    service.submit(&profile, &first_round, subject.clone(), quarter_ago)?;

    // Round two: a quarter later most of the gaps are closed.
    let second_round: ResponseSet = questions
        .iter()
        .enumerate()
        .map(|(i, q)| (q.key.clone(), i % 5 != 1))
        .collect();
    service.submit(&profile, &second_round, subject.clone(), Utc::now())?;

    let report = service.report(&subject)?;
    render_report(&report);
    Ok(())
}

fn build_responses(
    questions: &[SelectedQuestion],
    responses_path: Option<PathBuf>,
    affirm_all: bool,
) -> Result<ResponseSet, AppError> {
    if let Some(path) = responses_path {
        let file = std::fs::File::open(path)?;
        let parsed: ResponseSet = serde_json::from_reader(file)
            .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))?;
        return Ok(parsed);
    }

    if affirm_all {
        return Ok(questions.iter().map(|q| (q.key.clone(), true)).collect());
    }

    Ok(ResponseSet::new())
}

fn render_report(report: &DiagnosisReport) {
    println!();
    println!(
        "Diagnosis report for {} ({})",
        report.subject_id.0, report.stage_label
    );
    println!("Recorded at: {}", format_timestamp(report.recorded_at));
    println!(
        "Total score: {:.1}  Grade: {} ({})",
        report.total_score, report.grade_label, report.grade_description
    );
    println!();

    for entry in &report.dimensions {
        println!(
            "  {:<22} {:>5.1} / 100  ({:.1} of {:.1} pts)  [{}]",
            entry.dimension_label,
            entry.normalized,
            entry.raw_points,
            entry.max_points,
            entry.level_label
        );
    }

    if let Some(growth) = &report.growth {
        println!();
        println!(
            "Since {}: total {:+.1}, {} dimension(s) up, {} down",
            format_timestamp(growth.previous_recorded_at),
            growth.total_delta,
            growth.improved_count,
            growth.declined_count
        );
        println!(
            "Biggest mover: {}",
            growth.most_improved.label()
        );
        for delta in &growth.dimension_deltas {
            if delta.delta != 0.0 {
                println!(
                    "  {:<22} {:+.1} pts ({:.1} -> {:.1})",
                    delta.dimension.label(),
                    delta.delta,
                    delta.previous_raw,
                    delta.current_raw
                );
            }
        }
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}
