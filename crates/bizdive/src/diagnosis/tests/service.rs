use super::common::*;
use crate::diagnosis::domain::{ResponseSet, SegmentError};
use crate::diagnosis::evaluation::Grade;
use crate::diagnosis::repository::RepositoryError;
use crate::diagnosis::service::DiagnosisServiceError;

const EPSILON: f64 = 1e-9;

#[test]
fn submit_persists_a_graded_snapshot() {
    let (service, repository) = build_service();
    let segment = profile("P", "I");
    let questions = service.questionnaire(&segment).expect("valid segment");
    let responses = respond_all(&questions, true);

    let snapshot = service
        .submit(&segment, &responses, subject("org-1"), recorded_at(0))
        .expect("submission scores");

    assert_eq!(snapshot.grade, Grade::S);
    assert!((snapshot.total_score - 100.0).abs() < EPSILON);
    assert_eq!(
        repository.records.lock().expect("repository mutex").len(),
        1
    );
}

#[test]
fn submit_with_unknown_segment_stores_nothing() {
    let (service, repository) = build_service();
    let segment = profile("Z", "I");

    let err = service
        .submit(
            &segment,
            &ResponseSet::new(),
            subject("org-bad"),
            recorded_at(0),
        )
        .expect_err("unknown stage must fail");

    assert!(matches!(
        err,
        DiagnosisServiceError::Segment(SegmentError::UnknownStage { .. })
    ));
    assert!(repository.records.lock().expect("repository mutex").is_empty());
}

#[test]
fn duplicate_timestamp_for_a_subject_is_a_conflict() {
    let (service, _repository) = build_service();
    let segment = profile("P", "I");
    let questions = service.questionnaire(&segment).expect("valid segment");
    let responses = respond_all(&questions, true);

    service
        .submit(&segment, &responses, subject("org-dup"), recorded_at(0))
        .expect("first submission");
    let err = service
        .submit(&segment, &responses, subject("org-dup"), recorded_at(0))
        .expect_err("same timestamp must conflict");

    assert!(matches!(
        err,
        DiagnosisServiceError::Repository(RepositoryError::Conflict)
    ));
}

#[test]
fn report_without_history_is_not_found() {
    let (service, _repository) = build_service();

    let err = service
        .report(&subject("org-none"))
        .expect_err("no snapshots recorded");

    assert!(matches!(
        err,
        DiagnosisServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn first_report_has_no_growth_section() {
    let (service, _repository) = build_service();
    let segment = profile("P", "I");
    let questions = service.questionnaire(&segment).expect("valid segment");

    service
        .submit(
            &segment,
            &respond_all(&questions, false),
            subject("org-first"),
            recorded_at(0),
        )
        .expect("submission scores");

    let report = service.report(&subject("org-first")).expect("report");
    assert!(report.growth.is_none());
    assert_eq!(report.dimensions.len(), 7);
}

#[test]
fn second_submission_unlocks_growth_analysis() {
    let (service, _repository) = build_service();
    let segment = profile("P", "I");
    let questions = service.questionnaire(&segment).expect("valid segment");

    service
        .submit(
            &segment,
            &respond_all(&questions, false),
            subject("org-2"),
            recorded_at(0),
        )
        .expect("first run");
    service
        .submit(
            &segment,
            &respond_all(&questions, true),
            subject("org-2"),
            recorded_at(30),
        )
        .expect("second run");

    let report = service.report(&subject("org-2")).expect("report");
    let growth = report.growth.expect("growth section present");

    assert!((growth.total_delta - 100.0).abs() < EPSILON);
    assert_eq!(growth.improved_count, 7);
    assert_eq!(growth.declined_count, 0);
    assert_eq!(growth.previous_recorded_at, recorded_at(0));
}

#[test]
fn history_is_chronological() {
    let (service, _repository) = build_service();
    let segment = profile("E", "H");
    let questions = service.questionnaire(&segment).expect("valid segment");
    let responses = respond_all(&questions, true);

    // Insert out of order; history must still come back oldest first.
    for days in [20, 5, 40] {
        service
            .submit(&segment, &responses, subject("org-h"), recorded_at(days))
            .expect("submission scores");
    }

    let history = service.history(&subject("org-h")).expect("history");
    assert_eq!(history.len(), 3);
    assert!(history.windows(2).all(|w| w[0].created_at < w[1].created_at));
}

#[test]
fn questionnaire_matches_catalog_selection() {
    let (service, _repository) = build_service();
    let segment = profile("P", "I");

    let from_service = service.questionnaire(&segment).expect("valid segment");
    let from_catalog = service.catalog().select(&segment).expect("valid segment");
    assert_eq!(from_service, from_catalog);
}
