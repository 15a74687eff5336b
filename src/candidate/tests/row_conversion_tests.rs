//! Tests for normalizing persisted rows into candidate records.

use super::fixtures::at;
use crate::candidate::{
    adapters::postgres::{CandidateRow, row_to_record},
    domain::{FormUpload, PipelineStatus, RwpScore, StatusToken},
    ports::CandidateStoreError,
};
use rstest::{fixture, rstest};

#[fixture]
fn sparse_row() -> CandidateRow {
    CandidateRow {
        id: 11,
        client_id: "acme".to_owned(),
        created_at: at(0),
        ..CandidateRow::default()
    }
}

#[rstest]
fn null_columns_become_zero_and_empty(sparse_row: CandidateRow) {
    let record = row_to_record(sparse_row).expect("sparse row converts");

    assert_eq!(record.profile().first_name, "");
    assert_eq!(record.profile().email, "");
    assert_eq!(record.fedex_id(), None);
    assert_eq!(record.assessment().score, RwpScore::new(0.0));
    assert_eq!(record.statuses().pipeline, PipelineStatus::New);
    assert!(record.statuses().background.is_unset());
    assert_eq!(record.forms().gcic, FormUpload::missing());
    assert!(!record.fadv().is_flagged());
    assert_eq!(record.recruiter_notes(), "");
    assert_eq!(record.updated_at(), at(0));
}

#[rstest]
fn placeholder_tokens_are_removed(sparse_row: CandidateRow) {
    let row = CandidateRow {
        first_name: Some("  Ada ".to_owned()),
        recruiter_notes: Some("nan".to_owned()),
        fedex_id: Some("None".to_owned()),
        background_status: Some("null".to_owned()),
        drug_test_status: Some(" Negative ".to_owned()),
        status: Some("nan".to_owned()),
        ..sparse_row
    };

    let record = row_to_record(row).expect("row converts");

    assert_eq!(record.profile().first_name, "Ada");
    assert_eq!(record.recruiter_notes(), "");
    assert_eq!(record.fedex_id(), None);
    assert!(record.statuses().background.is_unset());
    assert_eq!(record.statuses().drug_test, StatusToken::new("Negative"));
    assert_eq!(record.statuses().pipeline, PipelineStatus::New);
}

#[rstest]
#[case(Some(1), true)]
#[case(Some(2), true)]
#[case(Some(0), false)]
#[case(None, false)]
fn bits_are_set_when_non_zero(
    sparse_row: CandidateRow,
    #[case] bit: Option<i32>,
    #[case] expected: bool,
) {
    let row = CandidateRow {
        gcic_uploaded: bit,
        fadv_change_flag: bit,
        ..sparse_row
    };

    let record = row_to_record(row).expect("row converts");

    assert_eq!(record.forms().gcic.is_uploaded(), expected);
    assert_eq!(record.fadv().is_flagged(), expected);
}

#[rstest]
fn upload_timestamp_without_bit_is_dropped(sparse_row: CandidateRow) {
    let row = CandidateRow {
        mec_uploaded: Some(0),
        mec_upload_date: Some(at(5)),
        gcic_uploaded: Some(1),
        gcic_upload_date: Some(at(6)),
        ..sparse_row
    };

    let record = row_to_record(row).expect("row converts");

    assert_eq!(record.forms().mec, FormUpload::missing());
    assert_eq!(record.forms().gcic, FormUpload::uploaded_at(at(6)));
}

#[rstest]
fn updated_at_is_never_before_created_at(sparse_row: CandidateRow) {
    let row = CandidateRow {
        created_at: at(10),
        updated_at: Some(at(3)),
        ..sparse_row
    };

    let record = row_to_record(row).expect("row converts");

    assert_eq!(record.updated_at(), at(10));
}

#[rstest]
fn unknown_pipeline_status_is_a_persistence_error(sparse_row: CandidateRow) {
    let row = CandidateRow {
        status: Some("onboarding".to_owned()),
        ..sparse_row
    };

    assert!(matches!(
        row_to_record(row),
        Err(CandidateStoreError::Persistence(_))
    ));
}

#[rstest]
fn blank_client_is_a_persistence_error(sparse_row: CandidateRow) {
    let row = CandidateRow {
        client_id: "  ".to_owned(),
        ..sparse_row
    };

    assert!(matches!(
        row_to_record(row),
        Err(CandidateStoreError::Persistence(_))
    ));
}
