//! Tests for identifiers, status vocabulary, forms, and record mutation.

use super::fixtures::{at, candidate, client, flagged};
use crate::candidate::domain::{
    CandidateDomainError, FedexId, FieldUpdate, FormKind, FormUpload, PipelineStatus,
    SnapshotScope, StatusToken, normalize_text,
};
use rstest::rstest;

#[rstest]
#[case("", "")]
#[case("  spaced  ", "spaced")]
#[case("nan", "")]
#[case("NaN", "")]
#[case(" None ", "")]
#[case("null", "")]
#[case("nancy", "nancy")]
fn normalize_text_strips_placeholders(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(normalize_text(raw), expected);
}

#[rstest]
fn client_id_rejects_blank_values() {
    assert_eq!(
        crate::candidate::domain::ClientId::new("   "),
        Err(CandidateDomainError::EmptyClientId)
    );
    assert_eq!(client(" acme ").as_str(), "acme");
}

#[rstest]
#[case("FX123", Some("FX123"))]
#[case("  FX123 ", Some("FX123"))]
#[case("", None)]
#[case("nan", None)]
fn fedex_id_parse_treats_placeholders_as_absent(
    #[case] raw: &str,
    #[case] expected: Option<&str>,
) {
    assert_eq!(FedexId::parse(raw).as_ref().map(FedexId::as_str), expected);
}

#[rstest]
#[case("new", PipelineStatus::New)]
#[case("Contacted", PipelineStatus::Contacted)]
#[case(" SCHEDULED ", PipelineStatus::Scheduled)]
#[case("hired", PipelineStatus::Hired)]
#[case("rejected", PipelineStatus::Rejected)]
fn pipeline_status_parses_every_variant(#[case] raw: &str, #[case] expected: PipelineStatus) {
    assert_eq!(PipelineStatus::try_from(raw), Ok(expected));
    assert_eq!(
        PipelineStatus::try_from(expected.as_str()),
        Ok(expected),
        "canonical form should parse back"
    );
}

#[rstest]
fn pipeline_status_rejects_unknown_values() {
    let result = PipelineStatus::try_from("onboarding");
    assert!(result.is_err());
}

#[rstest]
fn status_token_matches_needles_ignoring_case() {
    let token = StatusToken::new("Complete - Clear");
    assert!(token.contains_any(&["clear", "complete"]));
    assert!(!token.contains_any(&["pending"]));
    assert!(StatusToken::new("None").is_unset());
}

#[rstest]
#[case("g", FormKind::Gcic)]
#[case("GCIC", FormKind::Gcic)]
#[case("m", FormKind::Mec)]
#[case("mec", FormKind::Mec)]
fn form_kind_accepts_short_and_long_names(#[case] raw: &str, #[case] expected: FormKind) {
    assert_eq!(FormKind::try_from(raw), Ok(expected));
}

#[rstest]
fn form_toggle_stamps_and_clears_timestamp() {
    let now = at(30);

    let uploaded = FormUpload::missing()
        .toggled(true, now)
        .expect("false to true is a change");
    assert!(uploaded.is_uploaded());
    assert_eq!(uploaded.timestamp(), Some(now));

    let cleared = uploaded
        .toggled(false, at(31))
        .expect("true to false is a change");
    assert!(!cleared.is_uploaded());
    assert_eq!(cleared.timestamp(), None);
}

#[rstest]
#[case(false)]
#[case(true)]
fn form_toggle_to_same_state_is_a_no_op(#[case] uploaded: bool) {
    let state = if uploaded {
        FormUpload::uploaded_at(at(0))
    } else {
        FormUpload::missing()
    };
    assert_eq!(state.toggled(uploaded, at(5)), None);
}

#[rstest]
fn persisted_form_without_bit_drops_timestamp() {
    let state = FormUpload::from_persisted(false, Some(at(0)));
    assert_eq!(state, FormUpload::missing());

    let legacy = FormUpload::from_persisted(true, None);
    assert!(legacy.is_uploaded());
    assert_eq!(legacy.timestamp(), None);
}

#[rstest]
fn notes_update_clears_flag_and_keeps_details() {
    let mut record = flagged(candidate(1, "acme", "Ada", "Lovelace"), "Drug test updated");

    record.apply(&FieldUpdate::RecruiterNotes("called back".to_owned()), at(60));

    assert_eq!(record.recruiter_notes(), "called back");
    assert!(!record.fadv().is_flagged());
    assert_eq!(record.fadv().details(), "Drug test updated");
    assert_eq!(record.updated_at(), at(60));
}

#[rstest]
fn non_note_updates_leave_flag_raised() {
    let mut record = flagged(candidate(1, "acme", "Ada", "Lovelace"), "Drug test updated");

    record.apply(&FieldUpdate::FedexId(FedexId::parse("FX1")), at(60));
    record.apply(
        &FieldUpdate::Form {
            kind: FormKind::Mec,
            state: FormUpload::uploaded_at(at(61)),
        },
        at(61),
    );
    record.apply(&FieldUpdate::PipelineStatus(PipelineStatus::Hired), at(62));

    assert!(record.fadv().is_flagged());
    assert_eq!(record.statuses().pipeline, PipelineStatus::Hired);
    assert!(record.forms().mec.is_uploaded());
}

#[rstest]
fn mark_reviewed_clears_flag_without_touching_notes() {
    let mut record = flagged(
        candidate(1, "acme", "Ada", "Lovelace").with_recruiter_notes("keep me"),
        "Background status changed",
    );

    record.apply(&FieldUpdate::MarkReviewed, at(60));

    assert!(!record.fadv().is_flagged());
    assert_eq!(record.recruiter_notes(), "keep me");
    assert_eq!(
        record.fadv().last_updated(),
        Some(at(1)),
        "review keeps the vendor report time"
    );
}

#[rstest]
fn updated_at_never_moves_backwards() {
    let mut record = candidate(5, "acme", "Ada", "Lovelace");
    record.apply(&FieldUpdate::MarkReviewed, at(100));

    record.apply(&FieldUpdate::MarkReviewed, at(50));

    assert_eq!(record.updated_at(), at(100));
}

#[rstest]
fn recruiter_scope_orders_flagged_then_newest_intake() {
    let undated = candidate(1, "acme", "Undated", "Record").with_intake_date(None);
    let older = candidate(2, "acme", "Older", "Record");
    let newer = candidate(3, "globex", "Newer", "Record");
    let flagged_old = flagged(candidate(0, "globex", "Flagged", "Record"), "changed");
    let mut records = vec![undated, older, newer, flagged_old];

    SnapshotScope::All.sort(&mut records);

    let order: Vec<i64> = records.iter().map(|record| record.id().value()).collect();
    assert_eq!(order, vec![0, 3, 2, 1]);
}

#[rstest]
fn client_scope_contains_only_that_client_newest_first() {
    let scope = SnapshotScope::Client(client("acme"));
    let mut records: Vec<_> = [
        candidate(1, "acme", "A", "One"),
        candidate(2, "globex", "B", "Two"),
        candidate(3, "acme", "C", "Three"),
    ]
    .into_iter()
    .filter(|record| scope.contains(record))
    .collect();

    scope.sort(&mut records);

    let order: Vec<i64> = records.iter().map(|record| record.id().value()).collect();
    assert_eq!(order, vec![3, 1]);
}
