//! Bulk-edit reconciliation against [`InMemoryCandidateStore`].

use crate::in_memory::helpers::{client, find, ids, intake, runtime, store};
use mockable::DefaultClock;
use peakats::candidate::{
    adapters::memory::InMemoryCandidateStore,
    domain::{
        CandidateId, CandidateRecord, EditedRow, FormKind, PipelineStatus, RecruiterSummary,
        SnapshotScope, diff_snapshot, export_csv,
    },
    ports::CandidateStore,
    services::ReconciliationService,
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

type Service = ReconciliationService<InMemoryCandidateStore, DefaultClock>;

fn service(store: &Arc<InMemoryCandidateStore>) -> Service {
    ReconciliationService::new(Arc::clone(store), Arc::new(DefaultClock))
}

fn edited_copy(
    snapshot: &[CandidateRecord],
    id: i64,
    edit: impl Fn(EditedRow) -> EditedRow,
) -> Vec<EditedRow> {
    snapshot
        .iter()
        .map(EditedRow::from_record)
        .map(|row| if row.id == CandidateId::new(id) { edit(row) } else { row })
        .collect()
}

/// A vendor flag survives unrelated edits and clears once notes are saved.
#[rstest]
fn vendor_flag_clears_only_when_notes_are_written(
    runtime: io::Result<Runtime>,
    store: Arc<InMemoryCandidateStore>,
) {
    let rt = runtime.expect("runtime creation");
    let service = service(&store);
    store
        .raise_fadv_change(CandidateId::new(1), "Background status changed", intake(90))
        .expect("raise flag");

    let loaded = rt
        .block_on(store.load_snapshot(&SnapshotScope::All))
        .expect("load");
    assert_eq!(ids(&loaded), vec![1, 3, 2], "flagged record sorts first");

    let courier_edit = edited_copy(&loaded, 1, |row| row.with_fedex_id("7712 0044"));
    let report = rt.block_on(service.reconcile(&loaded, &courier_edit));
    assert_eq!(report.changes_applied(), 1);

    let after_courier = rt
        .block_on(store.load_snapshot(&SnapshotScope::All))
        .expect("reload");
    assert!(find(&after_courier, 1).fadv().is_flagged());

    let notes_edit = edited_copy(&after_courier, 1, |row| {
        row.with_recruiter_notes("Reviewed report with candidate")
    });
    let notes_report = rt.block_on(service.reconcile(&after_courier, &notes_edit));
    assert!(notes_report.is_complete());

    let reviewed = rt
        .block_on(store.load_snapshot(&SnapshotScope::All))
        .expect("reload");
    let record = find(&reviewed, 1);
    assert!(!record.fadv().is_flagged());
    assert_eq!(record.recruiter_notes(), "Reviewed report with candidate");
    assert_eq!(RecruiterSummary::compute(&reviewed, &reviewed).flagged, 0);
}

/// Edits spanning several rows are written field by field and show in exports.
#[rstest]
fn multi_row_edit_is_reflected_in_export(
    runtime: io::Result<Runtime>,
    store: Arc<InMemoryCandidateStore>,
) {
    let rt = runtime.expect("runtime creation");
    let service = service(&store);
    let loaded = rt
        .block_on(store.load_snapshot(&SnapshotScope::All))
        .expect("load");

    let edited: Vec<EditedRow> = edited_copy(&loaded, 1, |row| row.with_form(FormKind::Mec, true))
        .into_iter()
        .map(|row| {
            if row.id == CandidateId::new(2) {
                row.with_form(FormKind::Gcic, false)
                    .with_recruiter_notes("waiting on GCIC re-upload")
            } else {
                row
            }
        })
        .collect();
    assert_eq!(diff_snapshot(&loaded, &edited).len(), 3);

    let report = rt.block_on(service.reconcile(&loaded, &edited));
    assert_eq!(report.changes_applied(), 3);

    let reloaded = rt
        .block_on(store.load_snapshot(&SnapshotScope::All))
        .expect("reload");
    let csv = export_csv(&reloaded);
    assert!(csv.contains("acme,Ada,Lovelace,,,Yes,Yes,7,"));
    assert!(csv.contains("acme,Grace,Hopper,,waiting on GCIC re-upload,No,Yes,9,"));
    assert_eq!(
        rt.block_on(service.reconcile(
            &reloaded,
            &reloaded.iter().map(EditedRow::from_record).collect::<Vec<_>>()
        ))
        .changes_applied(),
        0,
        "second submission of the same edits writes nothing"
    );
}

/// Re-uploading a form replaces its timestamp with a later one.
#[rstest]
fn form_reupload_restamps(runtime: io::Result<Runtime>, store: Arc<InMemoryCandidateStore>) {
    let rt = runtime.expect("runtime creation");
    let service = service(&store);
    let scope = SnapshotScope::Client(client("acme"));

    let cleared = rt
        .block_on(service.set_form(CandidateId::new(1), FormKind::Gcic, false, &scope))
        .expect("clear form");
    assert_eq!(find(&cleared, 1).forms().gcic.timestamp(), None);

    let restamped = rt
        .block_on(service.set_form(CandidateId::new(1), FormKind::Gcic, true, &scope))
        .expect("upload form");
    let stamp = find(&restamped, 1)
        .forms()
        .gcic
        .timestamp()
        .expect("upload is stamped");
    assert!(stamp > intake(1));
}

/// Status changes and reviews reload the caller's scope.
#[rstest]
fn status_and_review_reload_scope(
    runtime: io::Result<Runtime>,
    store: Arc<InMemoryCandidateStore>,
) {
    let rt = runtime.expect("runtime creation");
    let service = service(&store);
    store
        .raise_fadv_change(CandidateId::new(2), "Drug screen updated", intake(30))
        .expect("raise flag");

    let scheduled = rt
        .block_on(service.update_status(
            CandidateId::new(2),
            PipelineStatus::Scheduled,
            &SnapshotScope::All,
        ))
        .expect("status update");
    assert_eq!(find(&scheduled, 2).statuses().pipeline, PipelineStatus::Scheduled);
    assert!(find(&scheduled, 2).fadv().is_flagged());

    let reviewed = rt
        .block_on(service.mark_reviewed(CandidateId::new(2), &SnapshotScope::All))
        .expect("mark reviewed");
    assert!(!find(&reviewed, 2).fadv().is_flagged());
    assert_eq!(find(&reviewed, 2).statuses().pipeline, PipelineStatus::Scheduled);
}
