//! Recruiter and client dashboards sharing one store.

use crate::in_memory::helpers::{client, ids, registry, runtime, store};
use mockable::DefaultClock;
use peakats::candidate::{
    adapters::memory::{InMemoryCandidateStore, InMemoryClientRegistry},
    domain::{
        CandidateFilter, CandidateId, ScoreRange, SnapshotScope, StatusField, StatusToken,
        format_average,
    },
    ports::CandidateStoreError,
    services::{
        ClientDashboard, ClientView, DashboardError, RecruiterDashboard, ReconciliationService,
        ViewState,
    },
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Selector options narrow the recruiter view to one client's top scorers.
#[rstest]
fn recruiter_filters_from_offered_options(
    runtime: io::Result<Runtime>,
    store: Arc<InMemoryCandidateStore>,
) {
    let rt = runtime.expect("runtime creation");
    let dashboard = RecruiterDashboard::new(store);

    let initial = rt.block_on(dashboard.render(&CandidateFilter::new(), ViewState::default()));
    assert_eq!(initial.options.clients, vec![client("acme"), client("initech")]);
    assert_eq!(
        initial.options.statuses(StatusField::Background),
        &[StatusToken::new("Clear")]
    );
    assert_eq!(format_average(initial.summary.average_score), "8.0");

    let filter = CandidateFilter::new()
        .with_client(client("acme"))
        .with_score_range(ScoreRange::new(8.0, 10.0).expect("valid range"));
    let narrowed = rt.block_on(dashboard.render(&filter, initial.state));
    assert_eq!(ids(&narrowed.visible), vec![2]);
    assert_eq!(narrowed.summary.total, 3);
    assert_eq!(narrowed.summary.showing, 1);
}

/// The client view only ever shows its own client's records.
#[rstest]
fn client_view_is_scoped_and_summarised(
    runtime: io::Result<Runtime>,
    store: Arc<InMemoryCandidateStore>,
    registry: Arc<InMemoryClientRegistry>,
) {
    let rt = runtime.expect("runtime creation");
    let dashboard = ClientDashboard::new(store, registry);

    let report = rt
        .block_on(dashboard.open(
            Some("acme"),
            &CandidateFilter::new().with_client(client("initech")),
        ))
        .into_report()
        .expect("acme is registered");

    assert_eq!(report.title, "Acme Freight");
    assert_eq!(ids(&report.visible), vec![2, 1]);
    assert_eq!(report.summary.background_cleared, 1);
    assert_eq!(report.summary.drug_passed, 1);
    assert_eq!(report.summary.forms_complete, 1);
}

/// Unknown and missing clients never reach the record store.
#[rstest]
fn unresolved_clients_are_rejected(
    runtime: io::Result<Runtime>,
    store: Arc<InMemoryCandidateStore>,
    registry: Arc<InMemoryClientRegistry>,
) {
    let rt = runtime.expect("runtime creation");
    store.set_offline(true).expect("take store offline");
    let dashboard = ClientDashboard::new(store, registry);

    let unknown = rt.block_on(dashboard.open(Some("globex"), &CandidateFilter::new()));
    assert_eq!(
        unknown.into_report().err(),
        Some(DashboardError::UnknownClient("globex".to_owned()))
    );

    let missing = rt.block_on(dashboard.open(None, &CandidateFilter::new()));
    let ClientView::Missing { available } = missing else {
        panic!("expected missing client view");
    };
    let labels: Vec<&str> = available.iter().map(|(_, label)| label.as_str()).collect();
    assert_eq!(labels, vec!["Acme Freight", "Initech"]);
}

/// An offline store renders an empty client view with a notice.
#[rstest]
fn offline_store_renders_empty_client_view(
    runtime: io::Result<Runtime>,
    store: Arc<InMemoryCandidateStore>,
    registry: Arc<InMemoryClientRegistry>,
) {
    let rt = runtime.expect("runtime creation");
    store.set_offline(true).expect("take store offline");
    let dashboard = ClientDashboard::new(store, registry);

    let report = rt
        .block_on(dashboard.open(Some("initech"), &CandidateFilter::new()))
        .into_report()
        .expect("initech is registered");

    assert_eq!(report.title, "Initech");
    assert!(report.snapshot.is_empty());
    assert_eq!(report.summary.total, 0);
    assert!(matches!(
        report.unavailable,
        Some(CandidateStoreError::Unavailable(_))
    ));
}

/// Recruiter writes are visible to the client view on its next load.
#[rstest]
fn recruiter_notes_reach_client_view(
    runtime: io::Result<Runtime>,
    store: Arc<InMemoryCandidateStore>,
    registry: Arc<InMemoryClientRegistry>,
) {
    let rt = runtime.expect("runtime creation");
    let service = ReconciliationService::new(Arc::clone(&store), Arc::new(DefaultClock));
    let dashboard = ClientDashboard::new(store, registry);

    rt.block_on(service.save_notes(
        CandidateId::new(1),
        "Orientation booked",
        &SnapshotScope::All,
    ))
    .expect("save notes");

    let report = rt
        .block_on(dashboard.open(Some("acme"), &CandidateFilter::new().with_search("ada")))
        .into_report()
        .expect("acme is registered");
    assert_eq!(ids(&report.visible), vec![1]);
    let ada = report.visible.first().expect("one visible record");
    assert_eq!(ada.recruiter_notes(), "Orientation booked");
}
