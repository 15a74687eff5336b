//! Shared fixtures for in-memory integration tests.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use mockable::DefaultClock;
use peakats::candidate::{
    adapters::memory::{InMemoryCandidateStore, InMemoryClientRegistry},
    domain::{
        CandidateId, CandidateProfile, CandidateRecord, ClientId, ClientProfile, FormUpload,
        FormUploads, RwpAssessment, StatusToken, WorkflowStatuses,
    },
};
use rstest::fixture;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Fixed intake instant offset by `minutes`.
///
/// # Panics
///
/// Panics if the base date is invalid.
pub fn intake(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0)
        .single()
        .expect("valid base timestamp")
        + TimeDelta::minutes(minutes)
}

/// Parses a client identifier.
///
/// # Panics
///
/// Panics if `raw` is blank.
pub fn client(raw: &str) -> ClientId {
    ClientId::new(raw).expect("valid client id")
}

fn applicant(id: i64, client_id: &str, first: &str, last: &str, score: f64) -> CandidateRecord {
    CandidateRecord::new(
        CandidateId::new(id),
        client(client_id),
        CandidateProfile::named(first, last),
        &DefaultClock,
    )
    .with_created_at(intake(id))
    .with_intake_date(Some(intake(id)))
    .with_assessment(RwpAssessment::scored(score))
}

/// Three applicants across two clients.
///
/// | id | client  | name           | score | forms |
/// |----|---------|----------------|-------|-------|
/// | 1  | acme    | Ada Lovelace   | 7     | G     |
/// | 2  | acme    | Grace Hopper   | 9     | G M   |
/// | 3  | initech | Alan Turing    | 0     | -     |
pub fn applicants() -> Vec<CandidateRecord> {
    vec![
        applicant(1, "acme", "Ada", "Lovelace", 7.0).with_forms(FormUploads {
            gcic: FormUpload::uploaded_at(intake(1)),
            mec: FormUpload::missing(),
        }),
        applicant(2, "acme", "Grace", "Hopper", 9.0)
            .with_forms(FormUploads {
                gcic: FormUpload::uploaded_at(intake(2)),
                mec: FormUpload::uploaded_at(intake(2)),
            })
            .with_statuses(WorkflowStatuses {
                background: StatusToken::new("Clear"),
                drug_test: StatusToken::new("Negative"),
                ..WorkflowStatuses::default()
            }),
        applicant(3, "initech", "Alan", "Turing", 0.0),
    ]
}

/// Provides a store holding [`applicants`].
///
/// # Panics
///
/// Panics if seeding fails.
#[fixture]
pub fn store() -> Arc<InMemoryCandidateStore> {
    let store = InMemoryCandidateStore::new();
    for record in applicants() {
        store.insert(record).expect("seed applicant");
    }
    Arc::new(store)
}

/// Provides a registry that knows `acme` and `initech`.
#[fixture]
pub fn registry() -> Arc<InMemoryClientRegistry> {
    Arc::new(
        InMemoryClientRegistry::new()
            .with_client(client("acme"), ClientProfile::displayed_as("Acme Freight"))
            .with_client(
                client("initech"),
                ClientProfile {
                    name: Some("Initech".to_owned()),
                    ..ClientProfile::default()
                },
            ),
    )
}

/// Returns the record with `id`.
///
/// # Panics
///
/// Panics if no such record is present.
pub fn find(records: &[CandidateRecord], id: i64) -> &CandidateRecord {
    records
        .iter()
        .find(|record| record.id() == CandidateId::new(id))
        .expect("record present")
}

/// Returns the raw identifiers of `records` in order.
pub fn ids(records: &[CandidateRecord]) -> Vec<i64> {
    records.iter().map(|record| record.id().value()).collect()
}
