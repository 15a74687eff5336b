//! Diesel row model for candidate records and its normalization.

use super::schema::candidates;
use crate::candidate::{
    domain::{
        CandidateId, CandidateProfile, CandidateRecord, ClientId, FadvChange, FedexId, FormUpload,
        FormUploads, PersistedCandidateData, PipelineStatus, RwpAssessment, RwpScore, StatusToken,
        WorkflowStatuses, normalize_optional, normalize_text,
    },
    ports::{CandidateStoreError, CandidateStoreResult},
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for candidate records.
#[derive(Debug, Clone, Default, QueryableByName)]
#[diesel(table_name = candidates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CandidateRow {
    pub id: i64,
    pub client_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fedex_id: Option<String>,
    pub application_date: Option<String>,
    pub rwp_score: Option<f64>,
    pub rwp_classification: Option<String>,
    pub rwp_rationale: Option<String>,
    pub resume_notes: Option<String>,
    pub resume_filename: Option<String>,
    pub background_status: Option<String>,
    pub background_id: Option<String>,
    pub drug_test_status: Option<String>,
    pub drug_test_id: Option<String>,
    pub profile_status: Option<String>,
    pub legacy_order_status: Option<String>,
    pub status: Option<String>,
    pub recruiter_notes: Option<String>,
    pub gcic_uploaded: Option<i32>,
    pub gcic_upload_date: Option<DateTime<Utc>>,
    pub mec_uploaded: Option<i32>,
    pub mec_upload_date: Option<DateTime<Utc>>,
    pub fadv_change_flag: Option<i32>,
    pub fadv_change_details: Option<String>,
    pub fadv_last_updated: Option<DateTime<Utc>>,
    pub intake_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Converts a row into a record, coercing every absent value.
///
/// This is the only place where `NULL` handling happens: absent numbers and
/// bits become zero, absent text becomes empty, placeholder tokens are
/// removed, and an absent pipeline status reads as [`PipelineStatus::New`].
pub(crate) fn row_to_record(row: CandidateRow) -> CandidateStoreResult<CandidateRecord> {
    let client_id = ClientId::new(row.client_id).map_err(CandidateStoreError::persistence)?;
    let pipeline = parse_pipeline_status(row.status.as_deref())?;
    let text = |value: Option<String>| normalize_optional(value.as_deref());

    let data = PersistedCandidateData {
        id: CandidateId::new(row.id),
        client_id,
        profile: CandidateProfile {
            first_name: text(row.first_name),
            last_name: text(row.last_name),
            email: text(row.email),
            phone: text(row.phone),
        },
        fedex_id: row.fedex_id.as_deref().and_then(FedexId::parse),
        assessment: RwpAssessment {
            score: RwpScore::new(row.rwp_score.unwrap_or_default()),
            classification: text(row.rwp_classification),
            notes: text(row.resume_notes),
            rationale: text(row.rwp_rationale),
        },
        statuses: WorkflowStatuses {
            pipeline,
            profile: status_token(row.profile_status.as_deref()),
            background: status_token(row.background_status.as_deref()),
            background_id: text(row.background_id),
            drug_test: status_token(row.drug_test_status.as_deref()),
            drug_test_id: text(row.drug_test_id),
            order: status_token(row.legacy_order_status.as_deref()),
        },
        forms: FormUploads {
            gcic: FormUpload::from_persisted(is_set(row.gcic_uploaded), row.gcic_upload_date),
            mec: FormUpload::from_persisted(is_set(row.mec_uploaded), row.mec_upload_date),
        },
        fadv: FadvChange::from_persisted(
            is_set(row.fadv_change_flag),
            text(row.fadv_change_details),
            row.fadv_last_updated,
        ),
        recruiter_notes: text(row.recruiter_notes),
        application_date: text(row.application_date),
        resume_filename: text(row.resume_filename),
        intake_date: row.intake_date,
        created_at: row.created_at,
        updated_at: row.updated_at.unwrap_or(row.created_at),
    };
    Ok(CandidateRecord::from_persisted(data))
}

fn parse_pipeline_status(raw: Option<&str>) -> CandidateStoreResult<PipelineStatus> {
    let normalized = raw.map(normalize_text).unwrap_or_default();
    if normalized.is_empty() {
        return Ok(PipelineStatus::New);
    }
    PipelineStatus::try_from(normalized.as_str()).map_err(CandidateStoreError::persistence)
}

fn status_token(raw: Option<&str>) -> StatusToken {
    raw.map(StatusToken::new).unwrap_or_default()
}

const fn is_set(bit: Option<i32>) -> bool {
    matches!(bit, Some(value) if value != 0)
}
