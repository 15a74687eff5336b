//! Domain model for candidate records.
//!
//! Everything in this module is pure: snapshots go in, filtered subsets,
//! change sets, and summaries come out. Persistence and clocks stay outside
//! the domain boundary except where a timestamp is passed in explicitly.

mod client;
mod diff;
mod error;
mod export;
mod fadv;
mod filter;
mod form;
mod ids;
mod record;
mod scope;
mod stats;
mod status;
mod text;
mod update;

pub use client::ClientProfile;
pub use diff::{EditedRow, FieldChange, FieldValue, diff_rows, diff_snapshot};
pub use error::{CandidateDomainError, ParsePipelineStatusError};
pub use export::{EXPORT_HEADERS, export_csv, export_file_name};
pub use fadv::FadvChange;
pub use filter::{
    CandidateFilter, FilterOptions, FormCompletion, FormToggles, ScoreRange, filter_options,
};
pub use form::{FormKind, FormUpload, FormUploads};
pub use ids::{CandidateId, ClientId, FedexId};
pub use record::{
    CandidateProfile, CandidateRecord, PersistedCandidateData, RwpAssessment, RwpScore,
};
pub use scope::SnapshotScope;
pub use stats::{
    ClientSummary, RecruiterSummary, average_score, background_breakdown, client_breakdown,
    count_status_matching, flagged, form_uploaded, format_average, forms_complete, frequency_by,
    score_distribution,
};
pub use status::{PipelineStatus, StatusField, StatusToken, WorkflowStatuses};
pub use text::normalize_text;
pub(crate) use text::normalize_optional;
pub use update::{EditableField, FieldUpdate};
