//! Field-scoped updates accepted by the record store.

use super::{FedexId, FormKind, FormUpload, PipelineStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields a recruiter can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditableField {
    /// Recruiter notes.
    RecruiterNotes,
    /// Courier identifier.
    FedexId,
    /// GCIC upload bit.
    GcicUploaded,
    /// MEC upload bit.
    MecUploaded,
    /// Recruiting pipeline status.
    PipelineStatus,
    /// Vendor change flag.
    FadvChangeFlag,
}

impl EditableField {
    /// Returns the storage column name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RecruiterNotes => "recruiter_notes",
            Self::FedexId => "fedex_id",
            Self::GcicUploaded => "gcic_uploaded",
            Self::MecUploaded => "mec_uploaded",
            Self::PipelineStatus => "status",
            Self::FadvChangeFlag => "fadv_change_flag",
        }
    }

    /// Returns the upload-bit field for a form.
    #[must_use]
    pub const fn for_form(kind: FormKind) -> Self {
        match kind {
            FormKind::Gcic => Self::GcicUploaded,
            FormKind::Mec => Self::MecUploaded,
        }
    }
}

impl fmt::Display for EditableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-row, single-field write.
///
/// Every variant also stamps `updated_at`. Writing notes additionally clears
/// the vendor change flag in the same statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Replace recruiter notes and clear the vendor change flag.
    RecruiterNotes(String),
    /// Replace or clear the courier identifier.
    FedexId(Option<FedexId>),
    /// Replace the upload state of a form, including its timestamp.
    Form {
        /// Form being updated.
        kind: FormKind,
        /// New upload state.
        state: FormUpload,
    },
    /// Move the candidate to another pipeline status.
    PipelineStatus(PipelineStatus),
    /// Clear the vendor change flag without touching notes.
    MarkReviewed,
}

impl FieldUpdate {
    /// Returns the field this update targets.
    #[must_use]
    pub const fn field(&self) -> EditableField {
        match self {
            Self::RecruiterNotes(_) => EditableField::RecruiterNotes,
            Self::FedexId(_) => EditableField::FedexId,
            Self::Form { kind, .. } => EditableField::for_form(*kind),
            Self::PipelineStatus(_) => EditableField::PipelineStatus,
            Self::MarkReviewed => EditableField::FadvChangeFlag,
        }
    }
}
