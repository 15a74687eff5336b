//! Candidate record aggregate and its value objects.

use super::{
    CandidateId, ClientId, FadvChange, FedexId, FieldUpdate, FormUploads, WorkflowStatuses,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Resume-quality score. Absent and non-finite scores read as zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RwpScore(f64);

impl RwpScore {
    /// Creates a score, mapping non-finite values to zero.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value)
        } else {
            Self(0.0)
        }
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns `true` when the candidate has actually been scored.
    #[must_use]
    pub fn is_scored(self) -> bool {
        self.0 > 0.0
    }
}

impl PartialEq for RwpScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RwpScore {}

impl PartialOrd for RwpScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RwpScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for RwpScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contact details captured at intake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
}

impl CandidateProfile {
    /// Creates a profile from name parts with empty contact details.
    #[must_use]
    pub fn named(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Returns `"first last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Output of the external resume scoring process. Read-only here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RwpAssessment {
    /// Numeric score.
    pub score: RwpScore,
    /// Textual classification.
    pub classification: String,
    /// Scorer notes shown to recruiters.
    pub notes: String,
    /// Scorer rationale shown to clients.
    pub rationale: String,
}

impl RwpAssessment {
    /// Creates an assessment with only a score.
    #[must_use]
    pub fn scored(score: f64) -> Self {
        Self {
            score: RwpScore::new(score),
            ..Self::default()
        }
    }
}

/// Candidate record as loaded into a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    id: CandidateId,
    client_id: ClientId,
    profile: CandidateProfile,
    fedex_id: Option<FedexId>,
    assessment: RwpAssessment,
    statuses: WorkflowStatuses,
    forms: FormUploads,
    fadv: FadvChange,
    recruiter_notes: String,
    application_date: String,
    resume_filename: String,
    intake_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted candidate record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCandidateData {
    /// Store-assigned identifier.
    pub id: CandidateId,
    /// Owning client.
    pub client_id: ClientId,
    /// Contact details.
    pub profile: CandidateProfile,
    /// Courier identifier, if assigned.
    pub fedex_id: Option<FedexId>,
    /// Resume scoring output.
    pub assessment: RwpAssessment,
    /// Pipeline and vendor statuses.
    pub statuses: WorkflowStatuses,
    /// Compliance form state.
    pub forms: FormUploads,
    /// Vendor change notification.
    pub fadv: FadvChange,
    /// Recruiter notes.
    pub recruiter_notes: String,
    /// Application date as reported by the intake source.
    pub application_date: String,
    /// Stored resume file name.
    pub resume_filename: String,
    /// Intake timestamp.
    pub intake_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CandidateRecord {
    /// Creates a freshly taken-in candidate with default statuses.
    #[must_use]
    pub fn new(
        id: CandidateId,
        client_id: ClientId,
        profile: CandidateProfile,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            client_id,
            profile,
            fedex_id: None,
            assessment: RwpAssessment::default(),
            statuses: WorkflowStatuses::default(),
            forms: FormUploads::default(),
            fadv: FadvChange::default(),
            recruiter_notes: String::new(),
            application_date: String::new(),
            resume_filename: String::new(),
            intake_date: Some(timestamp),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCandidateData) -> Self {
        Self {
            id: data.id,
            client_id: data.client_id,
            profile: data.profile,
            fedex_id: data.fedex_id,
            assessment: data.assessment,
            statuses: data.statuses,
            forms: data.forms,
            fadv: data.fadv,
            recruiter_notes: data.recruiter_notes,
            application_date: data.application_date,
            resume_filename: data.resume_filename,
            intake_date: data.intake_date,
            created_at: data.created_at,
            updated_at: data.updated_at.max(data.created_at),
        }
    }

    /// Sets the courier identifier.
    #[must_use]
    pub fn with_fedex_id(mut self, fedex_id: Option<FedexId>) -> Self {
        self.fedex_id = fedex_id;
        self
    }

    /// Sets the scoring output.
    #[must_use]
    pub fn with_assessment(mut self, assessment: RwpAssessment) -> Self {
        self.assessment = assessment;
        self
    }

    /// Sets pipeline and vendor statuses.
    #[must_use]
    pub fn with_statuses(mut self, statuses: WorkflowStatuses) -> Self {
        self.statuses = statuses;
        self
    }

    /// Sets compliance form state.
    #[must_use]
    pub const fn with_forms(mut self, forms: FormUploads) -> Self {
        self.forms = forms;
        self
    }

    /// Sets the vendor change notification.
    #[must_use]
    pub fn with_fadv(mut self, fadv: FadvChange) -> Self {
        self.fadv = fadv;
        self
    }

    /// Sets recruiter notes.
    #[must_use]
    pub fn with_recruiter_notes(mut self, notes: impl Into<String>) -> Self {
        self.recruiter_notes = notes.into();
        self
    }

    /// Sets the application date reported by the intake source.
    #[must_use]
    pub fn with_application_date(mut self, date: impl Into<String>) -> Self {
        self.application_date = date.into();
        self
    }

    /// Sets the intake timestamp.
    #[must_use]
    pub const fn with_intake_date(mut self, intake_date: Option<DateTime<Utc>>) -> Self {
        self.intake_date = intake_date;
        self
    }

    /// Sets the creation timestamp, keeping `updated_at` no earlier.
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = self.updated_at.max(created_at);
        self
    }

    /// Returns the candidate identifier.
    #[must_use]
    pub const fn id(&self) -> CandidateId {
        self.id
    }

    /// Returns the owning client.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns contact details.
    #[must_use]
    pub const fn profile(&self) -> &CandidateProfile {
        &self.profile
    }

    /// Returns the courier identifier, if assigned.
    #[must_use]
    pub const fn fedex_id(&self) -> Option<&FedexId> {
        self.fedex_id.as_ref()
    }

    /// Returns the scoring output.
    #[must_use]
    pub const fn assessment(&self) -> &RwpAssessment {
        &self.assessment
    }

    /// Returns pipeline and vendor statuses.
    #[must_use]
    pub const fn statuses(&self) -> &WorkflowStatuses {
        &self.statuses
    }

    /// Returns compliance form state.
    #[must_use]
    pub const fn forms(&self) -> &FormUploads {
        &self.forms
    }

    /// Returns the vendor change notification.
    #[must_use]
    pub const fn fadv(&self) -> &FadvChange {
        &self.fadv
    }

    /// Returns recruiter notes.
    #[must_use]
    pub fn recruiter_notes(&self) -> &str {
        &self.recruiter_notes
    }

    /// Returns the application date reported by the intake source.
    #[must_use]
    pub fn application_date(&self) -> &str {
        &self.application_date
    }

    /// Returns the stored resume file name.
    #[must_use]
    pub fn resume_filename(&self) -> &str {
        &self.resume_filename
    }

    /// Returns the intake timestamp.
    #[must_use]
    pub const fn intake_date(&self) -> Option<DateTime<Utc>> {
        self.intake_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a field-scoped update and stamps `updated_at`.
    ///
    /// Writing notes also clears the vendor change flag.
    pub fn apply(&mut self, update: &FieldUpdate, at: DateTime<Utc>) {
        match update {
            FieldUpdate::RecruiterNotes(notes) => {
                notes.clone_into(&mut self.recruiter_notes);
                self.fadv.clear();
            }
            FieldUpdate::FedexId(fedex_id) => self.fedex_id.clone_from(fedex_id),
            FieldUpdate::Form { kind, state } => self.forms.set(*kind, *state),
            FieldUpdate::PipelineStatus(status) => self.statuses.pipeline = *status,
            FieldUpdate::MarkReviewed => self.fadv.clear(),
        }
        self.touch(at);
    }

    /// Records a vendor-reported change.
    pub fn raise_fadv_change(&mut self, details: impl Into<String>, at: DateTime<Utc>) {
        self.fadv = FadvChange::raised(details, at);
        self.touch(at);
    }

    /// Advances `updated_at` without ever moving it backwards.
    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = self.updated_at.max(at);
    }
}
