//! Status vocabulary for candidate records.
//!
//! The recruiting pipeline status is a closed set. The vendor-reported
//! statuses (profile, background, drug test, legacy order) are open strings
//! today and are funnelled through [`StatusToken`] so that a future
//! migration to enumerations only has to touch this file.

use super::{ParsePipelineStatusError, normalize_text};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recruiting pipeline status.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    /// Candidate has not been contacted yet.
    #[default]
    New,
    /// Recruiter has reached out.
    Contacted,
    /// Start date or interview is scheduled.
    Scheduled,
    /// Candidate was hired.
    Hired,
    /// Candidate was rejected.
    Rejected,
}

impl PipelineStatus {
    /// Every status in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::Contacted,
        Self::Scheduled,
        Self::Hired,
        Self::Rejected,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Scheduled => "scheduled",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PipelineStatus {
    type Error = ParsePipelineStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "scheduled" => Ok(Self::Scheduled),
            "hired" => Ok(Self::Hired),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParsePipelineStatusError(value.to_owned())),
        }
    }
}

/// Free-text status token reported by the screening vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusToken(String);

impl StatusToken {
    /// Creates a normalized status token. Placeholders become the unset token.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(normalize_text(value))
    }

    /// Returns the token as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the vendor has not reported a status.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when the token contains any needle, ignoring case.
    #[must_use]
    pub fn contains_any(&self, needles: &[&str]) -> bool {
        let haystack = self.0.to_lowercase();
        needles
            .iter()
            .any(|needle| haystack.contains(&needle.to_lowercase()))
    }
}

impl fmt::Display for StatusToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vendor-reported status fields that can be filtered and aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusField {
    /// Candidate profile completion.
    Profile,
    /// Background check.
    Background,
    /// Drug screen.
    DrugTest,
    /// Legacy order status.
    Order,
}

impl StatusField {
    /// Returns the storage column name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile_status",
            Self::Background => "background_status",
            Self::DrugTest => "drug_test_status",
            Self::Order => "order_status",
        }
    }
}

/// Pipeline and vendor statuses carried by one candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStatuses {
    /// Recruiting pipeline status.
    pub pipeline: PipelineStatus,
    /// Profile completion status.
    pub profile: StatusToken,
    /// Background check status.
    pub background: StatusToken,
    /// Vendor order identifier for the background check.
    pub background_id: String,
    /// Drug screen status.
    pub drug_test: StatusToken,
    /// Vendor order identifier for the drug screen.
    pub drug_test_id: String,
    /// Legacy order status.
    pub order: StatusToken,
}

impl WorkflowStatuses {
    /// Returns the token held for a vendor status field.
    #[must_use]
    pub const fn get(&self, field: StatusField) -> &StatusToken {
        match field {
            StatusField::Profile => &self.profile,
            StatusField::Background => &self.background,
            StatusField::DrugTest => &self.drug_test,
            StatusField::Order => &self.order,
        }
    }
}
