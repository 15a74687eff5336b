//! Screening vendor change notification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Change notification raised when the screening vendor reports an update.
///
/// The flag is raised by an external process and cleared by a recruiter,
/// either explicitly or by editing the candidate's notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FadvChange {
    flagged: bool,
    details: String,
    last_updated: Option<DateTime<Utc>>,
}

impl FadvChange {
    /// Reconstructs persisted notification state.
    #[must_use]
    pub const fn from_persisted(
        flagged: bool,
        details: String,
        last_updated: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            flagged,
            details,
            last_updated,
        }
    }

    /// Returns a raised notification with the vendor's description.
    #[must_use]
    pub fn raised(details: impl Into<String>, reported_at: DateTime<Utc>) -> Self {
        Self {
            flagged: true,
            details: details.into(),
            last_updated: Some(reported_at),
        }
    }

    /// Returns `true` while the change is awaiting review.
    #[must_use]
    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Returns the vendor's description of the change.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Returns when the vendor last reported a change.
    #[must_use]
    pub const fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Marks the change as reviewed. Details are kept for reference.
    pub const fn clear(&mut self) {
        self.flagged = false;
    }
}
