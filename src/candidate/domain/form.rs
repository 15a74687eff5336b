//! Compliance form upload tracking (GCIC and MEC).

use super::CandidateDomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compliance forms tracked per candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// GCIC criminal history consent form ("G").
    Gcic,
    /// Medical examiner's certificate ("M").
    Mec,
}

impl FormKind {
    /// Returns the storage column prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gcic => "gcic",
            Self::Mec => "mec",
        }
    }

    /// Returns the one-letter label used in tables and exports.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Gcic => "G",
            Self::Mec => "M",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for FormKind {
    type Error = CandidateDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "gcic" | "g" => Ok(Self::Gcic),
            "mec" | "m" => Ok(Self::Mec),
            _ => Err(CandidateDomainError::UnknownFormKind(value.to_owned())),
        }
    }
}

/// Upload state of one compliance form.
///
/// The upload timestamp is present exactly when the form is uploaded, except
/// for legacy rows that were marked uploaded before timestamps were recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormUpload {
    uploaded: bool,
    uploaded_at: Option<DateTime<Utc>>,
}

impl FormUpload {
    /// Returns the state of a form that has not been uploaded.
    #[must_use]
    pub const fn missing() -> Self {
        Self {
            uploaded: false,
            uploaded_at: None,
        }
    }

    /// Returns the state of a form uploaded at `timestamp`.
    #[must_use]
    pub const fn uploaded_at(timestamp: DateTime<Utc>) -> Self {
        Self {
            uploaded: true,
            uploaded_at: Some(timestamp),
        }
    }

    /// Reconstructs persisted state. A timestamp without the bit is dropped.
    #[must_use]
    pub const fn from_persisted(uploaded: bool, uploaded_at: Option<DateTime<Utc>>) -> Self {
        if uploaded {
            Self {
                uploaded,
                uploaded_at,
            }
        } else {
            Self::missing()
        }
    }

    /// Returns the target state for a toggle to `uploaded` at `now`.
    ///
    /// Returns `None` when the form is already in the requested state.
    #[must_use]
    pub const fn toggled(self, uploaded: bool, now: DateTime<Utc>) -> Option<Self> {
        match (self.uploaded, uploaded) {
            (false, true) => Some(Self::uploaded_at(now)),
            (true, false) => Some(Self::missing()),
            _ => None,
        }
    }

    /// Returns `true` when the form has been uploaded.
    #[must_use]
    pub const fn is_uploaded(self) -> bool {
        self.uploaded
    }

    /// Returns the upload timestamp, if recorded.
    #[must_use]
    pub const fn timestamp(self) -> Option<DateTime<Utc>> {
        self.uploaded_at
    }
}

/// Upload state of both compliance forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormUploads {
    /// GCIC form state.
    pub gcic: FormUpload,
    /// MEC form state.
    pub mec: FormUpload,
}

impl FormUploads {
    /// Returns the state of one form.
    #[must_use]
    pub const fn get(&self, kind: FormKind) -> FormUpload {
        match kind {
            FormKind::Gcic => self.gcic,
            FormKind::Mec => self.mec,
        }
    }

    /// Replaces the state of one form.
    pub const fn set(&mut self, kind: FormKind, state: FormUpload) {
        match kind {
            FormKind::Gcic => self.gcic = state,
            FormKind::Mec => self.mec = state,
        }
    }

    /// Returns `true` when both forms are uploaded.
    #[must_use]
    pub const fn both_uploaded(&self) -> bool {
        self.gcic.is_uploaded() && self.mec.is_uploaded()
    }
}
