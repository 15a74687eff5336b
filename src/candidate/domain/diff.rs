//! Minimal diff between a loaded snapshot and a user-edited copy of it.

use super::{
    CandidateId, CandidateRecord, EditableField, FedexId, FieldUpdate, FormKind, FormUpload,
    normalize_text,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Editable columns of one row as submitted by the bulk editor.
///
/// Every column must be present. A missing column is a malformed row, never
/// an implicit "cleared" edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditedRow {
    /// Identity of the row being edited.
    pub id: CandidateId,
    /// Recruiter notes as submitted.
    pub recruiter_notes: String,
    /// Courier identifier as submitted; blank means none.
    pub fedex_id: String,
    /// GCIC checkbox.
    pub gcic_uploaded: bool,
    /// MEC checkbox.
    pub mec_uploaded: bool,
}

impl EditedRow {
    /// Returns the row exactly as the editor first shows it.
    #[must_use]
    pub fn from_record(record: &CandidateRecord) -> Self {
        Self {
            id: record.id(),
            recruiter_notes: record.recruiter_notes().to_owned(),
            fedex_id: record
                .fedex_id()
                .map(|fedex_id| fedex_id.as_str().to_owned())
                .unwrap_or_default(),
            gcic_uploaded: record.forms().gcic.is_uploaded(),
            mec_uploaded: record.forms().mec.is_uploaded(),
        }
    }

    /// Replaces the notes.
    #[must_use]
    pub fn with_recruiter_notes(mut self, notes: impl Into<String>) -> Self {
        self.recruiter_notes = notes.into();
        self
    }

    /// Replaces the courier identifier.
    #[must_use]
    pub fn with_fedex_id(mut self, fedex_id: impl Into<String>) -> Self {
        self.fedex_id = fedex_id.into();
        self
    }

    /// Sets one form checkbox.
    #[must_use]
    pub const fn with_form(mut self, kind: FormKind, uploaded: bool) -> Self {
        match kind {
            FormKind::Gcic => self.gcic_uploaded = uploaded,
            FormKind::Mec => self.mec_uploaded = uploaded,
        }
        self
    }

    const fn form(&self, kind: FormKind) -> bool {
        match kind {
            FormKind::Gcic => self.gcic_uploaded,
            FormKind::Mec => self.mec_uploaded,
        }
    }
}

/// Canonical value of an editable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Normalized text; the empty string means "no value".
    Text(String),
    /// Boolean checkbox state.
    Flag(bool),
}

impl FieldValue {
    fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Flag(_) => "",
        }
    }

    const fn flag(&self) -> bool {
        matches!(self, Self::Flag(true))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeTarget {
    RecruiterNotes,
    FedexId,
    Form(FormKind),
}

/// One field of one record whose edited value differs from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    id: CandidateId,
    target: ChangeTarget,
    old_value: FieldValue,
    new_value: FieldValue,
}

impl FieldChange {
    /// Returns the changed record.
    #[must_use]
    pub const fn id(&self) -> CandidateId {
        self.id
    }

    /// Returns the changed field.
    #[must_use]
    pub const fn field(&self) -> EditableField {
        match self.target {
            ChangeTarget::RecruiterNotes => EditableField::RecruiterNotes,
            ChangeTarget::FedexId => EditableField::FedexId,
            ChangeTarget::Form(kind) => EditableField::for_form(kind),
        }
    }

    /// Returns the snapshot value.
    #[must_use]
    pub const fn old_value(&self) -> &FieldValue {
        &self.old_value
    }

    /// Returns the submitted value.
    #[must_use]
    pub const fn new_value(&self) -> &FieldValue {
        &self.new_value
    }

    /// Builds the field-scoped write for this change.
    ///
    /// A form moving to uploaded is stamped with `now`; a form moving to
    /// missing loses its timestamp.
    #[must_use]
    pub fn to_update(&self, now: DateTime<Utc>) -> FieldUpdate {
        match self.target {
            ChangeTarget::RecruiterNotes => {
                FieldUpdate::RecruiterNotes(self.new_value.text().to_owned())
            }
            ChangeTarget::FedexId => FieldUpdate::FedexId(FedexId::parse(self.new_value.text())),
            ChangeTarget::Form(kind) => FieldUpdate::Form {
                kind,
                state: if self.new_value.flag() {
                    FormUpload::uploaded_at(now)
                } else {
                    FormUpload::missing()
                },
            },
        }
    }
}

/// Compares `edited` against `original` and returns every changed field.
///
/// Rows are matched by identity; edited rows for records absent from
/// `original` are ignored. Changes come out in snapshot order, and within a
/// record in the order notes, courier identifier, GCIC, MEC. Submitting the
/// snapshot unchanged yields no changes.
#[must_use]
pub fn diff_snapshot(original: &[CandidateRecord], edited: &[EditedRow]) -> Vec<FieldChange> {
    let base: Vec<EditedRow> = original.iter().map(EditedRow::from_record).collect();
    diff_rows(&base, edited)
}

/// Compares `edited` against the rows the editor started from.
///
/// `base` is the editor's view when it was handed out, not a fresh load, so
/// values other recruiters wrote since then are only overwritten where this
/// editor actually changed them. Matching and ordering follow
/// [`diff_snapshot`].
#[must_use]
pub fn diff_rows(base: &[EditedRow], edited: &[EditedRow]) -> Vec<FieldChange> {
    let mut edited_by_id: HashMap<CandidateId, &EditedRow> = HashMap::with_capacity(edited.len());
    for row in edited {
        edited_by_id.entry(row.id).or_insert(row);
    }

    let mut changes = Vec::new();
    for before in base {
        let Some(after) = edited_by_id.get(&before.id) else {
            continue;
        };
        diff_row(before, after, &mut changes);
    }
    changes
}

fn diff_row(before: &EditedRow, after: &EditedRow, changes: &mut Vec<FieldChange>) {
    let id = before.id;

    let old_notes = normalize_text(&before.recruiter_notes);
    let new_notes = normalize_text(&after.recruiter_notes);
    if old_notes != new_notes {
        changes.push(FieldChange {
            id,
            target: ChangeTarget::RecruiterNotes,
            old_value: FieldValue::Text(old_notes),
            new_value: FieldValue::Text(new_notes),
        });
    }

    let old_fedex = normalize_text(&before.fedex_id);
    let new_fedex = normalize_text(&after.fedex_id);
    if old_fedex != new_fedex {
        changes.push(FieldChange {
            id,
            target: ChangeTarget::FedexId,
            old_value: FieldValue::Text(old_fedex),
            new_value: FieldValue::Text(new_fedex),
        });
    }

    for kind in [FormKind::Gcic, FormKind::Mec] {
        let was_uploaded = before.form(kind);
        let now_uploaded = after.form(kind);
        if was_uploaded != now_uploaded {
            changes.push(FieldChange {
                id,
                target: ChangeTarget::Form(kind),
                old_value: FieldValue::Flag(was_uploaded),
                new_value: FieldValue::Flag(now_uploaded),
            });
        }
    }
}
