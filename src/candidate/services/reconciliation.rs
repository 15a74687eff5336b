//! Service layer applying recruiter edits to the candidate store.

use crate::candidate::{
    domain::{
        CandidateId, CandidateRecord, EditableField, EditedRow, FieldChange, FieldUpdate,
        FormKind, PipelineStatus, SnapshotScope, diff_rows, diff_snapshot, normalize_text,
    },
    ports::{CandidateStore, CandidateStoreError, CandidateStoreResult},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// A single field-scoped write that the store rejected.
#[derive(Debug, Clone, Error)]
#[error("failed to write {field} for candidate {id}: {source}")]
pub struct FieldWriteError {
    /// Record whose write failed.
    pub id: CandidateId,
    /// Field whose write failed.
    pub field: EditableField,
    /// Store failure.
    pub source: CandidateStoreError,
}

/// Outcome of one reconciliation pass.
///
/// Earlier successful writes are never rolled back when a later one fails.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationReport {
    /// Changes the store accepted, in the order they were written.
    pub applied: Vec<FieldChange>,
    /// Writes the store rejected.
    pub failed: Vec<FieldWriteError>,
}

impl ReconciliationReport {
    /// Number of changes written.
    #[must_use]
    pub const fn changes_applied(&self) -> usize {
        self.applied.len()
    }

    /// Returns `true` when nothing needed writing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.applied.is_empty() && self.failed.is_empty()
    }

    /// Returns `true` when every attempted write succeeded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Reconciliation and immediate-write orchestration service.
#[derive(Clone)]
pub struct ReconciliationService<S, C>
where
    S: CandidateStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> ReconciliationService<S, C>
where
    S: CandidateStore,
    C: Clock + Send + Sync,
{
    /// Creates a new reconciliation service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Diffs `edited` against `original` and writes each change on its own.
    ///
    /// Every change is attempted exactly once regardless of earlier
    /// failures; failures are collected in the report rather than returned.
    pub async fn reconcile(
        &self,
        original: &[CandidateRecord],
        edited: &[EditedRow],
    ) -> ReconciliationReport {
        self.apply_changes(diff_snapshot(original, edited)).await
    }

    /// Diffs `edited` against the rows the editor was handed and writes each
    /// change on its own.
    ///
    /// Fields the editor left as handed out are never written, even when the
    /// store has moved on since.
    pub async fn reconcile_rows(
        &self,
        base: &[EditedRow],
        edited: &[EditedRow],
    ) -> ReconciliationReport {
        self.apply_changes(diff_rows(base, edited)).await
    }

    async fn apply_changes(&self, changes: Vec<FieldChange>) -> ReconciliationReport {
        let mut report = ReconciliationReport::default();
        for change in changes {
            let now = self.clock.utc();
            let update = change.to_update(now);
            match self.store.apply_field_update(change.id(), &update, now).await {
                Ok(()) => {
                    info!(
                        candidate_id = %change.id(),
                        field = %change.field(),
                        "applied edited field"
                    );
                    report.applied.push(change);
                }
                Err(source) => {
                    warn!(
                        candidate_id = %change.id(),
                        field = %change.field(),
                        error = %source,
                        "field write failed"
                    );
                    report.failed.push(FieldWriteError {
                        id: change.id(),
                        field: change.field(),
                        source,
                    });
                }
            }
        }
        report
    }

    /// Clears the vendor change flag without touching notes, then reloads.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateStoreError`] when the write or the reload fails.
    pub async fn mark_reviewed(
        &self,
        id: CandidateId,
        scope: &SnapshotScope,
    ) -> CandidateStoreResult<Vec<CandidateRecord>> {
        self.write_and_reload(id, FieldUpdate::MarkReviewed, scope)
            .await
    }

    /// Sets the pipeline status, then reloads.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateStoreError`] when the write or the reload fails.
    pub async fn update_status(
        &self,
        id: CandidateId,
        status: PipelineStatus,
        scope: &SnapshotScope,
    ) -> CandidateStoreResult<Vec<CandidateRecord>> {
        self.write_and_reload(id, FieldUpdate::PipelineStatus(status), scope)
            .await
    }

    /// Saves notes from the detail view, clearing the vendor change flag,
    /// then reloads.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateStoreError`] when the write or the reload fails.
    pub async fn save_notes(
        &self,
        id: CandidateId,
        notes: &str,
        scope: &SnapshotScope,
    ) -> CandidateStoreResult<Vec<CandidateRecord>> {
        self.write_and_reload(id, FieldUpdate::RecruiterNotes(normalize_text(notes)), scope)
            .await
    }

    /// Toggles one compliance form, then reloads.
    ///
    /// Requesting the state the form is already in writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateStoreError::NotFound`] when the record does not
    /// exist, or another [`CandidateStoreError`] when the write or the
    /// reload fails.
    pub async fn set_form(
        &self,
        id: CandidateId,
        kind: FormKind,
        uploaded: bool,
        scope: &SnapshotScope,
    ) -> CandidateStoreResult<Vec<CandidateRecord>> {
        let record = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CandidateStoreError::NotFound(id))?;

        let now = self.clock.utc();
        match record.forms().get(kind).toggled(uploaded, now) {
            Some(state) => {
                self.write_and_reload(id, FieldUpdate::Form { kind, state }, scope)
                    .await
            }
            None => self.store.load_snapshot(scope).await,
        }
    }

    async fn write_and_reload(
        &self,
        id: CandidateId,
        update: FieldUpdate,
        scope: &SnapshotScope,
    ) -> CandidateStoreResult<Vec<CandidateRecord>> {
        let now = self.clock.utc();
        self.store.apply_field_update(id, &update, now).await?;
        info!(candidate_id = %id, field = %update.field(), "applied immediate write");
        self.store.load_snapshot(scope).await
    }
}
