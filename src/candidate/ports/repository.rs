//! Store port for loading snapshots and applying field-scoped writes.

use crate::candidate::domain::{CandidateId, CandidateRecord, FieldUpdate, SnapshotScope};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for candidate store operations.
pub type CandidateStoreResult<T> = Result<T, CandidateStoreError>;

/// Candidate persistence contract.
///
/// Implementations normalize every persisted value before it leaves the
/// adapter: absent numbers and booleans read as zero, absent text reads as
/// the empty string, and placeholder tokens are removed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Loads every record in `scope`, in the scope's presentation order.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateStoreError::Unavailable`] when the store cannot be
    /// reached.
    async fn load_snapshot(&self, scope: &SnapshotScope)
    -> CandidateStoreResult<Vec<CandidateRecord>>;

    /// Finds one record by identifier.
    ///
    /// Returns `None` when the record does not exist.
    async fn find_by_id(&self, id: CandidateId) -> CandidateStoreResult<Option<CandidateRecord>>;

    /// Writes exactly the field named by `update`, plus `updated_at`, as one
    /// atomic single-row operation.
    ///
    /// `updated_at` becomes the later of its current value and `stamped_at`.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateStoreError::NotFound`] when the record does not
    /// exist; no other field is touched on failure.
    async fn apply_field_update(
        &self,
        id: CandidateId,
        update: &FieldUpdate,
        stamped_at: DateTime<Utc>,
    ) -> CandidateStoreResult<()>;
}

/// Errors returned by candidate store implementations.
#[derive(Debug, Clone, Error)]
pub enum CandidateStoreError {
    /// The record was not found.
    #[error("candidate not found: {0}")]
    NotFound(CandidateId),

    /// A record with the same identifier already exists.
    #[error("duplicate candidate identifier: {0}")]
    DuplicateCandidate(CandidateId),

    /// The store could not be reached.
    #[error("candidate store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CandidateStoreError {
    /// Wraps a connectivity failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
