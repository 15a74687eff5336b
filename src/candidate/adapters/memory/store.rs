//! In-memory candidate store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::candidate::{
    domain::{CandidateId, CandidateRecord, FieldUpdate, SnapshotScope},
    ports::{CandidateStore, CandidateStoreError, CandidateStoreResult},
};

/// Thread-safe in-memory candidate store.
///
/// Records are inserted directly, standing in for the external intake
/// process. The store can be switched offline to exercise the
/// store-unavailable path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCandidateStore {
    state: Arc<RwLock<InMemoryCandidateState>>,
}

#[derive(Debug, Default)]
struct InMemoryCandidateState {
    records: BTreeMap<CandidateId, CandidateRecord>,
    offline: bool,
}

impl InMemoryCandidateStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record as the intake process would.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateStoreError::DuplicateCandidate`] when the identifier
    /// is already taken.
    pub fn insert(&self, record: CandidateRecord) -> CandidateStoreResult<()> {
        let mut state = self.write_state()?;
        if state.records.contains_key(&record.id()) {
            return Err(CandidateStoreError::DuplicateCandidate(record.id()));
        }
        state.records.insert(record.id(), record);
        Ok(())
    }

    /// Records a vendor-reported change as the external watcher would.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateStoreError::NotFound`] when the record does not
    /// exist.
    pub fn raise_fadv_change(
        &self,
        id: CandidateId,
        details: &str,
        reported_at: DateTime<Utc>,
    ) -> CandidateStoreResult<()> {
        let mut state = self.write_state()?;
        let record = state
            .records
            .get_mut(&id)
            .ok_or(CandidateStoreError::NotFound(id))?;
        record.raise_fadv_change(details, reported_at);
        Ok(())
    }

    /// Takes the store offline or brings it back.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateStoreError::Persistence`] when the lock is poisoned.
    pub fn set_offline(&self, offline: bool) -> CandidateStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| CandidateStoreError::persistence(io::Error::other(err.to_string())))?;
        state.offline = offline;
        Ok(())
    }

    fn read_state(&self) -> CandidateStoreResult<RwLockReadGuard<'_, InMemoryCandidateState>> {
        let state = self
            .state
            .read()
            .map_err(|err| CandidateStoreError::persistence(io::Error::other(err.to_string())))?;
        ensure_online(&state)?;
        Ok(state)
    }

    fn write_state(&self) -> CandidateStoreResult<RwLockWriteGuard<'_, InMemoryCandidateState>> {
        let state = self
            .state
            .write()
            .map_err(|err| CandidateStoreError::persistence(io::Error::other(err.to_string())))?;
        ensure_online(&state)?;
        Ok(state)
    }
}

fn ensure_online(state: &InMemoryCandidateState) -> CandidateStoreResult<()> {
    if state.offline {
        return Err(CandidateStoreError::unavailable(io::Error::new(
            io::ErrorKind::NotConnected,
            "in-memory candidate store is offline",
        )));
    }
    Ok(())
}

#[async_trait]
impl CandidateStore for InMemoryCandidateStore {
    async fn load_snapshot(
        &self,
        scope: &SnapshotScope,
    ) -> CandidateStoreResult<Vec<CandidateRecord>> {
        let state = self.read_state()?;
        let mut records: Vec<CandidateRecord> = state
            .records
            .values()
            .filter(|record| scope.contains(record))
            .cloned()
            .collect();
        scope.sort(&mut records);
        Ok(records)
    }

    async fn find_by_id(&self, id: CandidateId) -> CandidateStoreResult<Option<CandidateRecord>> {
        let state = self.read_state()?;
        Ok(state.records.get(&id).cloned())
    }

    async fn apply_field_update(
        &self,
        id: CandidateId,
        update: &FieldUpdate,
        stamped_at: DateTime<Utc>,
    ) -> CandidateStoreResult<()> {
        let mut state = self.write_state()?;
        let record = state
            .records
            .get_mut(&id)
            .ok_or(CandidateStoreError::NotFound(id))?;
        record.apply(update, stamped_at);
        Ok(())
    }
}
