//! `PostgreSQL` store implementation for candidate records.

use super::models::{CandidateRow, row_to_record};
use crate::candidate::{
    domain::{CandidateId, CandidateRecord, FedexId, FieldUpdate, FormKind, SnapshotScope},
    ports::{CandidateStore, CandidateStoreError, CandidateStoreResult},
};
use crate::config::{ConfigurationError, StoreConfig};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{BigInt, Integer, Nullable, Text, Timestamptz};
use tracing::debug;

/// `PostgreSQL` connection pool type used by candidate adapters.
pub type CandidatePgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a lazily-connecting pool from store configuration.
///
/// No connection is attempted here; an unreachable server surfaces as
/// [`CandidateStoreError::Unavailable`] on first use.
///
/// # Errors
///
/// Returns [`ConfigurationError::MissingDatabaseUrl`] when no connection
/// string is configured.
pub fn build_pool(config: &StoreConfig) -> Result<CandidatePgPool, ConfigurationError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url()?);
    Ok(Pool::builder()
        .max_size(config.pool_size())
        .connection_timeout(config.connect_timeout())
        .build_unchecked(manager))
}

/// Expands to a `SELECT` over every candidate column followed by `$tail`.
macro_rules! select_candidates {
    ($tail:literal) => {
        concat!(
            "SELECT id, client_id, first_name, last_name, email, phone, fedex_id, ",
            "application_date, rwp_score, rwp_classification, rwp_rationale, resume_notes, ",
            "resume_filename, background_status, background_id, drug_test_status, ",
            "drug_test_id, profile_status, legacy_order_status, status, recruiter_notes, ",
            "gcic_uploaded, gcic_upload_date, mec_uploaded, mec_upload_date, ",
            "fadv_change_flag, fadv_change_details, fadv_last_updated, intake_date, ",
            "created_at, updated_at FROM candidates ",
            $tail
        )
    };
}

/// Expands to a single-row `UPDATE` that sets `$assignments` and stamps
/// `updated_at`. `$1` is the stamp, `$2` the record id, and field values
/// start at `$3`.
macro_rules! update_candidate {
    ($assignments:literal) => {
        concat!(
            "UPDATE candidates SET ",
            $assignments,
            ", updated_at = GREATEST(COALESCE(updated_at, $1), $1) WHERE id = $2"
        )
    };
}

/// `PostgreSQL`-backed candidate store.
#[derive(Debug, Clone)]
pub struct PostgresCandidateStore {
    pool: CandidatePgPool,
}

impl PostgresCandidateStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CandidatePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CandidateStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CandidateStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CandidateStoreError::unavailable)?;
            f(&mut connection)
        })
        .await
        .map_err(CandidateStoreError::persistence)?
    }
}

#[async_trait]
impl CandidateStore for PostgresCandidateStore {
    async fn load_snapshot(
        &self,
        scope: &SnapshotScope,
    ) -> CandidateStoreResult<Vec<CandidateRecord>> {
        let lookup_scope = scope.clone();
        self.run_blocking(move |connection| {
            let rows = match &lookup_scope {
                SnapshotScope::All => diesel::sql_query(select_candidates!(
                    "ORDER BY COALESCE(fadv_change_flag, 0) DESC, intake_date DESC NULLS LAST, id"
                ))
                .load::<CandidateRow>(connection),
                SnapshotScope::Client(client_id) => diesel::sql_query(select_candidates!(
                    "WHERE client_id = $1 ORDER BY created_at DESC, id"
                ))
                .bind::<Text, _>(client_id.as_str())
                .load::<CandidateRow>(connection),
            }
            .map_err(CandidateStoreError::unavailable)?;

            debug!(scope = %lookup_scope, rows = rows.len(), "loaded candidate snapshot");
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: CandidateId) -> CandidateStoreResult<Option<CandidateRecord>> {
        self.run_blocking(move |connection| {
            let row = diesel::sql_query(select_candidates!("WHERE id = $1"))
                .bind::<BigInt, _>(id.value())
                .get_result::<CandidateRow>(connection)
                .optional()
                .map_err(map_query_error)?;
            row.map(row_to_record).transpose()
        })
        .await
    }

    async fn apply_field_update(
        &self,
        id: CandidateId,
        update: &FieldUpdate,
        stamped_at: DateTime<Utc>,
    ) -> CandidateStoreResult<()> {
        let owned_update = update.clone();
        self.run_blocking(move |connection| {
            let affected = execute_update(connection, id, &owned_update, stamped_at)
                .map_err(map_query_error)?;
            if affected == 0 {
                return Err(CandidateStoreError::NotFound(id));
            }
            debug!(
                candidate_id = %id,
                field = owned_update.field().as_str(),
                "applied field update"
            );
            Ok(())
        })
        .await
    }
}

fn execute_update(
    connection: &mut PgConnection,
    id: CandidateId,
    update: &FieldUpdate,
    stamped_at: DateTime<Utc>,
) -> QueryResult<usize> {
    let id_value = id.value();
    match update {
        FieldUpdate::RecruiterNotes(notes) => diesel::sql_query(update_candidate!(
            "recruiter_notes = $3, fadv_change_flag = 0"
        ))
        .bind::<Timestamptz, _>(stamped_at)
        .bind::<BigInt, _>(id_value)
        .bind::<Text, _>(notes.as_str())
        .execute(connection),
        FieldUpdate::FedexId(fedex_id) => diesel::sql_query(update_candidate!("fedex_id = $3"))
            .bind::<Timestamptz, _>(stamped_at)
            .bind::<BigInt, _>(id_value)
            .bind::<Nullable<Text>, _>(fedex_id.as_ref().map(FedexId::as_str))
            .execute(connection),
        FieldUpdate::Form {
            kind: FormKind::Gcic,
            state,
        } => diesel::sql_query(update_candidate!(
            "gcic_uploaded = $3, gcic_upload_date = $4"
        ))
        .bind::<Timestamptz, _>(stamped_at)
        .bind::<BigInt, _>(id_value)
        .bind::<Integer, _>(i32::from(state.is_uploaded()))
        .bind::<Nullable<Timestamptz>, _>(state.timestamp())
        .execute(connection),
        FieldUpdate::Form {
            kind: FormKind::Mec,
            state,
        } => diesel::sql_query(update_candidate!("mec_uploaded = $3, mec_upload_date = $4"))
            .bind::<Timestamptz, _>(stamped_at)
            .bind::<BigInt, _>(id_value)
            .bind::<Integer, _>(i32::from(state.is_uploaded()))
            .bind::<Nullable<Timestamptz>, _>(state.timestamp())
            .execute(connection),
        FieldUpdate::PipelineStatus(status) => diesel::sql_query(update_candidate!("status = $3"))
            .bind::<Timestamptz, _>(stamped_at)
            .bind::<BigInt, _>(id_value)
            .bind::<Text, _>(status.as_str())
            .execute(connection),
        FieldUpdate::MarkReviewed => {
            diesel::sql_query(update_candidate!("fadv_change_flag = 0"))
                .bind::<Timestamptz, _>(stamped_at)
                .bind::<BigInt, _>(id_value)
                .execute(connection)
        }
    }
}

fn map_query_error(err: DieselError) -> CandidateStoreError {
    if matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
    ) {
        CandidateStoreError::unavailable(err)
    } else {
        CandidateStoreError::persistence(err)
    }
}
