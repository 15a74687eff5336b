//! Read paths behind the recruiter and client dashboards.
//!
//! Each render loads a fresh snapshot, filters it, and summarises the
//! result. A store that cannot be reached renders as an empty snapshot with
//! a notice attached instead of failing the request.

use crate::candidate::{
    domain::{
        CandidateFilter, CandidateId, CandidateRecord, ClientId, ClientProfile, ClientSummary,
        FilterOptions, RecruiterSummary, SnapshotScope, filter_options,
    },
    ports::{CandidateStore, CandidateStoreError, ClientRegistry},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Detail-panel state carried from one request to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    selected: Option<CandidateId>,
}

impl ViewState {
    /// Returns the state with `id` open in the detail panel.
    #[must_use]
    pub const fn select(self, id: CandidateId) -> Self {
        Self { selected: Some(id) }
    }

    /// Returns the state with the detail panel closed.
    #[must_use]
    pub const fn close(self) -> Self {
        Self { selected: None }
    }

    /// Returns the record open in the detail panel.
    #[must_use]
    pub const fn selected(&self) -> Option<CandidateId> {
        self.selected
    }
}

/// Everything the recruiter dashboard shows for one request.
#[derive(Debug, Clone)]
pub struct RecruiterView {
    /// Full snapshot in presentation order.
    pub snapshot: Vec<CandidateRecord>,
    /// Filtered subset in snapshot order.
    pub visible: Vec<CandidateRecord>,
    /// Headline figures.
    pub summary: RecruiterSummary,
    /// Choices offered by the filter sidebar.
    pub options: FilterOptions,
    /// Record open in the detail panel.
    pub detail: Option<CandidateRecord>,
    /// State to hand to the next request.
    pub state: ViewState,
    /// Set when the snapshot could not be loaded.
    pub unavailable: Option<CandidateStoreError>,
}

/// Recruiter dashboard over every record.
#[derive(Clone)]
pub struct RecruiterDashboard<S>
where
    S: CandidateStore,
{
    store: Arc<S>,
}

impl<S> RecruiterDashboard<S>
where
    S: CandidateStore,
{
    /// Creates a recruiter dashboard.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Renders the dashboard for `filter`.
    ///
    /// A selected record that is no longer in the snapshot closes the
    /// detail panel.
    pub async fn render(&self, filter: &CandidateFilter, state: ViewState) -> RecruiterView {
        let (snapshot, unavailable) = load_or_empty(&*self.store, &SnapshotScope::All).await;
        let visible = filter.apply(&snapshot);

        let detail = state
            .selected()
            .and_then(|id| snapshot.iter().find(|record| record.id() == id).cloned());
        let next_state = if detail.is_some() { state } else { state.close() };

        RecruiterView {
            summary: RecruiterSummary::compute(&snapshot, &visible),
            options: filter_options(&snapshot),
            snapshot,
            visible,
            detail,
            state: next_state,
            unavailable,
        }
    }
}

/// Refusals from the client dashboard. No record data is disclosed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// No client identifier was supplied.
    #[error("no client identifier supplied; available clients: {}", .available.join(", "))]
    MissingClient {
        /// Registered client identifiers.
        available: Vec<String>,
    },

    /// The identifier is not in the client registry.
    #[error("unknown client: {0}")]
    UnknownClient(String),
}

/// A client's records as shown on their dashboard.
#[derive(Debug, Clone)]
pub struct ClientReport {
    /// Resolved client.
    pub client_id: ClientId,
    /// Registry metadata for the client.
    pub profile: ClientProfile,
    /// Dashboard header.
    pub title: String,
    /// The client's records in presentation order.
    pub snapshot: Vec<CandidateRecord>,
    /// Filtered subset in snapshot order.
    pub visible: Vec<CandidateRecord>,
    /// Headline figures over the filtered subset.
    pub summary: ClientSummary,
    /// Choices offered by the filter sidebar.
    pub options: FilterOptions,
    /// Set when the snapshot could not be loaded.
    pub unavailable: Option<CandidateStoreError>,
}

/// Result of opening the client dashboard.
#[derive(Debug, Clone)]
pub enum ClientView {
    /// No identifier was supplied.
    Missing {
        /// Registered clients as `(identifier, label)` pairs.
        available: Vec<(ClientId, String)>,
    },
    /// The identifier is not registered.
    Unknown(String),
    /// The identifier resolved and the client's records were loaded.
    Ready(ClientReport),
}

impl ClientView {
    /// Converts the refusal states into errors.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] unless the view is ready.
    pub fn into_report(self) -> Result<ClientReport, DashboardError> {
        match self {
            Self::Ready(report) => Ok(report),
            Self::Missing { available } => Err(DashboardError::MissingClient {
                available: available
                    .into_iter()
                    .map(|(client_id, _)| client_id.as_str().to_owned())
                    .collect(),
            }),
            Self::Unknown(raw) => Err(DashboardError::UnknownClient(raw)),
        }
    }
}

/// Client dashboard restricted to one registered client.
#[derive(Clone)]
pub struct ClientDashboard<S, R>
where
    S: CandidateStore,
    R: ClientRegistry,
{
    store: Arc<S>,
    registry: Arc<R>,
}

impl<S, R> ClientDashboard<S, R>
where
    S: CandidateStore,
    R: ClientRegistry,
{
    /// Creates a client dashboard.
    #[must_use]
    pub const fn new(store: Arc<S>, registry: Arc<R>) -> Self {
        Self { store, registry }
    }

    /// Registered clients with their listing labels.
    #[must_use]
    pub fn available_clients(&self) -> Vec<(ClientId, String)> {
        self.registry
            .clients()
            .into_iter()
            .map(|(client_id, profile)| {
                let label = profile.listing_label(&client_id);
                (client_id, label)
            })
            .collect()
    }

    /// Resolves `raw_client` and renders that client's records.
    ///
    /// The store is only queried once the identifier resolves. Any client
    /// restriction in `filter` is replaced by the resolved client.
    pub async fn open(&self, raw_client: Option<&str>, filter: &CandidateFilter) -> ClientView {
        let Some(raw) = raw_client.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return ClientView::Missing {
                available: self.available_clients(),
            };
        };
        let resolved = ClientId::new(raw)
            .ok()
            .and_then(|client_id| Some((self.registry.resolve(&client_id)?, client_id)));
        let Some((profile, client_id)) = resolved else {
            warn!(client = raw, "client dashboard requested for unknown client");
            return ClientView::Unknown(raw.to_owned());
        };

        let scope = SnapshotScope::Client(client_id.clone());
        let (mut snapshot, unavailable) = load_or_empty(&*self.store, &scope).await;
        snapshot.retain(|record| record.client_id() == &client_id);

        let visible = filter.clone().with_client(client_id.clone()).apply(&snapshot);
        ClientView::Ready(ClientReport {
            title: profile.title(&client_id),
            summary: ClientSummary::compute(&visible),
            options: filter_options(&snapshot),
            client_id,
            profile,
            snapshot,
            visible,
            unavailable,
        })
    }
}

async fn load_or_empty<S>(
    store: &S,
    scope: &SnapshotScope,
) -> (Vec<CandidateRecord>, Option<CandidateStoreError>)
where
    S: CandidateStore + ?Sized,
{
    match store.load_snapshot(scope).await {
        Ok(snapshot) => {
            debug!(scope = %scope, rows = snapshot.len(), "rendering snapshot");
            (snapshot, None)
        }
        Err(err) => {
            warn!(
                scope = %scope,
                error = %err,
                "candidate store unavailable; rendering empty snapshot"
            );
            (Vec::new(), Some(err))
        }
    }
}
