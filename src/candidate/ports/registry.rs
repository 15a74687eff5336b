//! Registry port mapping client identifiers to display metadata.

use crate::candidate::domain::{ClientId, ClientProfile};

/// Lookup of known clients.
pub trait ClientRegistry: Send + Sync {
    /// Returns the profile for `client_id`, or `None` when it is unknown.
    fn resolve(&self, client_id: &ClientId) -> Option<ClientProfile>;

    /// Returns every registered client, ordered by identifier.
    fn clients(&self) -> Vec<(ClientId, ClientProfile)>;
}
