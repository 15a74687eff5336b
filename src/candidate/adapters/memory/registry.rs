//! In-memory client registry.

use std::collections::BTreeMap;

use crate::candidate::{
    domain::{ClientId, ClientProfile},
    ports::ClientRegistry,
};

/// Client registry backed by a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientRegistry {
    clients: BTreeMap<ClientId, ClientProfile>,
}

impl InMemoryClientRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a client.
    #[must_use]
    pub fn with_client(mut self, client_id: ClientId, profile: ClientProfile) -> Self {
        self.clients.insert(client_id, profile);
        self
    }
}

impl FromIterator<(ClientId, ClientProfile)> for InMemoryClientRegistry {
    fn from_iter<I: IntoIterator<Item = (ClientId, ClientProfile)>>(iter: I) -> Self {
        Self {
            clients: iter.into_iter().collect(),
        }
    }
}

impl ClientRegistry for InMemoryClientRegistry {
    fn resolve(&self, client_id: &ClientId) -> Option<ClientProfile> {
        self.clients.get(client_id).cloned()
    }

    fn clients(&self) -> Vec<(ClientId, ClientProfile)> {
        self.clients
            .iter()
            .map(|(client_id, profile)| (client_id.clone(), profile.clone()))
            .collect()
    }
}
