//! Client registry loaded from a JSON file.
//!
//! The file has the shape `{"clients": {"<id>": {"name": .., "display_name":
//! .., "dashboard_title": ..}}}`. Several directories are searched in order
//! and the first readable, well-formed file wins.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::memory::InMemoryClientRegistry;
use crate::candidate::{
    domain::{ClientId, ClientProfile},
    ports::ClientRegistry,
};

/// File name looked up in each search directory.
pub const REGISTRY_FILE_NAME: &str = "client_registry.json";

/// Errors raised while reading one registry file.
#[derive(Debug, Error)]
pub enum RegistryLoadError {
    /// The file could not be read.
    #[error("failed to read client registry: {0}")]
    Io(#[from] io::Error),

    /// The file is not a valid registry document.
    #[error("malformed client registry: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RegistryDocument {
    #[serde(default)]
    clients: BTreeMap<String, ClientProfile>,
}

/// Client registry read from `client_registry.json`.
#[derive(Debug, Clone, Default)]
pub struct FileClientRegistry {
    clients: InMemoryClientRegistry,
    source: Option<Utf8PathBuf>,
}

impl FileClientRegistry {
    /// Searches `search_dirs` in order and loads the first usable registry.
    ///
    /// Unreadable or malformed files are skipped. When no directory holds a
    /// usable file the registry is empty, so every client resolves as
    /// unknown.
    #[must_use]
    pub fn load<P: AsRef<Utf8Path>>(search_dirs: &[P]) -> Self {
        for dir in search_dirs {
            let dir_path = dir.as_ref();
            match read_registry(dir_path) {
                Ok(clients) => {
                    info!(path = %dir_path, "loaded client registry");
                    return Self {
                        clients,
                        source: Some(dir_path.join(REGISTRY_FILE_NAME)),
                    };
                }
                Err(RegistryLoadError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %dir_path, "no client registry in directory");
                }
                Err(err) => {
                    warn!(path = %dir_path, error = %err, "skipping unusable client registry");
                }
            }
        }
        warn!("no client registry found; all clients will resolve as unknown");
        Self::default()
    }

    /// Parses a registry document.
    ///
    /// Entries whose identifier is blank are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryLoadError::Malformed`] when `contents` is not a
    /// valid registry document.
    pub fn parse(contents: &str) -> Result<InMemoryClientRegistry, RegistryLoadError> {
        let document: RegistryDocument = serde_json::from_str(contents)?;
        Ok(document
            .clients
            .into_iter()
            .filter_map(|(raw_id, profile)| match ClientId::new(raw_id) {
                Ok(client_id) => Some((client_id, profile)),
                Err(err) => {
                    warn!(error = %err, "dropping client registry entry");
                    None
                }
            })
            .collect())
    }

    /// Returns the file the registry was loaded from, if any.
    #[must_use]
    pub fn source(&self) -> Option<&Utf8Path> {
        self.source.as_deref()
    }
}

fn read_registry(dir_path: &Utf8Path) -> Result<InMemoryClientRegistry, RegistryLoadError> {
    let dir = Dir::open_ambient_dir(dir_path, ambient_authority())?;
    let contents = dir.read_to_string(REGISTRY_FILE_NAME)?;
    FileClientRegistry::parse(&contents)
}

impl ClientRegistry for FileClientRegistry {
    fn resolve(&self, client_id: &ClientId) -> Option<ClientProfile> {
        self.clients.resolve(client_id)
    }

    fn clients(&self) -> Vec<(ClientId, ClientProfile)> {
        self.clients.clients()
    }
}
