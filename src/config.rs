//! Runtime configuration for the store and client registry.
//!
//! Both groups are `clap` argument structs so the binary can flatten them
//! into its command line; every option also reads from the environment.

use camino::Utf8PathBuf;
use clap::Args;
use std::time::Duration;
use thiserror::Error;

/// Default number of pooled store connections.
pub const DEFAULT_POOL_SIZE: u32 = 4;
/// Default time allowed to obtain a store connection, in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors raised when configuration is incomplete or invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No store connection string was supplied.
    #[error("no database URL configured; set --database-url or SUPABASE_DB_URL")]
    MissingDatabaseUrl,

    /// The pool must hold at least one connection.
    #[error("pool size must be at least 1")]
    EmptyPool,

    /// A zero timeout would fail every connection attempt.
    #[error("connect timeout must be at least one second")]
    ZeroConnectTimeout,
}

/// Connection settings for the candidate store.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// `PostgreSQL` connection string for the candidate store
    #[arg(long, env = "SUPABASE_DB_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum number of pooled connections
    #[arg(long, env = "PEAKATS_POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: u32,

    /// Seconds to wait for a store connection before reporting it unavailable
    #[arg(
        long,
        env = "PEAKATS_CONNECT_TIMEOUT_SECS",
        default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS
    )]
    pub connect_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl StoreConfig {
    /// Checks the settings without touching the network.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.database_url()?;
        if self.pool_size == 0 {
            return Err(ConfigurationError::EmptyPool);
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigurationError::ZeroConnectTimeout);
        }
        Ok(())
    }

    /// Returns the configured connection string.
    ///
    /// Blank values count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingDatabaseUrl`] when unset.
    pub fn database_url(&self) -> Result<String, ConfigurationError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_owned)
            .ok_or(ConfigurationError::MissingDatabaseUrl)
    }

    /// Pool size, never below one.
    #[must_use]
    pub fn pool_size(&self) -> u32 {
        self.pool_size.max(1)
    }

    /// Connection acquisition timeout, never below one second.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }
}

/// Where to look for `client_registry.json`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Directories searched in order for the client registry file
    #[arg(
        long = "client-registry",
        env = "PEAKATS_CLIENT_REGISTRY",
        value_delimiter = ',',
        default_value = "."
    )]
    pub search_dirs: Vec<Utf8PathBuf>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            search_dirs: vec![Utf8PathBuf::from(".")],
        }
    }
}
