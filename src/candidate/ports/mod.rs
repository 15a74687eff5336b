//! Port contracts for candidate records.
//!
//! Ports define infrastructure-agnostic interfaces used by candidate services.

pub mod registry;
pub mod repository;

pub use registry::ClientRegistry;
pub use repository::{CandidateStore, CandidateStoreError, CandidateStoreResult};

#[cfg(test)]
pub use repository::MockCandidateStore;
