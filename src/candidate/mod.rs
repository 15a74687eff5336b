//! Candidate record reconciliation and filtering.
//!
//! This module backs both the recruiter dashboard (full read/write access)
//! and the client dashboard (read-only, scoped to one client). It loads
//! denormalized candidate snapshots, filters them, diffs bulk edits against
//! the last loaded snapshot, and applies each change as an independent
//! field-scoped write. The module follows hexagonal architecture:
//!
//! - Domain types, filtering, diffing, and aggregation in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
