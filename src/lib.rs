//! Peakats: candidate reconciliation and filtering for recruiting dashboards.
//!
//! This crate loads denormalized candidate snapshots from the record store,
//! filters them with composable predicates, reconciles bulk edits as
//! minimal field-scoped writes, and computes dashboard summaries.
//!
//! # Architecture
//!
//! Peakats follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the record store and client
//!   registry
//! - **Adapters**: `PostgreSQL`, in-memory, and file-backed implementations
//!
//! # Modules
//!
//! - [`candidate`]: Candidate records, filtering, reconciliation, and
//!   dashboards
//! - [`config`]: Store and client registry configuration

pub mod candidate;
pub mod config;
