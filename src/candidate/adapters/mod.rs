//! Adapter implementations of the candidate ports.

pub mod memory;
pub mod postgres;
pub mod registry_file;
