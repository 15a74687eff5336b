//! In-memory adapters for tests and local demos.

mod registry;
mod store;

pub use registry::InMemoryClientRegistry;
pub use store::InMemoryCandidateStore;
