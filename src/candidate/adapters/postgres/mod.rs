//! `PostgreSQL` adapters for candidate persistence.

mod models;
mod repository;
mod schema;

pub(crate) use models::{CandidateRow, row_to_record};
pub use repository::{CandidatePgPool, PostgresCandidateStore, build_pool};
