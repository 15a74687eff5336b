//! Unit tests for the candidate module.

mod domain_tests;
mod registry_tests;
mod row_conversion_tests;
