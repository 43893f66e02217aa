//! Service layer for the concert catalog.
//! - Separates the soft-delete and filtering policy from data access.
//! - Reuses validation and record definitions from the `models` crate.
//! - Provides clear error types at the seam the HTTP layer consumes.

pub mod catalog;
pub mod errors;
pub mod query;
