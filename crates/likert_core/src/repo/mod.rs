//! Record store contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the persistence contracts the survey services depend on.
//! - Keep SQL details out of service/business orchestration.
//!
//! # Invariants
//! - Repository writes enforce model validation before persistence.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Repositories refuse connections that are not fully migrated.

pub mod response_repo;
mod schema;
pub mod survey_repo;
