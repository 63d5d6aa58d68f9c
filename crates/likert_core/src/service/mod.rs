//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into survey use-cases.
//! - Keep callers decoupled from storage details.
//!
//! # Invariants
//! - Services receive their repositories at construction and keep no other
//!   shared state.
//! - Domain rule violations are returned as typed errors, never panics.

pub mod response_service;
pub mod results_service;
pub mod survey_service;
