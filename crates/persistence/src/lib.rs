//! Persistence layer for the CourtBook backend.
//!
//! This crate contains:
//! - Database connection management
//! - SQL migrations (applied at startup)
//! - Entity definitions (database row mappings)
//! - Repository implementations

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
