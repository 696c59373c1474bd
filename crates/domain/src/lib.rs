//! Domain layer for the CourtBook backend.
//!
//! This crate contains:
//! - Domain models (User, Booking, PartnerRequest) and their request/response DTOs
//! - Business rules that do not need the database (ownership, request workflow)

pub mod models;
pub mod services;
