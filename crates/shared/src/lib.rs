//! Shared utilities for the CourtBook backend.
//!
//! This crate provides functionality used across the other crates:
//! - Password hashing with Argon2id
//! - Session token (JWT) issuance and verification
//! - Field validators used by request DTOs

pub mod jwt;
pub mod password;
pub mod validation;
