//! Domain services for CourtBook.
//!
//! Services contain business logic that operates on domain models.

pub mod access;

pub use access::{
    ensure_booking_owner, ensure_can_request_partner, ensure_can_respond, AccessDenied,
};
