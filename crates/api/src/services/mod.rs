//! Application services.
//!
//! Services sit between the route handlers and the repositories. Each
//! returns its own error type, which converts into [`ApiError`](crate::error::ApiError).

pub mod auth;
pub mod booking;
pub mod partner_request;

pub use auth::{AuthError, AuthService, AuthSession};
pub use booking::{BookingError, BookingService};
pub use partner_request::{PartnerRequestError, PartnerRequestService};

/// Whether `err` is a unique violation (SQLSTATE 23505) of `constraint`.
pub(crate) fn unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
