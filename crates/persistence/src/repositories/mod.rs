//! Repository implementations for database operations.

pub mod booking;
pub mod partner_request;
pub mod user;

pub use booking::{BookingRepository, BOOKINGS_ACTIVE_SLOT_INDEX};
pub use partner_request::PartnerRequestRepository;
pub use user::{UserRepository, USERS_EMAIL_INDEX, USERS_USERNAME_INDEX};
