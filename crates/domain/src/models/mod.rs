//! Domain models for CourtBook.

pub mod booking;
pub mod partner_request;
pub mod user;

pub use booking::{Booking, BookingChanges, BookingStatus, NewBooking};
pub use partner_request::{
    check_self_request, PartnerRequest, PartnerRequestDetails, PartnerRequestStatus,
    RespondAction,
};
pub use user::{AuthResponse, LoginRequest, MeResponse, PublicUser, SignupRequest, User};
