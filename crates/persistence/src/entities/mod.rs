//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod booking;
pub mod partner_request;
pub mod user;

pub use booking::{BookingEntity, BookingStatusDb};
pub use partner_request::{
    PartnerRequestEntity, PartnerRequestStatusDb, PartnerRequestWithDetailsEntity,
};
pub use user::{PublicUserEntity, UserEntity};
